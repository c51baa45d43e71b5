//! Identifier types for CamRelay.
//!
//! [`CameraId`] is assigned by the host capability layer and merely
//! wrapped here; [`SubscriberId`] is generated locally (UUID v4) and
//! exists for log correlation only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a camera capability session.
///
/// The host capability layer assigns a non-negative integer to each
/// camera session it opens and tags every event it produces with that
/// integer. The router treats the value as opaque: it is a routing key,
/// never an index or a handle into router-owned storage.
///
/// # Why an integer, not a UUID?
///
/// The id originates outside this process. The capability layer hands
/// out small integers (texture ids, device slots) and the router must
/// match on exactly the value it receives. Generating our own ids here
/// would break the shared-key contract with the host.
///
/// # Example
///
/// ```
/// use camrelay_types::CameraId;
///
/// let cam = CameraId::new(3);
/// assert_eq!(cam.raw(), 3);
/// assert_eq!(cam.to_string(), "cam:3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraId(pub u32);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - see below
impl CameraId {
    /// Wraps a host-assigned camera id.
    ///
    /// # Example
    ///
    /// ```
    /// use camrelay_types::CameraId;
    ///
    /// let cam = CameraId::new(0);
    /// assert_eq!(cam.raw(), 0);
    /// ```
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

// NOTE: CameraId intentionally does NOT implement Default.
// Default::default() would fabricate id 0, which may collide with a real
// session assigned by the host. Ids only ever come from the capability layer.

impl std::fmt::Display for CameraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cam:{}", self.0)
    }
}

/// Identifier for a single subscription handle.
///
/// Every subscription handle handed out by the router carries one of
/// these so that log lines from
/// concurrent subscribers to the same camera can be told apart. It plays
/// no role in routing: filtering is by [`CameraId`] and event kind only.
///
/// # Example
///
/// ```
/// use camrelay_types::SubscriberId;
///
/// let a = SubscriberId::new();
/// let b = SubscriberId::new();
///
/// assert_ne!(a, b); // Each handle is unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - generated by the router on subscribe
impl SubscriberId {
    /// Creates a new [`SubscriberId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: SubscriberId intentionally does NOT implement Default.
// Ids are minted by the router when a subscription is created; constructing
// one anywhere else would produce an id no log line ever refers to.

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

// Tests are in lib.rs as integration tests for public API
