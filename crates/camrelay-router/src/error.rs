//! Router layer errors.
//!
//! This module defines errors for session lifecycle operations.
//! Stream consumption errors live with the subscription handle
//! (see [`RecvError`](crate::RecvError) and
//! [`TryRecvError`](crate::TryRecvError)).
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`RouterError::SessionNotFound`] | `ROUTER_SESSION_NOT_FOUND` | No |
//! | [`RouterError::AlreadyRetired`] | `ROUTER_ALREADY_RETIRED` | No |
//!
//! # Example
//!
//! ```
//! use camrelay_router::RouterError;
//! use camrelay_types::{CameraId, ErrorCode};
//!
//! let err = RouterError::SessionNotFound(CameraId::new(9));
//!
//! assert_eq!(err.code(), "ROUTER_SESSION_NOT_FOUND");
//! assert!(!err.is_recoverable());
//! ```

use camrelay_types::{CameraId, ErrorCode};
use thiserror::Error;

/// Session lifecycle error.
///
/// Returned by [`EventRouter::retire_session`](crate::EventRouter::retire_session)
/// when the requested transition is not valid for the session's current
/// state. Subscribing never returns these: subscription to an unknown
/// camera activates it, and subscription to a retired camera yields a
/// closed stream (see the router docs for the rationale).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The camera id has no session to retire.
    ///
    /// The id was never activated by an event or a subscription, so
    /// there is nothing to dispose. Retiring it anyway would mask a
    /// double-teardown bug in the caller.
    #[error("no session for {0}")]
    SessionNotFound(CameraId),

    /// The session was already retired.
    ///
    /// Retirement is final and idempotence is deliberately not offered:
    /// the capability backend disposes each session exactly once, so a
    /// second retire call is a caller bug worth surfacing.
    #[error("session already retired: {0}")]
    AlreadyRetired(CameraId),
}

impl ErrorCode for RouterError {
    fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "ROUTER_SESSION_NOT_FOUND",
            Self::AlreadyRetired(_) => "ROUTER_ALREADY_RETIRED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Both indicate a lifecycle bug in the caller
        false
    }
}
