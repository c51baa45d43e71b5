//! Router configuration.
//!
//! [`RouterConfig`] defines the behavioral attributes of an
//! [`EventRouter`](crate::EventRouter). The router has no persisted
//! state and no config files; configuration is a plain value the owning
//! application constructs and passes in.
//!
//! # Example
//!
//! ```
//! use camrelay_router::{RouterConfig, DEFAULT_EVENT_CAPACITY};
//!
//! let config = RouterConfig::default();
//! assert_eq!(config.event_capacity(), DEFAULT_EVENT_CAPACITY);
//!
//! // A headless batch consumer that drains slowly may want more slack.
//! let config = RouterConfig::default().with_event_capacity(256);
//! assert_eq!(config.event_capacity(), 256);
//! ```

use serde::{Deserialize, Serialize};

/// Default per-kind broadcast capacity.
///
/// 64 is enough for burst handling without memory bloat: camera events
/// are low-rate (resolution renegotiations, shutdown, sporadic errors),
/// so a subscriber has to stall for a long time before it lags. A
/// lagging subscriber skips the overflowed events for itself only.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Configuration for an [`EventRouter`](crate::EventRouter).
///
/// # Capacity Semantics
///
/// Each camera session owns one broadcast channel per event kind;
/// `event_capacity` bounds how many undelivered events each of those
/// channels retains per subscriber. The router never blocks on a slow
/// subscriber — once a subscriber falls more than `event_capacity`
/// events behind, it observes a lag error and resumes from the oldest
/// retained event. Other subscribers and the resolution cache are
/// unaffected.
///
/// # Example
///
/// ```
/// use camrelay_router::RouterConfig;
///
/// let config = RouterConfig::new(128);
/// assert_eq!(config.event_capacity(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Per-kind broadcast channel capacity.
    event_capacity: usize,
}

impl RouterConfig {
    /// Creates a configuration with the given per-kind capacity.
    #[must_use]
    pub const fn new(event_capacity: usize) -> Self {
        Self { event_capacity }
    }

    /// Returns the per-kind broadcast channel capacity.
    #[must_use]
    pub const fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Returns a new config with the specified capacity.
    #[must_use]
    pub const fn with_event_capacity(mut self, event_capacity: usize) -> Self {
        self.event_capacity = event_capacity;
        self
    }
}

impl Default for RouterConfig {
    /// Default configuration with [`DEFAULT_EVENT_CAPACITY`].
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}
