//! Inbound handle for the capability backend.
//!
//! [`EventFeed`] is the narrowed surface the owning application hands
//! to its capability backend: it can push events in, and nothing else.
//! Subscription, retirement, and state inspection stay on the
//! [`EventRouter`](crate::EventRouter) the application keeps.
//!
//! # Wiring
//!
//! ```text
//! Application (owns the wiring)
//!   ├── router: EventRouter ──────────► UI layer (subscribe_*)
//!   └── router.feed(): EventFeed ─────► capability backend (dispatch/submit)
//! ```
//!
//! There is no process-wide router instance. A test harness wires a
//! fake backend to the same `EventFeed` it would hand the real one, so
//! substitution happens at construction time instead of by mutating a
//! global.

use crate::EventRouter;
use camrelay_event::{wire, CameraEvent, EventError};
use camrelay_types::ErrorCode;
use serde_json::Value;
use tracing::warn;

/// Cloneable inbound handle over an [`EventRouter`].
///
/// # Example
///
/// ```
/// use camrelay_router::EventRouter;
/// use camrelay_types::CameraId;
/// use serde_json::json;
///
/// let router = EventRouter::default();
/// let feed = router.feed();
///
/// let mut closings = router.subscribe_closing(CameraId::new(1));
///
/// // The backend reports a raw wire record...
/// feed.submit(&json!({ "cameraId": 1, "kind": "camera_closing" })).unwrap();
///
/// // ...and the subscriber sees the routed event.
/// assert_eq!(closings.try_recv().unwrap(), CameraId::new(1));
/// ```
#[derive(Debug, Clone)]
pub struct EventFeed {
    router: EventRouter,
}

impl EventFeed {
    pub(crate) fn new(router: EventRouter) -> Self {
        Self { router }
    }

    /// Routes one already-decoded event.
    ///
    /// Returns the number of subscribers that received it (see
    /// [`EventRouter::dispatch`]).
    pub fn dispatch(&self, event: CameraEvent) -> usize {
        self.router.dispatch(event)
    }

    /// Decodes and routes one raw wire record.
    ///
    /// This is the fail-loud boundary: a malformed record is logged and
    /// returned as an error so the backend's contract violation is
    /// visible, never silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when the record cannot be decoded (see
    /// [`wire::decode`]). Nothing is routed in that case.
    pub fn submit(&self, record: &Value) -> Result<usize, EventError> {
        match wire::decode(record) {
            Ok(event) => Ok(self.dispatch(event)),
            Err(err) => {
                warn!(code = err.code(), %err, "rejecting malformed wire record");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camrelay_types::CameraId;
    use serde_json::json;

    #[test]
    fn submit_routes_valid_record() {
        let router = EventRouter::default();
        let feed = router.feed();
        let mut sub = router.subscribe_error(CameraId::new(4));

        let delivered = feed
            .submit(&json!({
                "cameraId": 4,
                "kind": "error",
                "payload": { "description": "overheated" },
            }))
            .expect("valid record");

        assert_eq!(delivered, 1);
        assert_eq!(sub.try_recv().expect("routed").description, "overheated");
    }

    #[test]
    fn submit_rejects_unknown_kind_and_routes_nothing() {
        let router = EventRouter::default();
        let feed = router.feed();

        let err = feed
            .submit(&json!({ "cameraId": 4, "kind": "focus_changed" }))
            .unwrap_err();

        assert_eq!(err.code(), "EVENT_UNKNOWN_KIND");
        // The rejected record must not have activated a session
        assert_eq!(router.active_sessions(), 0);
    }

    #[test]
    fn feed_clones_share_the_router() {
        let router = EventRouter::default();
        let feed = router.feed();
        let feed_clone = feed.clone();
        let cam = CameraId::new(1);

        let mut sub = router.subscribe_closing(cam);
        feed_clone.dispatch(CameraEvent::closing(cam));

        assert_eq!(sub.try_recv().expect("routed"), cam);
    }
}
