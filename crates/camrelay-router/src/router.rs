//! EventRouter - per-camera, per-kind event fan-out.
//!
//! The [`EventRouter`] is the routing core: it accepts one inbound
//! sequence of tagged [`CameraEvent`]s and exposes derived per-camera,
//! per-kind streams to subscribers.
//!
//! ```text
//! Capability backend                      UI-facing subscribers
//!        │                                        ▲
//!        │ dispatch(CameraEvent)                  │ recv()
//!        ▼                                        │
//! ┌────────────────────────────────────────────────────────────┐
//! │                        EventRouter                          │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │ sessions: CameraId → CameraSession                   │  │
//! │  │   ├── resolution channel (+ size-1 replay cache)     │  │
//! │  │   ├── closing channel                                │  │
//! │  │   └── error channel                                  │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │  retired: CameraId set (final; late events discarded)      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Delivery Guarantees
//!
//! - Filtering is exact-match on camera id; events never cross sessions.
//! - Within a session, subscribers observe events in arrival order.
//! - No buffering happens for cameras without subscribers, except the
//!   size-1 resolution cache, which updates on every resolution event
//!   once the session exists.
//! - Dispatch never blocks: a slow subscriber lags on its own receiver
//!   and nobody else notices.
//!
//! # Thread Safety
//!
//! `EventRouter` is cheaply cloneable (shared state behind an `Arc`)
//! and all methods take `&self`. The session map — cache read, cache
//! update, and enqueue-to-subscribers — is one mutex-serialized region,
//! so inbound events may arrive from any thread.

use crate::{CameraSession, EventFeed, RouterConfig, RouterError, SessionState, Subscription};
use camrelay_event::{CameraEvent, ErrorDetails, Resolution};
use camrelay_types::CameraId;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Routes camera events to per-camera, per-kind subscriber streams.
///
/// Constructed and wired explicitly by the owning application: hand an
/// [`EventFeed`] (from [`feed()`](Self::feed)) to the capability
/// backend and keep the router for the subscribing side. There is no
/// process-wide instance; tests build a router and substitute a fake
/// backend at construction time.
///
/// # Example
///
/// ```
/// use camrelay_router::{EventRouter, RouterConfig};
/// use camrelay_event::CameraEvent;
/// use camrelay_types::CameraId;
///
/// let router = EventRouter::new(RouterConfig::default());
/// let cam = CameraId::new(1);
///
/// let mut errors = router.subscribe_error(cam);
/// router.feed().dispatch(CameraEvent::error(cam, "sensor timeout"));
///
/// let details = errors.try_recv().expect("event delivered");
/// assert_eq!(details.description, "sensor timeout");
/// ```
#[derive(Debug, Clone)]
pub struct EventRouter {
    inner: Arc<RouterInner>,
}

#[derive(Debug)]
struct RouterInner {
    config: RouterConfig,
    state: Mutex<RouterState>,
}

#[derive(Debug, Default)]
struct RouterState {
    /// Active sessions by camera id.
    sessions: HashMap<CameraId, CameraSession>,
    /// Retired camera ids. Membership is permanent: a disposed id must
    /// not be resurrected by a late event or a new subscription.
    retired: HashSet<CameraId>,
}

impl EventRouter {
    /// Creates a router with the given configuration.
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                config,
                state: Mutex::new(RouterState::default()),
            }),
        }
    }

    /// Returns the router's configuration.
    #[must_use]
    pub fn config(&self) -> RouterConfig {
        self.inner.config
    }

    /// Returns the inbound handle for the capability backend.
    ///
    /// The feed exposes only the producing surface (`dispatch`,
    /// `submit`); subscription stays with the router.
    #[must_use]
    pub fn feed(&self) -> EventFeed {
        EventFeed::new(self.clone())
    }

    /// Routes one event to the subscribers of its camera and kind.
    ///
    /// Activates the session on first contact. Events tagged with a
    /// retired camera id are discarded (logged, not an error — the
    /// backend may race its own teardown).
    ///
    /// # Returns
    ///
    /// Number of subscribers that received the event. `0` when the
    /// session is retired or nobody of that kind is subscribed; the
    /// resolution cache updates regardless.
    pub fn dispatch(&self, event: CameraEvent) -> usize {
        let mut state = self.inner.state.lock();

        if state.retired.contains(&event.camera_id) {
            warn!(camera = %event.camera_id, kind = %event.kind,
                "discarding event for retired session");
            return 0;
        }

        let session = self.activate(&mut state, event.camera_id);
        let delivered = session.publish(&event.kind);
        trace!(camera = %event.camera_id, kind = %event.kind, delivered,
            "event dispatched");
        delivered
    }

    /// Subscribes to resolution-changed events for one camera.
    ///
    /// If the camera already reported a resolution, the subscription
    /// replays the latest one before any live event. All subscribers of
    /// a camera share the same cache.
    ///
    /// Subscribing to a camera the router has never seen activates it
    /// and yields a stream that emits nothing until events arrive.
    /// Subscribing to a retired camera yields a closed stream.
    #[must_use]
    pub fn subscribe_resolution_changed(&self, camera_id: CameraId) -> Subscription<Resolution> {
        let mut state = self.inner.state.lock();
        if state.retired.contains(&camera_id) {
            return Subscription::closed(camera_id);
        }
        // Cache snapshot and receiver attach under one lock: an event
        // arriving now is either in the snapshot or in the stream,
        // never both, never neither.
        let (replay, rx) = self.activate(&mut state, camera_id).subscribe_resolution();
        Subscription::new(camera_id, replay, rx)
    }

    /// Subscribes to closing events for one camera. No replay.
    ///
    /// Unknown and retired ids behave as in
    /// [`subscribe_resolution_changed`](Self::subscribe_resolution_changed).
    #[must_use]
    pub fn subscribe_closing(&self, camera_id: CameraId) -> Subscription<CameraId> {
        let mut state = self.inner.state.lock();
        if state.retired.contains(&camera_id) {
            return Subscription::closed(camera_id);
        }
        let rx = self.activate(&mut state, camera_id).subscribe_closing();
        Subscription::new(camera_id, None, rx)
    }

    /// Subscribes to error events for one camera. No replay.
    ///
    /// Unknown and retired ids behave as in
    /// [`subscribe_resolution_changed`](Self::subscribe_resolution_changed).
    #[must_use]
    pub fn subscribe_error(&self, camera_id: CameraId) -> Subscription<ErrorDetails> {
        let mut state = self.inner.state.lock();
        if state.retired.contains(&camera_id) {
            return Subscription::closed(camera_id);
        }
        let rx = self.activate(&mut state, camera_id).subscribe_error();
        Subscription::new(camera_id, None, rx)
    }

    /// Disposes a session permanently.
    ///
    /// Drops the session's channels (outstanding subscribers drain and
    /// then observe end-of-stream), discards the resolution cache, and
    /// bars the id from reactivation.
    ///
    /// # Errors
    ///
    /// - [`RouterError::AlreadyRetired`] if the id was retired before
    /// - [`RouterError::SessionNotFound`] if the id was never active
    pub fn retire_session(&self, camera_id: CameraId) -> Result<(), RouterError> {
        let mut state = self.inner.state.lock();

        if state.retired.contains(&camera_id) {
            return Err(RouterError::AlreadyRetired(camera_id));
        }
        let Some(session) = state.sessions.remove(&camera_id) else {
            return Err(RouterError::SessionNotFound(camera_id));
        };

        state.retired.insert(camera_id);
        debug!(camera = %camera_id, subscribers = session.subscriber_count(),
            "session retired");
        // Dropping the session drops its senders, closing all streams
        drop(session);
        Ok(())
    }

    /// Returns the lifecycle state of a camera id.
    #[must_use]
    pub fn session_state(&self, camera_id: CameraId) -> SessionState {
        let state = self.inner.state.lock();
        if state.retired.contains(&camera_id) {
            SessionState::Retired
        } else if state.sessions.contains_key(&camera_id) {
            SessionState::Active
        } else {
            SessionState::Uninitialized
        }
    }

    /// Returns the number of active sessions.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.inner.state.lock().sessions.len()
    }

    /// Looks up or lazily creates the session for `camera_id`.
    ///
    /// Caller must have checked the retired set first.
    fn activate<'a>(
        &self,
        state: &'a mut RouterState,
        camera_id: CameraId,
    ) -> &'a mut CameraSession {
        state.sessions.entry(camera_id).or_insert_with(|| {
            debug!(camera = %camera_id, "session activated");
            CameraSession::new(camera_id, self.inner.config.event_capacity())
        })
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TryRecvError;
    use camrelay_types::TryNew;

    fn res(width: u32) -> Resolution {
        Resolution::try_new((width, 1080, 1280, 720)).expect("valid test resolution")
    }

    #[test]
    fn config_is_exposed() {
        let router = EventRouter::new(RouterConfig::new(16));
        assert_eq!(router.config().event_capacity(), 16);
    }

    #[test]
    fn starts_with_no_sessions() {
        let router = EventRouter::default();
        assert_eq!(router.active_sessions(), 0);
        assert_eq!(
            router.session_state(CameraId::new(1)),
            SessionState::Uninitialized
        );
    }

    #[test]
    fn event_activates_session() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);

        router.dispatch(CameraEvent::closing(cam));

        assert_eq!(router.session_state(cam), SessionState::Active);
        assert_eq!(router.active_sessions(), 1);
    }

    #[test]
    fn subscription_activates_session() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);

        let _sub = router.subscribe_error(cam);

        assert_eq!(router.session_state(cam), SessionState::Active);
    }

    #[test]
    fn dispatch_returns_delivered_count() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);

        assert_eq!(router.dispatch(CameraEvent::closing(cam)), 0);

        let _a = router.subscribe_closing(cam);
        let _b = router.subscribe_closing(cam);
        assert_eq!(router.dispatch(CameraEvent::closing(cam)), 2);
    }

    #[test]
    fn cache_updates_without_subscribers() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);

        router.dispatch(CameraEvent::resolution_changed(cam, res(640)));
        router.dispatch(CameraEvent::resolution_changed(cam, res(1920)));

        let mut sub = router.subscribe_resolution_changed(cam);
        assert_eq!(sub.try_recv(), Ok(res(1920)));
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn retire_unknown_session_fails() {
        let router = EventRouter::default();
        assert_eq!(
            router.retire_session(CameraId::new(9)),
            Err(RouterError::SessionNotFound(CameraId::new(9)))
        );
    }

    #[test]
    fn retire_twice_fails() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);
        router.dispatch(CameraEvent::closing(cam));

        assert_eq!(router.retire_session(cam), Ok(()));
        assert_eq!(
            router.retire_session(cam),
            Err(RouterError::AlreadyRetired(cam))
        );
    }

    #[test]
    fn retired_session_discards_events() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);
        router.dispatch(CameraEvent::closing(cam));
        router.retire_session(cam).expect("active session retires");

        assert_eq!(router.dispatch(CameraEvent::error(cam, "late")), 0);
        assert_eq!(router.session_state(cam), SessionState::Retired);
        // The discarded event must not reactivate the session
        assert_eq!(router.active_sessions(), 0);
    }

    #[test]
    fn retired_session_yields_closed_subscriptions() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);
        router.dispatch(CameraEvent::resolution_changed(cam, res(1920)));
        router.retire_session(cam).expect("active session retires");

        // The replay cache dies with the session
        let mut sub = router.subscribe_resolution_changed(cam);
        assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
        assert_eq!(router.session_state(cam), SessionState::Retired);
    }

    #[test]
    fn retirement_closes_outstanding_streams() {
        let router = EventRouter::default();
        let cam = CameraId::new(1);

        let mut sub = router.subscribe_closing(cam);
        router.dispatch(CameraEvent::closing(cam));
        router.retire_session(cam).expect("active session retires");

        // Pending event drains, then the stream ends
        assert_eq!(sub.try_recv(), Ok(cam));
        assert_eq!(sub.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn clones_share_state() {
        let router = EventRouter::default();
        let clone = router.clone();
        let cam = CameraId::new(1);

        router.dispatch(CameraEvent::closing(cam));
        assert_eq!(clone.session_state(cam), SessionState::Active);
    }

    #[test]
    fn sessions_are_isolated() {
        let router = EventRouter::default();
        let mut sub = router.subscribe_error(CameraId::new(2));

        router.dispatch(CameraEvent::error(CameraId::new(1), "other camera"));

        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    }
}
