//! Per-camera session state.
//!
//! A [`CameraSession`] is the router-side state for one camera id: one
//! broadcast sender per event kind plus the size-1 resolution replay
//! cache. Sessions are created lazily and destroyed exactly once.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────────┐  first event or       ┌────────┐
//! │ Uninitialized │  first subscription   │ Active │
//! │ (no session)  │ ────────────────────► │        │
//! └───────────────┘                       └───┬────┘
//!                                             │ retire_session()
//!                                             ▼
//!                                        ┌─────────┐
//!                                        │ Retired │  (final; the id is
//!                                        └─────────┘   never reused)
//! ```
//!
//! `Uninitialized` and `Retired` are not stored as session objects: the
//! former is absence from the session map, the latter is membership in
//! the retired set. Only `Active` sessions hold channels and cache.

use camrelay_event::{ErrorDetails, EventKind, Resolution};
use camrelay_types::CameraId;
use tokio::sync::broadcast;

/// Observable lifecycle state of a camera id, as seen by the router.
///
/// # State Transitions
///
/// | From | To | Trigger |
/// |------|----|---------|
/// | Uninitialized | Active | first event or first subscription |
/// | Active | Retired | [`EventRouter::retire_session`](crate::EventRouter::retire_session) |
///
/// There is no transition out of `Retired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The router has never seen this camera id.
    Uninitialized,

    /// The session is live: events route and the cache updates.
    Active,

    /// The session was disposed. Late events are discarded and the id
    /// cannot be reactivated.
    Retired,
}

impl SessionState {
    /// Returns `true` if the session is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if the session was disposed.
    #[must_use]
    pub fn is_retired(&self) -> bool {
        matches!(self, Self::Retired)
    }
}

/// Router-side state for one active camera session.
///
/// Owns the three per-kind broadcast senders and the resolution replay
/// cache. Dropping the session (on retirement) drops the senders, which
/// closes every outstanding subscriber stream.
#[derive(Debug)]
pub(crate) struct CameraSession {
    id: CameraId,
    resolution_tx: broadcast::Sender<Resolution>,
    closing_tx: broadcast::Sender<CameraId>,
    error_tx: broadcast::Sender<ErrorDetails>,
    /// Latest resolution observed for this camera, replayed to new
    /// subscribers. Updated on every resolution event whether or not
    /// anyone is subscribed.
    last_resolution: Option<Resolution>,
}

impl CameraSession {
    /// Creates the session with all three kind channels at `capacity`.
    pub(crate) fn new(id: CameraId, capacity: usize) -> Self {
        // broadcast::channel panics on zero capacity
        let capacity = capacity.max(1);
        let (resolution_tx, _) = broadcast::channel(capacity);
        let (closing_tx, _) = broadcast::channel(capacity);
        let (error_tx, _) = broadcast::channel(capacity);
        Self {
            id,
            resolution_tx,
            closing_tx,
            error_tx,
            last_resolution: None,
        }
    }

    /// Publishes one event to the matching kind channel.
    ///
    /// Updates the resolution cache before sending, so the cache is
    /// current even when nobody is subscribed. Returns the number of
    /// subscribers that received the event.
    pub(crate) fn publish(&mut self, kind: &EventKind) -> usize {
        match kind {
            EventKind::ResolutionChanged(resolution) => {
                self.last_resolution = Some(*resolution);
                self.resolution_tx.send(*resolution).unwrap_or(0)
            }
            EventKind::Closing => self.closing_tx.send(self.id).unwrap_or(0),
            EventKind::Error(details) => self.error_tx.send(details.clone()).unwrap_or(0),
        }
    }

    /// Subscribes to resolution events, returning the cached value (if
    /// any) alongside the live receiver.
    ///
    /// Callers must hold the router lock across this call so the cache
    /// snapshot and the receiver attach atomically: no event can land
    /// between them and be both replayed and delivered live.
    pub(crate) fn subscribe_resolution(
        &self,
    ) -> (Option<Resolution>, broadcast::Receiver<Resolution>) {
        (self.last_resolution, self.resolution_tx.subscribe())
    }

    /// Subscribes to closing events. No replay.
    pub(crate) fn subscribe_closing(&self) -> broadcast::Receiver<CameraId> {
        self.closing_tx.subscribe()
    }

    /// Subscribes to error events. No replay.
    pub(crate) fn subscribe_error(&self) -> broadcast::Receiver<ErrorDetails> {
        self.error_tx.subscribe()
    }

    /// Number of live subscribers across all three kind channels.
    pub(crate) fn subscriber_count(&self) -> usize {
        self.resolution_tx.receiver_count()
            + self.closing_tx.receiver_count()
            + self.error_tx.receiver_count()
    }
}
