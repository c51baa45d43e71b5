//! Subscriber-side stream handles.
//!
//! A [`Subscription`] is one subscriber's view of one camera's events of
//! one kind: an optional replayed value (the resolution cache) followed
//! by live events in arrival order. Handles are independent — dropping
//! one detaches only that subscriber and never disturbs the session,
//! the cache, or other subscribers.
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`RecvError::Closed`] / [`TryRecvError::Closed`] | `ROUTER_STREAM_CLOSED` | No |
//! | [`RecvError::Lagged`] / [`TryRecvError::Lagged`] | `ROUTER_STREAM_LAGGED` | Yes |
//! | [`TryRecvError::Empty`] | `ROUTER_STREAM_EMPTY` | Yes |

use camrelay_types::{CameraId, ErrorCode, SubscriberId};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Error from [`Subscription::recv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecvError {
    /// The stream ended: the session was retired and no events remain.
    ///
    /// Terminal for this handle; further calls keep returning `Closed`.
    #[error("event stream closed")]
    Closed,

    /// The subscriber fell behind; the payload is the number of events
    /// skipped for this handle.
    ///
    /// The router never blocks on a slow subscriber; the overflowed
    /// events are gone for this handle only. Resume calling `recv` to
    /// continue from the oldest retained event.
    #[error("event stream lagged, skipped {0} events")]
    Lagged(u64),
}

impl ErrorCode for RecvError {
    fn code(&self) -> &'static str {
        match self {
            Self::Closed => "ROUTER_STREAM_CLOSED",
            Self::Lagged(_) => "ROUTER_STREAM_LAGGED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Lagged(_))
    }
}

/// Error from [`Subscription::try_recv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRecvError {
    /// No event is currently available; poll again later.
    #[error("no event available")]
    Empty,

    /// The stream ended: the session was retired and no events remain.
    #[error("event stream closed")]
    Closed,

    /// The subscriber fell behind; the payload is the number of events
    /// skipped for this handle.
    #[error("event stream lagged, skipped {0} events")]
    Lagged(u64),
}

impl ErrorCode for TryRecvError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "ROUTER_STREAM_EMPTY",
            Self::Closed => "ROUTER_STREAM_CLOSED",
            Self::Lagged(_) => "ROUTER_STREAM_LAGGED",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// One subscriber's stream of per-camera events of a single kind.
///
/// Produced by the `subscribe_*` operations on
/// [`EventRouter`](crate::EventRouter). The type parameter is the
/// kind's payload: [`Resolution`](camrelay_event::Resolution) for
/// resolution changes, [`CameraId`] for closing notifications,
/// [`ErrorDetails`](camrelay_event::ErrorDetails) for errors.
///
/// # Replay
///
/// A resolution subscription created after the camera already reported
/// a resolution yields that cached value from the first `recv` before
/// any live event. Closing and error subscriptions never replay.
///
/// # Example
///
/// ```
/// use camrelay_router::EventRouter;
/// use camrelay_types::CameraId;
///
/// # async fn demo() {
/// let router = EventRouter::default();
/// let mut errors = router.subscribe_error(CameraId::new(1));
///
/// while let Ok(details) = errors.recv().await {
///     eprintln!("camera 1: {}", details.description);
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Subscription<T> {
    subscriber_id: SubscriberId,
    camera_id: CameraId,
    /// Cached value delivered before any live event. Consumed once.
    replay: Option<T>,
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Wraps a live receiver, optionally fronted by a replayed value.
    pub(crate) fn new(camera_id: CameraId, replay: Option<T>, rx: broadcast::Receiver<T>) -> Self {
        let subscriber_id = SubscriberId::new();
        debug!(camera = %camera_id, subscriber = %subscriber_id, replay = replay.is_some(),
            "subscription created");
        Self {
            subscriber_id,
            camera_id,
            replay,
            rx,
        }
    }

    /// Creates an already-closed subscription for a retired camera id.
    ///
    /// The handle emits nothing and `recv` returns
    /// [`RecvError::Closed`] immediately.
    pub(crate) fn closed(camera_id: CameraId) -> Self {
        let (tx, rx) = broadcast::channel(1);
        drop(tx);
        Self::new(camera_id, None, rx)
    }

    /// Returns the camera this subscription filters on.
    #[must_use]
    pub fn camera_id(&self) -> CameraId {
        self.camera_id
    }

    /// Returns this handle's identifier (log correlation only).
    #[must_use]
    pub fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    /// Receives the next event, waiting until one is available.
    ///
    /// The replayed cache value (if any) is delivered first.
    ///
    /// # Errors
    ///
    /// - [`RecvError::Closed`] when the session was retired and the
    ///   stream is drained
    /// - [`RecvError::Lagged`] when this subscriber fell behind; call
    ///   again to resume
    pub async fn recv(&mut self) -> Result<T, RecvError> {
        if let Some(value) = self.replay.take() {
            return Ok(value);
        }
        match self.rx.recv().await {
            Ok(value) => Ok(value),
            Err(broadcast::error::RecvError::Closed) => Err(RecvError::Closed),
            Err(broadcast::error::RecvError::Lagged(skipped)) => Err(RecvError::Lagged(skipped)),
        }
    }

    /// Receives the next event without waiting.
    ///
    /// # Errors
    ///
    /// - [`TryRecvError::Empty`] when no event is pending
    /// - [`TryRecvError::Closed`] when the session was retired and the
    ///   stream is drained
    /// - [`TryRecvError::Lagged`] when this subscriber fell behind
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        if let Some(value) = self.replay.take() {
            return Ok(value);
        }
        match self.rx.try_recv() {
            Ok(value) => Ok(value),
            Err(broadcast::error::TryRecvError::Empty) => Err(TryRecvError::Empty),
            Err(broadcast::error::TryRecvError::Closed) => Err(TryRecvError::Closed),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                Err(TryRecvError::Lagged(skipped))
            }
        }
    }
}
