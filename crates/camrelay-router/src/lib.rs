//! CamRelay Router - per-camera event fan-out with resolution replay.
//!
//! This crate is the routing layer of the CamRelay workspace: it takes
//! the single inbound stream of tagged camera events produced by a host
//! capability backend and exposes per-camera, per-kind subscriber
//! streams, with a size-1 replay cache for resolution changes so late
//! subscribers immediately learn the current resolution.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Shared Types Layer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  camrelay-types  : CameraId, SubscriberId, ErrorCode        │
//! │  camrelay-event  : CameraEvent, Resolution, wire decode     │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Routing Layer (THIS CRATE)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  EventRouter   : session map, dispatch, subscribe           │
//! │  EventFeed     : narrowed inbound handle for the backend    │
//! │  Subscription  : replay-then-live subscriber stream         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Event Flow
//!
//! ```text
//! Capability backend ──submit/dispatch──► EventRouter
//!                                             │ exact-match on camera id,
//!                                             │ match on event kind
//!                 ┌───────────────────────────┼──────────────────────────┐
//!                 ▼                           ▼                          ▼
//!   Subscription<Resolution>      Subscription<CameraId>     Subscription<ErrorDetails>
//!   (latest value replayed)       (closing, no replay)       (errors, no replay)
//! ```
//!
//! # Session Lifecycle
//!
//! Per camera id: `Uninitialized -> Active` on first event or first
//! subscription, `Active -> Retired` on
//! [`EventRouter::retire_session`]. Retirement is final: late events
//! are discarded and the id cannot be reactivated.
//!
//! # Concurrency Model
//!
//! One mutex serializes the read-cache / update-cache /
//! enqueue-to-subscribers region; delivery fans out over broadcast
//! channels so subscribers consume independently. Dispatch never
//! blocks. A subscriber that falls behind observes a recoverable lag
//! error on its own stream only — backpressure policy belongs to the
//! host environment, not this crate.
//!
//! # Usage
//!
//! ```
//! use camrelay_router::{EventRouter, RouterConfig};
//! use camrelay_event::{CameraEvent, Resolution};
//! use camrelay_types::{CameraId, TryNew};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let router = EventRouter::new(RouterConfig::default());
//! let cam = CameraId::new(1);
//!
//! // The backend gets the feed; the UI keeps the router.
//! let feed = router.feed();
//!
//! let res = Resolution::try_new((1920, 1080, 1280, 720)).unwrap();
//! feed.dispatch(CameraEvent::resolution_changed(cam, res));
//!
//! // A late subscriber still sees the current resolution first.
//! let mut resolutions = router.subscribe_resolution_changed(cam);
//! assert_eq!(resolutions.recv().await.unwrap(), res);
//! # });
//! ```

mod config;
mod error;
mod feed;
mod router;
mod session;
mod subscription;

pub use config::{RouterConfig, DEFAULT_EVENT_CAPACITY};
pub use error::RouterError;
pub use feed::EventFeed;
pub use router::EventRouter;
pub use session::SessionState;
pub use subscription::{RecvError, Subscription, TryRecvError};

pub(crate) use session::CameraSession;

// Re-export the event model for convenience
pub use camrelay_event::{CameraEvent, ErrorDetails, EventKind, Resolution};
pub use camrelay_types::{CameraId, SubscriberId};
