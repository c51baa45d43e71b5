//! Event model for CamRelay.
//!
//! This crate defines the camera event types that flow from the host
//! capability layer through the router to per-camera subscribers, plus
//! the decoder for the inbound wire boundary.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Shared Types Layer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  camrelay-types  : CameraId, SubscriberId, ErrorCode        │
//! │  camrelay-event  : CameraEvent, Resolution, wire  ◄── HERE  │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Routing Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  camrelay-router : EventRouter, Subscription, EventFeed     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Event Flow
//!
//! ```text
//! Capability backend (out of scope)
//!     │ wire record { cameraId, kind, payload }
//!     ▼
//! ┌──────────────────┐
//! │  wire::decode    │  fail-loud boundary: unknown kind,
//! │                  │  missing/invalid field → EventError
//! └──────────────────┘
//!     │ CameraEvent { camera_id, kind }
//!     ▼
//! EventRouter (camrelay-router)
//!     │ match on EventKind
//!     ├── ResolutionChanged ──► per-camera resolution stream (+ cache)
//!     ├── Closing           ──► per-camera closing stream
//!     └── Error             ──► per-camera error stream
//! ```
//!
//! # Design
//!
//! Events are one closed tagged union ([`CameraEvent`] holding an
//! [`EventKind`]), not an open class hierarchy: the compiler checks
//! that every routing `match` handles every kind, and the wire decoder
//! is the single place where an unknown discriminant can appear — where
//! it is rejected, never silently dropped.
//!
//! # Usage
//!
//! ```
//! use camrelay_event::{wire, CameraEvent, Resolution};
//! use camrelay_types::{CameraId, TryNew};
//! use serde_json::json;
//!
//! // Construct events directly...
//! let res = Resolution::try_new((1920, 1080, 1280, 720)).unwrap();
//! let event = CameraEvent::resolution_changed(CameraId::new(1), res);
//! assert!(event.is_resolution_changed());
//!
//! // ...or decode them from inbound wire records.
//! let decoded = wire::decode(&json!({
//!     "cameraId": 1,
//!     "kind": "camera_closing",
//! }))
//! .unwrap();
//! assert!(decoded.is_closing());
//! ```

mod error;
mod event;
pub mod wire;

pub use error::EventError;
pub use event::{CameraEvent, ErrorDetails, EventKind, Resolution};
