//! Core types for CamRelay.
//!
//! This crate provides the foundational identifier types and error
//! conventions shared by the CamRelay event-routing workspace.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Shared Types Layer                       │
//! │  (Minimal dependencies, safe for any collaborator)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  camrelay-types  : CameraId, SubscriberId, ErrorCode ◄─ HERE │
//! │  camrelay-event  : CameraEvent, Resolution, wire decode     │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Routing Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  camrelay-router : EventRouter, Subscription, EventFeed     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! - [`CameraId`] wraps the non-negative integer the host capability
//!   layer assigns to each camera session. It is the routing key for
//!   every event and is never generated inside this workspace.
//! - [`SubscriberId`] is a locally generated UUID identifying one
//!   subscription handle, used only to correlate log lines.
//!
//! # Error Conventions
//!
//! All error types in the workspace implement [`ErrorCode`]:
//! machine-readable `UPPER_SNAKE_CASE` codes with a layer prefix, plus a
//! recoverability flag for callers deciding between retry and repair.
//!
//! # Example
//!
//! ```
//! use camrelay_types::{CameraId, SubscriberId};
//!
//! // Camera ids come from the host; here we fake one.
//! let cam = CameraId::new(1);
//! assert_eq!(cam.to_string(), "cam:1");
//!
//! // Subscriber ids are minted locally and unique.
//! let sub = SubscriberId::new();
//! assert_ne!(sub, SubscriberId::new());
//! ```

mod construct;
mod error;
mod id;

pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{CameraId, SubscriberId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_id_round_trip() {
        let id = CameraId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id, CameraId::new(42));
        assert_ne!(id, CameraId::new(43));
    }

    #[test]
    fn camera_id_display() {
        assert_eq!(CameraId::new(0).to_string(), "cam:0");
        assert_eq!(CameraId::new(7).to_string(), "cam:7");
    }

    #[test]
    fn camera_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&CameraId::new(5)).expect("serialize CameraId");
        assert_eq!(json, "5");

        let id: CameraId = serde_json::from_str("5").expect("deserialize CameraId");
        assert_eq!(id, CameraId::new(5));
    }

    #[test]
    fn camera_id_rejects_negative_on_deserialize() {
        let result: Result<CameraId, _> = serde_json::from_str("-1");
        assert!(result.is_err());
    }

    #[test]
    fn camera_id_hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(CameraId::new(1));
        set.insert(CameraId::new(2));
        set.insert(CameraId::new(1)); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&CameraId::new(1)));
    }

    #[test]
    fn subscriber_id_uniqueness() {
        let a = SubscriberId::new();
        let b = SubscriberId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn subscriber_id_display() {
        let id = SubscriberId::new();
        let display = format!("{id}");
        assert!(display.starts_with("sub:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn subscriber_id_uuid() {
        let id = SubscriberId::new();
        assert_eq!(id.uuid(), id.0);
    }
}
