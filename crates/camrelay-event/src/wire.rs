//! Inbound wire-record decoding.
//!
//! The capability backend reports events as JSON-shaped records:
//!
//! ```text
//! { "cameraId": 1, "kind": "resolution_changed",
//!   "payload": { "captureWidth": 1920, "captureHeight": 1080,
//!                "previewWidth": 1280, "previewHeight": 720 } }
//!
//! { "cameraId": 1, "kind": "camera_closing" }
//!
//! { "cameraId": 1, "kind": "error",
//!   "payload": { "description": "sensor timeout" } }
//! ```
//!
//! [`decode`] turns one record into a [`CameraEvent`] or fails loudly.
//! The decoder trusts nothing: unknown kinds, missing fields, wrong
//! JSON types, out-of-range camera ids, and zero dimensions are all
//! rejected with a specific [`EventError`]. A record the decoder cannot
//! place is a protocol disagreement with the backend, and hiding it by
//! dropping the record would make that disagreement undiagnosable.
//!
//! Unrecognized *extra* fields are ignored; only the discriminant set
//! is closed.

use crate::{CameraEvent, EventError, Resolution};
use camrelay_types::{CameraId, TryNew};
use serde_json::{Map, Value};

/// Wire discriminant strings for event kinds.
pub mod kind {
    /// The session renegotiated its capture/preview dimensions.
    pub const RESOLUTION_CHANGED: &str = "resolution_changed";
    /// The session is shutting down.
    pub const CAMERA_CLOSING: &str = "camera_closing";
    /// The session reported an error.
    pub const ERROR: &str = "error";
}

/// Decodes one inbound wire record into a [`CameraEvent`].
///
/// # Errors
///
/// Returns [`EventError`] if:
/// - the record is not a JSON object ([`EventError::Malformed`])
/// - `cameraId` or a required payload field is absent
///   ([`EventError::MissingField`])
/// - a field has the wrong type, the camera id does not fit a
///   non-negative 32-bit integer, or a dimension is zero
///   ([`EventError::InvalidField`])
/// - `kind` is not one of the known discriminants
///   ([`EventError::UnknownKind`])
///
/// # Example
///
/// ```
/// use camrelay_event::wire;
/// use camrelay_types::CameraId;
/// use serde_json::json;
///
/// let event = wire::decode(&json!({
///     "cameraId": 3,
///     "kind": "error",
///     "payload": { "description": "sensor timeout" },
/// }))
/// .unwrap();
///
/// assert_eq!(event.camera_id, CameraId::new(3));
/// assert!(event.is_error());
///
/// let err = wire::decode(&json!({ "cameraId": 3, "kind": "focus_changed" }));
/// assert!(err.is_err());
/// ```
pub fn decode(record: &Value) -> Result<CameraEvent, EventError> {
    let Some(record) = record.as_object() else {
        return Err(EventError::Malformed(format!(
            "expected an object, got {record}"
        )));
    };

    let camera_id = decode_camera_id(record)?;
    let kind = require_str(record, "kind")?;

    match kind {
        kind::RESOLUTION_CHANGED => {
            let payload = require_payload(record)?;
            let resolution = Resolution::try_new((
                require_u32(payload, "captureWidth")?,
                require_u32(payload, "captureHeight")?,
                require_u32(payload, "previewWidth")?,
                require_u32(payload, "previewHeight")?,
            ))?;
            Ok(CameraEvent::resolution_changed(camera_id, resolution))
        }
        kind::CAMERA_CLOSING => Ok(CameraEvent::closing(camera_id)),
        kind::ERROR => {
            let payload = require_payload(record)?;
            let description = require_str(payload, "description")?;
            Ok(CameraEvent::error(camera_id, description))
        }
        other => Err(EventError::UnknownKind(other.to_string())),
    }
}

fn decode_camera_id(record: &Map<String, Value>) -> Result<CameraId, EventError> {
    let raw = require_u64(record, "cameraId")?;
    let raw = u32::try_from(raw).map_err(|_| EventError::InvalidField {
        field: "cameraId".to_string(),
        reason: format!("{raw} does not fit a 32-bit camera id"),
    })?;
    Ok(CameraId::new(raw))
}

fn require_payload<'a>(
    record: &'a Map<String, Value>,
) -> Result<&'a Map<String, Value>, EventError> {
    match record.get("payload") {
        Some(Value::Object(payload)) => Ok(payload),
        Some(other) => Err(EventError::InvalidField {
            field: "payload".to_string(),
            reason: format!("expected an object, got {other}"),
        }),
        None => Err(EventError::MissingField("payload".to_string())),
    }
}

fn require_u64(obj: &Map<String, Value>, field: &str) -> Result<u64, EventError> {
    let value = obj
        .get(field)
        .ok_or_else(|| EventError::MissingField(field.to_string()))?;
    value.as_u64().ok_or_else(|| EventError::InvalidField {
        field: field.to_string(),
        reason: format!("expected a non-negative integer, got {value}"),
    })
}

fn require_u32(obj: &Map<String, Value>, field: &str) -> Result<u32, EventError> {
    let raw = require_u64(obj, field)?;
    u32::try_from(raw).map_err(|_| EventError::InvalidField {
        field: field.to_string(),
        reason: format!("{raw} does not fit a 32-bit value"),
    })
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, EventError> {
    let value = obj
        .get(field)
        .ok_or_else(|| EventError::MissingField(field.to_string()))?;
    value.as_str().ok_or_else(|| EventError::InvalidField {
        field: field.to_string(),
        reason: format!("expected a string, got {value}"),
    })
}
