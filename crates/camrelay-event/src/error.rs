//! Event layer errors.
//!
//! This module defines error types for the inbound event boundary,
//! implementing the [`ErrorCode`] trait for unified error handling
//! across the CamRelay workspace.
//!
//! # Error Code Convention
//!
//! All event errors use the `EVENT_` prefix for their codes:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`EventError::UnknownKind`] | `EVENT_UNKNOWN_KIND` | No |
//! | [`EventError::MissingField`] | `EVENT_MISSING_FIELD` | No |
//! | [`EventError::InvalidField`] | `EVENT_INVALID_FIELD` | No |
//! | [`EventError::Malformed`] | `EVENT_MALFORMED` | No |
//!
//! # Recoverability
//!
//! None of these are recoverable. A malformed inbound record is a
//! contract violation by the capability backend: the same record will
//! fail the same way on every retry. The fix is in the producer, which
//! is exactly why the decoder fails loudly instead of dropping the
//! record on the floor.
//!
//! # Usage
//!
//! ```
//! use camrelay_event::EventError;
//! use camrelay_types::ErrorCode;
//!
//! let err = EventError::UnknownKind("focus_changed".into());
//!
//! // Machine-readable code for programmatic handling
//! assert_eq!(err.code(), "EVENT_UNKNOWN_KIND");
//!
//! // Contract violations are never retried
//! assert!(!err.is_recoverable());
//! ```

use camrelay_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event layer error.
///
/// Represents a contract violation at the inbound boundary: the
/// capability backend handed the router a record it cannot route.
/// Implements [`ErrorCode`] for standardized error handling.
///
/// # Example
///
/// ```
/// use camrelay_event::EventError;
/// use camrelay_types::ErrorCode;
///
/// fn handle_error(err: &EventError) {
///     match err.code() {
///         "EVENT_UNKNOWN_KIND" => eprintln!("backend sent a kind we don't speak"),
///         "EVENT_MISSING_FIELD" => eprintln!("backend sent a truncated record"),
///         _ => eprintln!("other decode failure: {err}"),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EventError {
    /// The record's `kind` discriminant is not one the router speaks.
    ///
    /// The set of kinds is closed (`resolution_changed`,
    /// `camera_closing`, `error`). An unknown kind means the backend
    /// and the router disagree about the protocol version; silently
    /// dropping it would hide that disagreement.
    #[error("unknown event kind: {0:?}")]
    UnknownKind(String),

    /// A field required by the record's kind is absent.
    #[error("missing field {0:?} in event record")]
    MissingField(String),

    /// A field is present but its value is unusable.
    ///
    /// Covers wrong JSON types, out-of-range camera ids, and zero
    /// pixel dimensions.
    #[error("invalid field {field:?}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The record is not even an object.
    #[error("malformed event record: {0}")]
    Malformed(String),
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownKind(_) => "EVENT_UNKNOWN_KIND",
            Self::MissingField(_) => "EVENT_MISSING_FIELD",
            Self::InvalidField { .. } => "EVENT_INVALID_FIELD",
            Self::Malformed(_) => "EVENT_MALFORMED",
        }
    }

    fn is_recoverable(&self) -> bool {
        // All decode errors are producer bugs; retry cannot help
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camrelay_types::assert_error_codes;

    /// All variants for exhaustive testing
    fn all_variants() -> Vec<EventError> {
        vec![
            EventError::UnknownKind("x".into()),
            EventError::MissingField("x".into()),
            EventError::InvalidField {
                field: "x".into(),
                reason: "y".into(),
            },
            EventError::Malformed("x".into()),
        ]
    }

    #[test]
    fn all_error_codes_valid() {
        // This test ensures ALL variants have correct prefix and format
        assert_error_codes(&all_variants(), "EVENT_");
    }

    #[test]
    fn unknown_kind_error() {
        let err = EventError::UnknownKind("focus_changed".into());
        assert_eq!(err.code(), "EVENT_UNKNOWN_KIND");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("focus_changed"));
    }

    #[test]
    fn missing_field_error() {
        let err = EventError::MissingField("cameraId".into());
        assert_eq!(err.code(), "EVENT_MISSING_FIELD");
        assert!(err.to_string().contains("cameraId"));
    }

    #[test]
    fn invalid_field_error() {
        let err = EventError::InvalidField {
            field: "captureWidth".into(),
            reason: "must be positive".into(),
        };
        assert_eq!(err.code(), "EVENT_INVALID_FIELD");
        assert!(err.to_string().contains("captureWidth"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn nothing_is_recoverable() {
        for err in all_variants() {
            assert!(!err.is_recoverable(), "{} should not be recoverable", err);
        }
    }
}
