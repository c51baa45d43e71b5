//! Camera event types.
//!
//! Events are modeled as a single closed tagged union: a [`CameraEvent`]
//! carries the originating [`CameraId`] plus an [`EventKind`] holding the
//! per-kind payload. Filtering in the router is a `match` over the
//! discriminant, so adding a kind is a compile-time-checked change
//! rather than a runtime type test.
//!
//! # Event Kinds
//!
//! | Kind | Payload | Replayed to late subscribers |
//! |------|---------|------------------------------|
//! | [`EventKind::ResolutionChanged`] | [`Resolution`] | Yes (size-1 cache) |
//! | [`EventKind::Closing`] | none | No |
//! | [`EventKind::Error`] | [`ErrorDetails`] | No |
//!
//! # Example
//!
//! ```
//! use camrelay_event::{CameraEvent, Resolution};
//! use camrelay_types::{CameraId, TryNew};
//!
//! let cam = CameraId::new(1);
//! let res = Resolution::try_new((1920, 1080, 1280, 720)).unwrap();
//!
//! let event = CameraEvent::resolution_changed(cam, res);
//! assert!(event.is_resolution_changed());
//! assert_eq!(event.camera_id, cam);
//!
//! let closing = CameraEvent::closing(cam);
//! assert_eq!(closing.to_string(), "cam:1 camera_closing");
//! ```

use crate::EventError;
use camrelay_types::{CameraId, TryNew};
use serde::{Deserialize, Serialize};

/// Capture and preview dimensions reported by a camera session.
///
/// All four dimensions are in pixels and strictly positive; construction
/// goes through [`TryNew`] so a zero dimension is rejected at the
/// boundary instead of flowing through the router.
///
/// # Example
///
/// ```
/// use camrelay_event::Resolution;
/// use camrelay_types::TryNew;
///
/// let res = Resolution::try_new((1920, 1080, 1280, 720)).unwrap();
/// assert_eq!(res.capture_width, 1920);
/// assert_eq!(res.to_string(), "capture 1920x1080, preview 1280x720");
///
/// assert!(Resolution::try_new((0, 1080, 1280, 720)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width of the full-size capture stream, in pixels.
    pub capture_width: u32,
    /// Height of the full-size capture stream, in pixels.
    pub capture_height: u32,
    /// Width of the preview stream, in pixels.
    pub preview_width: u32,
    /// Height of the preview stream, in pixels.
    pub preview_height: u32,
}

impl TryNew for Resolution {
    type Error = EventError;
    type Args = (u32, u32, u32, u32);

    /// Validates that all four dimensions are positive.
    ///
    /// Argument order: `(capture_width, capture_height, preview_width,
    /// preview_height)`.
    fn try_new(
        (capture_width, capture_height, preview_width, preview_height): Self::Args,
    ) -> Result<Self, Self::Error> {
        let check = |name: &str, value: u32| {
            if value == 0 {
                Err(EventError::InvalidField {
                    field: name.to_string(),
                    reason: "dimension must be positive".to_string(),
                })
            } else {
                Ok(value)
            }
        };

        Ok(Self {
            capture_width: check("captureWidth", capture_width)?,
            capture_height: check("captureHeight", capture_height)?,
            preview_width: check("previewWidth", preview_width)?,
            preview_height: check("previewHeight", preview_height)?,
        })
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "capture {}x{}, preview {}x{}",
            self.capture_width, self.capture_height, self.preview_width, self.preview_height
        )
    }
}

/// Human-readable description of a camera-session error.
///
/// The text originates in the capability backend (driver messages, OS
/// framework errors) and is passed through verbatim; the router never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Human-readable error text from the capability backend.
    pub description: String,
}

impl ErrorDetails {
    /// Creates error details from a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// The kind of camera event, with per-kind payload.
///
/// This is a closed set: the wire decoder rejects any discriminant not
/// listed here (see [`crate::wire`]), so downstream `match` arms can be
/// exhaustive without a catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The session renegotiated its capture/preview dimensions.
    ///
    /// The router caches the latest payload per camera and replays it
    /// to new subscribers.
    ResolutionChanged(Resolution),

    /// The session is shutting down; no further events will follow
    /// from this camera once the backend retires it.
    Closing,

    /// The session hit an error it wants observers to know about.
    ///
    /// Not necessarily fatal; the session may keep producing events.
    Error(ErrorDetails),
}

impl EventKind {
    /// Returns the wire name of this kind.
    ///
    /// Matches the discriminant strings used in inbound records.
    ///
    /// # Example
    ///
    /// ```
    /// use camrelay_event::EventKind;
    ///
    /// assert_eq!(EventKind::Closing.name(), "camera_closing");
    /// ```
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResolutionChanged(_) => crate::wire::kind::RESOLUTION_CHANGED,
            Self::Closing => crate::wire::kind::CAMERA_CLOSING,
            Self::Error(_) => crate::wire::kind::ERROR,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single event produced by one camera capability session.
///
/// # Example
///
/// ```
/// use camrelay_event::CameraEvent;
/// use camrelay_types::CameraId;
///
/// let event = CameraEvent::error(CameraId::new(2), "sensor timeout");
/// assert!(event.is_error());
/// assert_eq!(event.to_string(), "cam:2 error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraEvent {
    /// Which camera session produced the event.
    pub camera_id: CameraId,
    /// What happened, with the kind-specific payload.
    pub kind: EventKind,
}

impl CameraEvent {
    /// Creates a resolution-changed event.
    #[must_use]
    pub fn resolution_changed(camera_id: CameraId, resolution: Resolution) -> Self {
        Self {
            camera_id,
            kind: EventKind::ResolutionChanged(resolution),
        }
    }

    /// Creates a closing event.
    #[must_use]
    pub fn closing(camera_id: CameraId) -> Self {
        Self {
            camera_id,
            kind: EventKind::Closing,
        }
    }

    /// Creates an error event from a description.
    #[must_use]
    pub fn error(camera_id: CameraId, description: impl Into<String>) -> Self {
        Self {
            camera_id,
            kind: EventKind::Error(ErrorDetails::new(description)),
        }
    }

    /// Returns `true` if this is a resolution-changed event.
    #[must_use]
    pub fn is_resolution_changed(&self) -> bool {
        matches!(self.kind, EventKind::ResolutionChanged(_))
    }

    /// Returns `true` if this is a closing event.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        matches!(self.kind, EventKind::Closing)
    }

    /// Returns `true` if this is an error event.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, EventKind::Error(_))
    }
}

impl std::fmt::Display for CameraEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.camera_id, self.kind)
    }
}
