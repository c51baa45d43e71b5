//! Fallible construction traits for CamRelay types.
//!
//! This module provides the [`TryNew`] trait for types that require
//! validation during construction and may fail.
//!
//! # When to Use Which Pattern
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds (infallible) |
//! | [`TryNew`] | Construction requires validation (fallible) |
//! | `TryFrom<T>` | Converting from another type (fallible) |
//! | `Default` | Sensible default value exists |
//!
//! # Design Rationale
//!
//! Following Rust's naming conventions:
//!
//! - `new()` - Infallible, always returns `Self`
//! - `try_new()` - Fallible, returns `Result<Self, Error>`
//!
//! This mirrors the standard library's `TryFrom`/`TryInto` pattern but
//! for constructors that don't convert from another type. The main user
//! in this workspace is the event layer, where pixel dimensions must be
//! strictly positive.
//!
//! # Example
//!
//! ```
//! use camrelay_types::TryNew;
//!
//! /// A frame dimension in pixels (must be positive).
//! #[derive(Debug)]
//! struct Dimension(u32);
//!
//! #[derive(Debug, PartialEq)]
//! struct ZeroDimensionError;
//!
//! impl TryNew for Dimension {
//!     type Error = ZeroDimensionError;
//!     type Args = u32;
//!
//!     fn try_new(value: u32) -> Result<Self, Self::Error> {
//!         if value == 0 {
//!             return Err(ZeroDimensionError);
//!         }
//!         Ok(Dimension(value))
//!     }
//! }
//!
//! assert!(Dimension::try_new(1080).is_ok());
//! assert_eq!(Dimension::try_new(0).unwrap_err(), ZeroDimensionError);
//! ```

/// Trait for fallible construction with validation.
///
/// Implement this trait when:
///
/// - Construction requires validation that may fail
/// - You are NOT converting from another type (use `TryFrom` instead)
/// - A plain `new()` cannot guarantee success
///
/// # Naming Convention
///
/// Types implementing `TryNew` should NOT have a plain `new()` method
/// that performs the same validation. The `try_` prefix makes fallibility
/// explicit at the call site.
///
/// # Associated Types
///
/// - `Error`: The error type returned when validation fails
/// - `Args`: The arguments required for construction (can be a tuple)
///
/// # Implementation Guidelines
///
/// 1. **Document invariants**: Explain what validation is performed
/// 2. **Use specific errors**: Return meaningful error types, not `String`
/// 3. **Keep validation pure**: Don't perform side effects in `try_new`
pub trait TryNew {
    /// The error type returned when construction fails.
    ///
    /// Should be a specific error type that describes why validation failed.
    type Error;

    /// Arguments required for construction.
    ///
    /// Can be:
    /// - A single value: `type Args = u32;`
    /// - A tuple: `type Args = (u32, u32);`
    /// - A config struct: `type Args = MyConfig;`
    type Args;

    /// Attempts to create a new instance.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if validation fails. The error should
    /// contain enough information to understand why construction failed.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct AspectRatio {
        width: u32,
        height: u32,
    }

    #[derive(Debug, PartialEq)]
    struct DegenerateRatioError;

    impl TryNew for AspectRatio {
        type Error = DegenerateRatioError;
        type Args = (u32, u32);

        fn try_new((width, height): (u32, u32)) -> Result<Self, Self::Error> {
            if width == 0 || height == 0 {
                return Err(DegenerateRatioError);
            }
            Ok(AspectRatio { width, height })
        }
    }

    #[test]
    fn try_new_valid() {
        let ratio = AspectRatio::try_new((16, 9)).expect("16:9 is a valid ratio");
        assert_eq!(ratio.width, 16);
        assert_eq!(ratio.height, 9);
    }

    #[test]
    fn try_new_zero_width() {
        assert_eq!(
            AspectRatio::try_new((0, 9)).unwrap_err(),
            DegenerateRatioError
        );
    }

    #[test]
    fn try_new_zero_height() {
        assert_eq!(
            AspectRatio::try_new((16, 0)).unwrap_err(),
            DegenerateRatioError
        );
    }
}
