//! Unified error interface for CamRelay.
//!
//! This module provides the [`ErrorCode`] trait for standardized
//! error handling across the CamRelay crates.
//!
//! # Design
//!
//! All CamRelay error types implement [`ErrorCode`] to provide:
//!
//! - **Machine-readable codes**: For programmatic error handling
//! - **Recoverability info**: For retry logic and user feedback
//!
//! # Example
//!
//! ```
//! use camrelay_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum DecodeError {
//!     UnknownKind(String),
//!     Incomplete,
//! }
//!
//! impl ErrorCode for DecodeError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::UnknownKind(_) => "DECODE_UNKNOWN_KIND",
//!             Self::Incomplete => "DECODE_INCOMPLETE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Incomplete)
//!     }
//! }
//!
//! let err = DecodeError::Incomplete;
//! assert_eq!(err.code(), "DECODE_INCOMPLETE");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for CamRelay errors.
///
/// Implement this trait for all error types to enable:
///
/// - Consistent error code format across crates
/// - Unified error handling at the router boundary
/// - Standardized logging and monitoring
///
/// # Code Format
///
/// Error codes should be:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"STREAM_CLOSED"`, `"UNKNOWN_KIND"`
/// - **Namespace-prefixed for specificity**: e.g., `"EVENT_UNKNOWN_KIND"`,
///   `"ROUTER_SESSION_NOT_FOUND"`
/// - **Stable**: Codes should not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable if:
///
/// - Retrying the operation may succeed
/// - The caller can take action to fix it without a code change
/// - It's a transient condition (a lagged stream, an empty queue)
///
/// Non-recoverable errors:
///
/// - Malformed inbound records (won't change on retry; fix the producer)
/// - Operations on retired sessions (retirement is final)
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    ///
    /// # Format
    ///
    /// - UPPER_SNAKE_CASE
    /// - Prefixed with the layer (e.g., `"EVENT_"`, `"ROUTER_"`)
    /// - Stable across versions (breaking change if modified)
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// # Returns
    ///
    /// - `true`: Retry may succeed, or the caller can take corrective action
    /// - `false`: Retry will not help, requires code/config change
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows CamRelay conventions.
///
/// # Checks
///
/// 1. Code is UPPER_SNAKE_CASE
/// 2. Code starts with expected prefix
/// 3. Code is not empty
///
/// # Panics
///
/// Panics with descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use camrelay_types::{ErrorCode, assert_error_code};
///
/// #[derive(Debug)]
/// enum MyError { Lagged }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str { "MY_LAGGED" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// let err = MyError::Lagged;
/// assert_error_code(&err, "MY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code {code:?} must start with prefix {expected_prefix:?}"
    );
    assert!(
        is_upper_snake_case(code),
        "error code {code:?} must be UPPER_SNAKE_CASE"
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
///
/// # Example
///
/// ```
/// use camrelay_types::{ErrorCode, assert_error_codes};
///
/// #[derive(Debug)]
/// enum MyError { A, B }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "MY_A",
///             Self::B => "MY_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[MyError::A, MyError::B], "MY_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
///
/// Underscores must separate non-empty runs of uppercase letters and
/// digits; leading, trailing, and doubled underscores are rejected.
fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && s.split('_').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
}
