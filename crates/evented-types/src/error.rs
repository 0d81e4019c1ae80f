//! Unified error-code interface.
//!
//! Every error type in this workspace implements [`ErrorCode`] so that
//! callers can branch on a stable machine-readable code instead of
//! matching display strings, and so retry logic can ask whether a
//! failure is worth retrying at all.
//!
//! # Code format
//!
//! - **UPPER_SNAKE_CASE**: e.g. `"EVENT_HANDLER_FAILED"`
//! - **Domain-prefixed**: the channel crate uses the `EVENT_` prefix
//! - **Stable**: a code is an API contract; changing one is breaking
//!
//! # Example
//!
//! ```
//! use evented_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum DispatchError {
//!     Busy,
//!     Rejected,
//! }
//!
//! impl ErrorCode for DispatchError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Busy => "DISPATCH_BUSY",
//!             Self::Rejected => "DISPATCH_REJECTED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(DispatchError::Busy.code(), "DISPATCH_BUSY");
//! assert!(DispatchError::Busy.is_recoverable());
//! ```

/// Machine-readable error code interface.
///
/// # Recoverability
///
/// An error is recoverable if retrying the same operation may succeed:
/// transient conditions, contention, timeouts. It is not recoverable
/// when the inputs themselves are wrong and a retry would replay the
/// same failure.
pub trait ErrorCode {
    /// Returns the stable machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns whether retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows workspace conventions.
///
/// Checks that the code is non-empty, carries the expected prefix, and
/// is UPPER_SNAKE_CASE.
///
/// # Panics
///
/// Panics with a descriptive message if any check fails. Intended for
/// use in tests.
///
/// # Example
///
/// ```
/// use evented_types::{ErrorCode, assert_error_code};
///
/// #[derive(Debug)]
/// struct Full;
///
/// impl ErrorCode for Full {
///     fn code(&self) -> &'static str { "QUEUE_FULL" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Full, "QUEUE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every variant of an error enum at once.
///
/// # Example
///
/// ```
/// use evented_types::{ErrorCode, assert_error_codes};
///
/// #[derive(Debug)]
/// enum E { A, B }
///
/// impl ErrorCode for E {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "X_A",
///             Self::B => "X_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[E::A, E::B], "X_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
