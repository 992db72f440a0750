//! Error types for the low-level time-keeping primitives.
//!
//! This module provides a unified error type [`AstroError`] for the failure
//! modes of the building blocks in this crate: fixed-point arithmetic
//! failures and operations that are not modelled.
//!
//! # Error Categories
//!
//! | Variant | Use Case |
//! |---------|----------|
//! | [`MathError`](AstroError::MathError) | Overflow, zero divisor, bad scalar, non-finite input |
//! | [`Unsupported`](AstroError::Unsupported) | Paths that are deliberately not implemented |
//!
//! None of the variants are transient: the computations are pure, so retrying
//! reproduces the same error.
//!
//! # Usage
//!
//! Most functions return [`AstroResult<T>`], which is `Result<T, AstroError>`.
//! Use the constructor methods for consistent error creation:
//!
//! ```
//! use celestial_core::{AstroError, MathErrorKind};
//!
//! fn checked_scale(seconds: i64, factor: i64) -> Result<i64, AstroError> {
//!     seconds.checked_mul(factor).ok_or_else(|| {
//!         AstroError::math_error("checked_scale", MathErrorKind::Overflow, "product too large")
//!     })
//! }
//! assert!(checked_scale(i64::MAX, 2).is_err());
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
///
/// Used with [`AstroError::MathError`] to distinguish between different
/// numerical failure modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Result exceeds the range of the seconds field.
    Overflow,
    /// Division by zero.
    DivisionByZero,
    /// Input value is invalid for the operation (negative scalar, bad fraction).
    InvalidInput,
    /// Input is NaN or infinity.
    NotFinite,
}

/// Unified error type for the time-keeping primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    /// Numerical computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// Operation that exists in the API but is not modelled.
    #[error("Unsupported operation {operation}: {message}")]
    Unsupported { operation: String, message: String },
}

/// Convenience alias for `Result<T, AstroError>`.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    /// Shorthand for a [`MathErrorKind::Overflow`] math error.
    pub fn overflow(operation: &str, reason: &str) -> Self {
        Self::math_error(operation, MathErrorKind::Overflow, reason)
    }

    /// Creates an [`Unsupported`](Self::Unsupported) error.
    pub fn unsupported(operation: &str, reason: &str) -> Self {
        Self::Unsupported {
            operation: operation.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns `true` for errors caused by a result that does not fit the
    /// fixed-point representation.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self,
            Self::MathError {
                kind: MathErrorKind::Overflow,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_with_kind() {
        let err = AstroError::math_error(
            "FixedDuration::multiply",
            MathErrorKind::Overflow,
            "value too large",
        );
        assert!(err.to_string().contains("Math error"));
        assert!(err.to_string().contains("Overflow"));
        assert!(err.is_overflow());
    }

    #[test]
    fn test_unsupported_error() {
        let err = AstroError::unsupported("TDB inverse", "not modelled");
        assert!(err.to_string().contains("Unsupported operation TDB inverse"));
        assert!(!err.is_overflow());
    }

    #[test]
    fn test_invalid_input_is_not_overflow() {
        let err = AstroError::math_error("divide", MathErrorKind::InvalidInput, "negative divisor");
        assert!(!err.is_overflow());
        let err = AstroError::math_error("divide", MathErrorKind::DivisionByZero, "zero divisor");
        assert!(!err.is_overflow());
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<AstroError>();
        _assert_sync::<AstroError>();
    }
}
