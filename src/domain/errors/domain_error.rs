//! # Domain Errors
//!
//! Typed domain error definitions.
//!
//! This module provides the [`DomainError`] enum for representing
//! domain-level errors with numeric error codes.
//!
//! # Error Code Ranges
//!
//! - **1000-1999**: Validation errors
//! - **2000-2999**: Lookup errors
//!
//! # Examples
//!
//! ```
//! use pfe_dashboard::domain::errors::DomainError;
//!
//! let error = DomainError::InvalidId("abc".to_string());
//! assert_eq!(error.code(), 1001);
//! ```

use thiserror::Error;

/// Domain-level error with numeric error codes.
///
/// | Range | Category |
/// |-------|----------|
/// | 1000-1999 | Validation errors |
/// | 2000-2999 | Lookup errors |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (1000-1999)
    // ========================================================================
    /// Identifier is not a valid 64-bit integer.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Horizon is outside the accepted range.
    #[error("invalid horizon: {0} days")]
    InvalidHorizon(i32),

    // ========================================================================
    // Lookup Errors (2000-2999)
    // ========================================================================
    /// Engine name does not match any known pricing engine.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),
}

impl DomainError {
    /// Returns the numeric error code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::InvalidId(_) => 1001,
            Self::InvalidHorizon(_) => 1002,
            Self::UnknownEngine(_) => 2001,
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.code(), 1000..=1999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_grouped_by_category() {
        assert_eq!(DomainError::InvalidId("x".to_string()).code(), 1001);
        assert_eq!(DomainError::InvalidHorizon(-1).code(), 1002);
        assert_eq!(DomainError::UnknownEngine("foo".to_string()).code(), 2001);
    }

    #[test]
    fn validation_classification() {
        assert!(DomainError::InvalidId("x".to_string()).is_validation());
        assert!(!DomainError::UnknownEngine("foo".to_string()).is_validation());
    }

    #[test]
    fn display_includes_offending_value() {
        let err = DomainError::UnknownEngine("acme".to_string());
        assert_eq!(err.to_string(), "unknown engine: acme");
    }
}
