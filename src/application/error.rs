//! # Application Errors
//!
//! Error types for the application layer.
//!
//! The taxonomy is deliberately small: a missing session, a malformed
//! request, an empty result where the caller asked for strictness, and
//! anything that went wrong below the use case.

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::traits::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// No valid session accompanies the request.
    #[error("unauthenticated")]
    Unauthenticated,

    /// A required parameter is missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The query matched nothing and the caller treats that as an error.
    #[error("{0}")]
    NotFound(String),

    /// Storage failed.
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),
}

impl ApplicationError {
    /// Creates a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an upstream failure.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamFailure(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::UpstreamFailure(err.to_string())
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        if err.is_validation() {
            Self::BadRequest(err.to_string())
        } else {
            Self::NotFound(err.to_string())
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
