//! # Sessions
//!
//! Caller identity as seen by the use cases.
//!
//! The use cases never parse tokens themselves. They hand the raw
//! [`Credentials`] of a request to a [`SessionProvider`] and refuse to touch
//! storage unless a [`Session`] comes back.

use crate::application::error::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE, HeaderName};
use std::fmt;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable user identifier.
    pub subject: String,
    /// Expiry as a Unix timestamp in seconds.
    pub expires_at: u64,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(subject: impl Into<String>, expires_at: u64) -> Self {
        Self {
            subject: subject.into(),
            expires_at,
        }
    }
}

/// Raw credential material carried by a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Value of the `Authorization` header.
    pub authorization: Option<String>,
    /// Value of the `Cookie` header.
    pub cookie: Option<String>,
}

impl Credentials {
    /// Credentials with nothing in them.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credentials carrying a bearer token.
    #[must_use]
    pub fn bearer(token: impl fmt::Display) -> Self {
        Self {
            authorization: Some(format!("Bearer {token}")),
            cookie: None,
        }
    }

    /// Collects credentials from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            authorization: header(AUTHORIZATION),
            cookie: header(COOKIE),
        }
    }

    /// Returns true if neither header is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authorization.is_none() && self.cookie.is_none()
    }
}

/// Resolves request credentials to a session.
#[async_trait]
pub trait SessionProvider: Send + Sync + fmt::Debug {
    /// Returns the caller's session, or `None` if the credentials are
    /// missing, malformed or expired.
    async fn resolve(&self, credentials: &Credentials) -> Option<Session>;
}

/// Resolves a session or fails with [`ApplicationError::Unauthenticated`].
///
/// # Errors
///
/// Returns [`ApplicationError::Unauthenticated`] when the provider yields no
/// session.
pub async fn require_session(
    provider: &dyn SessionProvider,
    credentials: &Credentials,
) -> ApplicationResult<Session> {
    provider
        .resolve(credentials)
        .await
        .ok_or(ApplicationError::Unauthenticated)
}
