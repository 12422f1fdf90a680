//! # Authentication
//!
//! JWT session resolution for API endpoints.
//!
//! Handlers never validate tokens themselves. They collect the request's
//! [`Credentials`] and the use cases resolve them through a
//! [`SessionProvider`]; [`JwtSessionProvider`] is the production one.
//!
//! # Token Sources
//!
//! 1. `Authorization: Bearer <token>`
//! 2. The session cookie (default name `session_token`)
//!
//! # Token Structure
//!
//! Tokens are HS256 JWTs with the following claims:
//! - `sub` - Subject (user ID)
//! - `iss` - Issuer (checked when configured)
//! - `aud` - Audience (checked when configured, ignored otherwise)
//! - `exp` - Expiration time
//! - `iat` - Issued at time

use crate::application::session::{Credentials, Session, SessionProvider};
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use thiserror::Error;
use tracing::debug;

/// Default name of the session cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "session_token";

// ============================================================================
// Configuration
// ============================================================================

/// Authentication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret key for HMAC-based JWT validation.
    pub secret: String,
    /// Expected issuer claim.
    pub issuer: Option<String>,
    /// Expected audience claim.
    pub audience: Option<String>,
    /// Name of the cookie carrying the session token.
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl AuthConfig {
    /// Creates a new auth config with the given secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: None,
            audience: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    /// Sets the expected issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Sets the expected audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Sets the session cookie name.
    #[must_use]
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }
}

// ============================================================================
// JWT Claims
// ============================================================================

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
    /// Issued at time (Unix timestamp).
    pub iat: u64,
}

impl Claims {
    /// Creates new claims for a subject.
    #[must_use]
    pub fn new(sub: impl Into<String>, exp: u64, iat: u64) -> Self {
        Self {
            sub: sub.into(),
            iss: None,
            aud: None,
            exp,
            iat,
        }
    }

    /// Sets the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = Some(issuer.into());
        self
    }

    /// Sets the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = Some(audience.into());
        self
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Session::new(claims.sub, claims.exp)
    }
}

// ============================================================================
// Authentication Error
// ============================================================================

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Missing authentication credentials.
    #[error("missing authentication credentials")]
    MissingCredentials,

    /// Invalid token format.
    #[error("invalid token format")]
    InvalidTokenFormat,

    /// Token validation failed.
    #[error("token validation failed: {0}")]
    ValidationFailed(String),

    /// Token expired.
    #[error("token expired")]
    TokenExpired,
}

// ============================================================================
// Token Extraction
// ============================================================================

/// Extracts the bearer token from an Authorization header value.
#[must_use]
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extracts a named cookie from a Cookie header value.
#[must_use]
pub fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
}

/// Picks the session token out of request credentials.
///
/// A bearer token wins over the session cookie.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredentials`] if neither source is present
/// and [`AuthError::InvalidTokenFormat`] if they are present but carry no
/// usable token.
pub fn token_from_credentials<'a>(
    credentials: &'a Credentials,
    cookie_name: &str,
) -> Result<&'a str, AuthError> {
    if credentials.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    credentials
        .authorization
        .as_deref()
        .and_then(extract_bearer_token)
        .or_else(|| {
            credentials
                .cookie
                .as_deref()
                .and_then(|c| extract_cookie(c, cookie_name))
        })
        .ok_or(AuthError::InvalidTokenFormat)
}

// ============================================================================
// JWT Utilities
// ============================================================================

/// Validates a JWT token and returns the claims.
///
/// # Errors
///
/// Returns an error if the token is invalid or validation fails.
pub fn validate_jwt(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();

    if let Some(ref issuer) = config.issuer {
        validation.set_issuer(&[issuer]);
    }

    match config.audience {
        Some(ref audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let key = DecodingKey::from_secret(config.secret.as_bytes());

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::ValidationFailed(e.to_string()),
        })
}

/// Creates a JWT token from claims.
///
/// # Errors
///
/// Returns an error if token encoding fails.
pub fn create_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &key).map_err(|e| AuthError::ValidationFailed(e.to_string()))
}

// ============================================================================
// Session Provider
// ============================================================================

/// Resolves sessions from HS256 JWTs.
#[derive(Debug, Clone)]
pub struct JwtSessionProvider {
    config: AuthConfig,
}

impl JwtSessionProvider {
    /// Creates a provider validating against `config`.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Returns the auth configuration.
    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validates the credentials and returns the token's claims.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if no token is present or it does not
    /// validate.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Claims, AuthError> {
        let token = token_from_credentials(credentials, &self.config.session_cookie)?;
        validate_jwt(token, &self.config)
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn resolve(&self, credentials: &Credentials) -> Option<Session> {
        match self.authenticate(credentials) {
            Ok(claims) => Some(claims.into()),
            Err(e) => {
                debug!(error = %e, "session rejected");
                None
            }
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Credentials::from_headers(&parts.headers))
    }
}
