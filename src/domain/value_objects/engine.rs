//! # Pricing Engine
//!
//! The upstream engines that produce trades and PFE results.
//!
//! Both engines publish the same shape of data in separate tables and
//! separate identifier spaces. Everything engine-specific that is visible
//! to API consumers hangs off [`Engine`]; storage bindings live with the
//! repositories.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An upstream pricing engine.
///
/// # Examples
///
/// ```
/// use pfe_dashboard::domain::value_objects::Engine;
///
/// let engine: Engine = "QUIC".parse().unwrap();
/// assert_eq!(engine, Engine::Quic);
/// assert_eq!(engine.external_id_key(), "QUICID");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// The F22 engine, whose trades carry an ACADIA registry id.
    F22,
    /// The QUIC engine.
    Quic,
}

impl Engine {
    /// All known engines.
    pub const ALL: [Self; 2] = [Self::F22, Self::Quic];

    /// Lowercase name used in URL paths.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::F22 => "f22",
            Self::Quic => "quic",
        }
    }

    /// Display label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::F22 => "F22",
            Self::Quic => "QUIC",
        }
    }

    /// JSON key under which the trade's external registry id is exposed.
    #[must_use]
    pub const fn external_id_key(self) -> &'static str {
        match self {
            Self::F22 => "ACADIAID",
            Self::Quic => "QUICID",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Engine {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f22" => Ok(Self::F22),
            "quic" => Ok(Self::Quic),
            _ => Err(DomainError::UnknownEngine(s.to_string())),
        }
    }
}
