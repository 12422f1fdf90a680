//! # Identity Value Objects
//!
//! Type-safe identity wrappers for domain identifiers.
//!
//! Every identifier in the trade and PFE tables is a 64-bit integer. JSON
//! consumers cannot represent integers above 2^53 exactly, so all of these
//! wrappers serialize as decimal strings and accept either a string or a
//! number when deserializing.
//!
//! - [`TransactionId`] - FX forward transaction identifier
//! - [`CounterpartyId`] - Counterparty identifier
//! - [`ExternalId`] - Registry identifier assigned by the engine (ACADIA / QUIC)

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// FX forward transaction identifier.
///
/// Unique within an engine's trade set. Identifier spaces of different
/// engines never overlap in meaning, even when the numbers collide.
///
/// # Examples
///
/// ```
/// use pfe_dashboard::domain::value_objects::ids::TransactionId;
///
/// let id: TransactionId = "9007199254740993".parse().unwrap();
/// assert_eq!(id.get(), 9_007_199_254_740_993);
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"9007199254740993\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(#[serde(with = "int64_string")] i64);

impl TransactionId {
    /// Creates a transaction ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Counterparty identifier.
///
/// Counterparties are not stored on their own; they are derived by grouping
/// trades on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterpartyId(#[serde(with = "int64_string")] i64);

impl CounterpartyId {
    /// Creates a counterparty ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// External registry identifier (the `ACADIAID` column for F22, `QUICID` for QUIC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(#[serde(with = "int64_string")] i64);

impl ExternalId {
    /// Creates an external ID from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

fn parse_i64(s: &str) -> Result<i64, DomainError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidId(s.to_string()))
}

impl FromStr for TransactionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_i64(s).map(Self)
    }
}

impl FromStr for CounterpartyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_i64(s).map(Self)
    }
}

impl FromStr for ExternalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_i64(s).map(Self)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CounterpartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TransactionId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for CounterpartyId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for ExternalId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Serde adapter writing an `i64` as a decimal string and reading it back
/// from either a string or a JSON number.
pub mod int64_string {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Serializes the value as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserializes from a decimal string or an integer.
    ///
    /// # Errors
    ///
    /// Fails on non-numeric strings or out-of-range numbers.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(Int64Visitor)
    }

    struct Int64Visitor;

    impl Visitor<'_> for Int64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a 64-bit integer or its decimal string form")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(format!("{v} out of range for i64")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid integer string: {v}")))
        }
    }
}
