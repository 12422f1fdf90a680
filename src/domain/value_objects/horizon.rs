//! # Exposure Horizons
//!
//! Days-forward windows for which a PFE sample applies.
//!
//! [`Horizon`] is any non-negative day count found in the results tables.
//! [`SnapshotHorizon`] is the fixed subset {5, 15, 30} used when PFE values
//! are attached to trade rows as columns.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A days-forward horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub struct Horizon(i32);

impl Horizon {
    /// Creates a horizon from a day count.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidHorizon`] for negative values.
    pub fn new(days: i32) -> Result<Self, DomainError> {
        if days < 0 {
            return Err(DomainError::InvalidHorizon(days));
        }
        Ok(Self(days))
    }

    /// Returns the day count.
    #[inline]
    #[must_use]
    pub const fn days(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Horizon {
    type Error = DomainError;

    fn try_from(days: i32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<Horizon> for i32 {
    fn from(horizon: Horizon) -> Self {
        horizon.0
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.0)
    }
}

/// The fixed horizons reported alongside each trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapshotHorizon {
    /// 5 days forward.
    Days5,
    /// 15 days forward.
    Days15,
    /// 30 days forward.
    Days30,
}

impl SnapshotHorizon {
    /// All snapshot horizons, in ascending order.
    pub const ALL: [Self; 3] = [Self::Days5, Self::Days15, Self::Days30];

    /// Returns the day count.
    #[must_use]
    pub const fn days(self) -> i32 {
        match self {
            Self::Days5 => 5,
            Self::Days15 => 15,
            Self::Days30 => 30,
        }
    }

    /// Maps a day count onto a snapshot horizon, if it is one.
    #[must_use]
    pub const fn from_days(days: i32) -> Option<Self> {
        match days {
            5 => Some(Self::Days5),
            15 => Some(Self::Days15),
            30 => Some(Self::Days30),
            _ => None,
        }
    }

    /// Returns the snapshot horizon as a general [`Horizon`].
    #[must_use]
    pub const fn horizon(self) -> Horizon {
        Horizon(self.days())
    }

    /// The snapshot horizons as plain [`Horizon`] values, for query filters.
    #[must_use]
    pub fn horizons() -> [Horizon; 3] {
        Self::ALL.map(Self::horizon)
    }
}

impl From<SnapshotHorizon> for Horizon {
    fn from(value: SnapshotHorizon) -> Self {
        value.horizon()
    }
}
