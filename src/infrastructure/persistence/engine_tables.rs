//! # Engine Table Bindings
//!
//! Maps each [`Engine`] to the tables and columns holding its data.

use crate::domain::value_objects::Engine;

/// Storage descriptor for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTables {
    /// Table of FX forward trades.
    pub trades: &'static str,
    /// Table of PFE results.
    pub pfe_results: &'static str,
    /// Column of the trades table holding the external registry id.
    pub external_id_column: &'static str,
}

impl EngineTables {
    const F22: Self = Self {
        trades: "f22_fx_trades",
        pfe_results: "f22_pfe_results",
        external_id_column: "ACADIAID",
    };

    const QUIC: Self = Self {
        trades: "quic_fx_trades",
        pfe_results: "quic_pfe_results",
        external_id_column: "QUICID",
    };

    /// Returns the bindings of an engine.
    #[must_use]
    pub const fn for_engine(engine: Engine) -> Self {
        match engine {
            Engine::F22 => Self::F22,
            Engine::Quic => Self::QUIC,
        }
    }
}
