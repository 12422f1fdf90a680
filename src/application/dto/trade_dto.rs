//! # Trade DTOs
//!
//! JSON views of FX forward trades.
//!
//! The key set depends on the engine (`ACADIAID` vs `QUICID`), so the
//! serializers are written by hand against [`SerializeMap`] rather than
//! derived. Integer identifiers and the buy notional are emitted as decimal
//! strings; dates as `YYYY-MM-DDT00:00:00.000Z`.

use crate::domain::entities::{FxForwardTrade, PfeSnapshot};
use crate::domain::value_objects::{Engine, SnapshotHorizon};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of trade columns, external id included.
const TRADE_KEYS: usize = 12;
const PFE_KEYS: usize = 6;

#[derive(serde::Serialize)]
struct Number(#[serde(with = "rust_decimal::serde::float_option")] Option<Decimal>);

fn iso_midnight(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%dT00:00:00.000Z").to_string())
}

fn serialize_trade_fields<M: SerializeMap>(
    map: &mut M,
    engine: Engine,
    trade: &FxForwardTrade,
) -> Result<(), M::Error> {
    map.serialize_entry("TransactionID", &trade.transaction_id)?;
    map.serialize_entry(engine.external_id_key(), &trade.external_id)?;
    map.serialize_entry("TradingDate", &iso_midnight(trade.trading_date))?;
    map.serialize_entry("MaturityDate", &iso_midnight(trade.maturity_date))?;
    map.serialize_entry("BuyCurrency", &trade.buy_currency)?;
    map.serialize_entry("SellCurrency", &trade.sell_currency)?;
    map.serialize_entry("SpotRate", &Number(trade.spot_rate))?;
    map.serialize_entry("ForwardRate", &Number(trade.forward_rate))?;
    map.serialize_entry("BuyNotional", &trade.buy_notional.map(|n| n.to_string()))?;
    map.serialize_entry("SellNotional", &Number(trade.sell_notional))?;
    map.serialize_entry("CounterpartyID", &trade.counterparty_id)?;
    map.serialize_entry("CollateralFactor", &Number(trade.collateral_factor))
}

/// A trade as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxForwardTradeDto {
    engine: Engine,
    trade: FxForwardTrade,
}

impl FxForwardTradeDto {
    /// Wraps a trade for output under an engine's key names.
    #[must_use]
    pub fn new(engine: Engine, trade: FxForwardTrade) -> Self {
        Self { engine, trade }
    }

    /// Returns the wrapped trade.
    #[must_use]
    pub fn trade(&self) -> &FxForwardTrade {
        &self.trade
    }
}

impl Serialize for FxForwardTradeDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRADE_KEYS))?;
        serialize_trade_fields(&mut map, self.engine, &self.trade)?;
        map.end()
    }
}

/// A trade with its PFE at the 5, 15 and 30-day horizons.
///
/// Horizons without a sample serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeWithPfeDto {
    engine: Engine,
    trade: FxForwardTrade,
    pfe: PfeSnapshot,
}

impl TradeWithPfeDto {
    /// Joins a trade with its snapshot.
    #[must_use]
    pub fn new(engine: Engine, trade: FxForwardTrade, pfe: PfeSnapshot) -> Self {
        Self { engine, trade, pfe }
    }

    /// Returns the wrapped trade.
    #[must_use]
    pub fn trade(&self) -> &FxForwardTrade {
        &self.trade
    }

    /// Returns the attached PFE values.
    #[must_use]
    pub fn pfe(&self) -> &PfeSnapshot {
        &self.pfe
    }
}

impl Serialize for TradeWithPfeDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRADE_KEYS + PFE_KEYS))?;
        serialize_trade_fields(&mut map, self.engine, &self.trade)?;

        for horizon in SnapshotHorizon::ALL {
            let (uncollateralized, _) = self.pfe.at(horizon);
            map.serialize_entry(
                &format!("UncollatPFE_{}", horizon.horizon()),
                &Number(uncollateralized),
            )?;
        }
        for horizon in SnapshotHorizon::ALL {
            let (_, collateralized) = self.pfe.at(horizon);
            map.serialize_entry(
                &format!("CollatPFE_{}", horizon.horizon()),
                &Number(collateralized),
            )?;
        }
        map.end()
    }
}
