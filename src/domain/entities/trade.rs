//! # FX Forward Trade
//!
//! A foreign-exchange forward contract as recorded by a pricing engine.
//!
//! Trades are captured by an external process and never change once
//! recorded. This service only reads them, so the entity is a plain
//! record; most columns are nullable in the source tables and stay
//! optional here.
//!
//! # Examples
//!
//! ```
//! use pfe_dashboard::domain::entities::trade::FxForwardTrade;
//! use pfe_dashboard::domain::value_objects::{CounterpartyId, TransactionId};
//!
//! let trade = FxForwardTrade::new(TransactionId::new(1001))
//!     .with_counterparty(CounterpartyId::new(77))
//!     .with_currencies("EUR", "USD");
//!
//! assert_eq!(trade.currency_pair().as_deref(), Some("EUR/USD"));
//! ```

use crate::domain::value_objects::{CounterpartyId, ExternalId, TransactionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// An FX forward trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxForwardTrade {
    /// Transaction identifier, unique within the engine.
    pub transaction_id: TransactionId,
    /// External registry identifier.
    pub external_id: Option<ExternalId>,
    /// Trade date.
    pub trading_date: Option<NaiveDate>,
    /// Maturity date.
    pub maturity_date: Option<NaiveDate>,
    /// Bought currency (ISO 4217).
    pub buy_currency: Option<String>,
    /// Sold currency (ISO 4217).
    pub sell_currency: Option<String>,
    /// Spot rate on the trade date.
    pub spot_rate: Option<Decimal>,
    /// Agreed forward rate.
    pub forward_rate: Option<Decimal>,
    /// Notional in the bought currency.
    pub buy_notional: Option<i64>,
    /// Notional in the sold currency.
    pub sell_notional: Option<Decimal>,
    /// Counterparty identifier.
    pub counterparty_id: Option<CounterpartyId>,
    /// Collateral posted against the trade.
    pub collateral_factor: Option<Decimal>,
}

impl FxForwardTrade {
    /// Creates a trade with only its identifier set.
    #[must_use]
    pub fn new(transaction_id: TransactionId) -> Self {
        Self {
            transaction_id,
            external_id: None,
            trading_date: None,
            maturity_date: None,
            buy_currency: None,
            sell_currency: None,
            spot_rate: None,
            forward_rate: None,
            buy_notional: None,
            sell_notional: None,
            counterparty_id: None,
            collateral_factor: None,
        }
    }

    /// Sets the counterparty.
    #[must_use]
    pub fn with_counterparty(mut self, counterparty_id: CounterpartyId) -> Self {
        self.counterparty_id = Some(counterparty_id);
        self
    }

    /// Sets the external registry id.
    #[must_use]
    pub fn with_external_id(mut self, external_id: ExternalId) -> Self {
        self.external_id = Some(external_id);
        self
    }

    /// Sets the bought and sold currencies.
    #[must_use]
    pub fn with_currencies(mut self, buy: impl Into<String>, sell: impl Into<String>) -> Self {
        self.buy_currency = Some(buy.into());
        self.sell_currency = Some(sell.into());
        self
    }

    /// Sets trade and maturity dates.
    #[must_use]
    pub fn with_dates(mut self, trading: NaiveDate, maturity: NaiveDate) -> Self {
        self.trading_date = Some(trading);
        self.maturity_date = Some(maturity);
        self
    }

    /// Sets spot and forward rates.
    #[must_use]
    pub fn with_rates(mut self, spot: Decimal, forward: Decimal) -> Self {
        self.spot_rate = Some(spot);
        self.forward_rate = Some(forward);
        self
    }

    /// Sets both notionals.
    #[must_use]
    pub fn with_notionals(mut self, buy: i64, sell: Decimal) -> Self {
        self.buy_notional = Some(buy);
        self.sell_notional = Some(sell);
        self
    }

    /// Sets the collateral factor.
    #[must_use]
    pub fn with_collateral_factor(mut self, factor: Decimal) -> Self {
        self.collateral_factor = Some(factor);
        self
    }

    /// Returns the pair as `BUY/SELL` when both legs are known.
    #[must_use]
    pub fn currency_pair(&self) -> Option<String> {
        match (&self.buy_currency, &self.sell_currency) {
            (Some(buy), Some(sell)) => Some(format!("{buy}/{sell}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trade_has_only_id() {
        let trade = FxForwardTrade::new(TransactionId::new(5));
        assert_eq!(trade.transaction_id.get(), 5);
        assert!(trade.counterparty_id.is_none());
        assert!(trade.currency_pair().is_none());
    }

    #[test]
    fn currency_pair_requires_both_legs() {
        let mut trade = FxForwardTrade::new(TransactionId::new(5));
        trade.buy_currency = Some("GBP".to_string());
        assert!(trade.currency_pair().is_none());
        trade.sell_currency = Some("USD".to_string());
        assert_eq!(trade.currency_pair().as_deref(), Some("GBP/USD"));
    }
}
