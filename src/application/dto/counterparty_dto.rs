//! # Counterparty DTOs
//!
//! Selector tree of counterparties and their transactions.

use crate::domain::entities::Counterparty;
use crate::domain::value_objects::{CounterpartyId, TransactionId};
use serde::Serialize;

/// A transaction entry under a counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRefDto {
    /// Transaction id, as a string.
    pub id: TransactionId,
    /// Display label.
    pub name: String,
}

/// A counterparty with its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterpartyDto {
    /// Counterparty id, as a string.
    pub id: CounterpartyId,
    /// Display label.
    pub name: String,
    /// Transactions booked against the counterparty.
    pub transactions: Vec<TransactionRefDto>,
}

impl From<&Counterparty> for CounterpartyDto {
    fn from(counterparty: &Counterparty) -> Self {
        Self {
            id: counterparty.id(),
            name: counterparty.name(),
            transactions: counterparty
                .transactions()
                .iter()
                .map(|&id| TransactionRefDto {
                    id,
                    name: format!("Transaction {id}"),
                })
                .collect(),
        }
    }
}
