//! Trade progression records for multi-step settlement.
//!
//! A buy or offer acceptance is three separate ledger calls: pay the seller,
//! transfer the asset, commit the bookkeeping status. The calls are not
//! atomic. Each trade gets a record that pins which steps completed, so a
//! failure mid-sequence leaves a visible, reconcilable trail instead of
//! silently losing track.

use chrono::{DateTime, Utc};
use ledger_core::{Address, TokenId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Steps of one trade, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TradeStep {
    /// Record created, no ledger call issued yet
    Initiated,
    /// Payment transferred buyer → seller
    PaymentSettled,
    /// NFT transferred seller → buyer
    AssetTransferred,
    /// Listing/offer statuses updated; trade complete
    Committed,
}

impl TradeStep {
    pub fn is_complete(self) -> bool {
        matches!(self, TradeStep::Committed)
    }
}

/// Record of a single buy/accept settlement attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub token_id: TokenId,
    pub buyer: Address,
    pub seller: Address,
    pub price: Decimal,
    pub step: TradeStep,
    pub started_at: DateTime<Utc>,
    /// Transaction that moved the payment, once settled
    pub payment_tx: Option<TransactionId>,
    /// Transaction that moved the asset, once transferred
    pub asset_tx: Option<TransactionId>,
}

impl TradeRecord {
    pub(crate) fn new(token_id: TokenId, buyer: Address, seller: Address, price: Decimal) -> Self {
        Self {
            token_id,
            buyer,
            seller,
            price,
            step: TradeStep::Initiated,
            started_at: Utc::now(),
            payment_tx: None,
            asset_tx: None,
        }
    }

    pub(crate) fn advance(&mut self, step: TradeStep) {
        tracing::info!(
            token_id = %self.token_id,
            buyer = %self.buyer,
            from = %self.step,
            to = %step,
            "trade step",
        );
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_advance_to_terminal() {
        let mut record = TradeRecord::new(
            TokenId(1),
            Address::from("buyer"),
            Address::from("seller"),
            Decimal::from(10),
        );
        assert_eq!(record.step, TradeStep::Initiated);
        assert!(!record.step.is_complete());

        record.advance(TradeStep::PaymentSettled);
        record.advance(TradeStep::AssetTransferred);
        record.advance(TradeStep::Committed);
        assert!(record.step.is_complete());
    }
}
