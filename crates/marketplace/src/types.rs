//! Listing and offer records.

use chrono::{DateTime, Utc};
use ledger_core::{Address, TokenId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Listing lifecycle. Transitions are forward-only: active listings may
/// become sold or cancelled; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
}

/// A seller's standing offer to sell one NFT at a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub token_id: TokenId,
    pub seller: Address,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: ListingStatus,
}

/// Offer lifecycle. Forward-only from pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

/// A buyer-initiated counter-proposal against a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub token_id: TokenId,
    pub buyer: Address,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: OfferStatus,
}

/// Aggregate marketplace counters.
///
/// `total_volume` is the exact decimal sum of sold listing prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceStats {
    pub total_listings: usize,
    pub active_listings: usize,
    pub total_sales: usize,
    pub total_volume: Decimal,
}
