//! In-SDK NFT marketplace.
//!
//! Owns the listing/offer lifecycle and orchestrates trades that combine a
//! token payment with an NFT transfer through a [`ledger_core::LedgerGateway`].
//!
//! Multi-step trades are NOT transactional: payment and asset transfer are
//! independent ledger calls and either can fail after the other succeeded.
//! Every trade leaves a [`TradeRecord`] trail so the embedding application
//! can detect and reconcile a partially settled trade; nothing is retried
//! automatically.

pub mod error;
pub mod ledger;
pub mod trade;
pub mod types;

pub use error::MarketError;
pub use ledger::MarketplaceLedger;
pub use trade::{TradeRecord, TradeStep};
pub use types::{Listing, ListingStatus, MarketplaceStats, Offer, OfferStatus};
