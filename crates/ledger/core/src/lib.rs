//! Ledger abstraction layer for the CryptoPlay SDK.
//!
//! This crate defines the gateway contract the SDK consumes; it does not
//! talk to a network itself.
//!
//! # Architecture
//!
//! ```text
//! LedgerGateway (composite trait)
//! ├── FungibleGateway     (token transfers, approvals, balances)
//! └── NonFungibleGateway  (NFT mint, transfer, approval, queries)
//! ```
//!
//! # Design Philosophy
//!
//! - **Domain traits**: one capability set per asset class, no SDK knowledge
//! - **Composite**: complete gateway interface combining all capabilities
//! - **Trust boundary**: responses are taken at face value; the ledger, not
//!   this layer, is authoritative for asset custody
//!
//! # Usage
//!
//! ```ignore
//! use ledger_core::{LedgerGateway, Address, TokenId};
//!
//! async fn settle<G: LedgerGateway>(gateway: &G, seller: &Address, buyer: &Address) {
//!     gateway.transfer_fungible(seller, price).await?;
//!     gateway.transfer_non_fungible(seller, buyer, TokenId(7)).await?;
//! }
//! ```

pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export all traits
pub use traits::{FungibleGateway, LedgerError, LedgerGateway, NonFungibleGateway};

// Re-export all types
pub use types::{
    Address, NftAttribute, NftMetadata, OwnedNft, TokenId, TransactionId, TransactionOutcome,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{FailPoint, MockLedgerClient};
