//! CryptoPlay: a player/game-facing SDK coordinating an in-SDK NFT
//! marketplace, a game score/reward ledger, and pass-through wallet and
//! contract helpers against a blockchain ledger.
//!
//! # Architecture
//!
//! ```text
//! CryptoPlay (facade, one session wallet)
//! ├── MarketplaceLedger   listing/offer lifecycle, trade settlement
//! ├── RewardLedger        scores, rewards, leaderboards, stats
//! ├── EventHub            in-process subscribe/unsubscribe over topics
//! └── LedgerGateway       external ledger client (trait; injected)
//! ```
//!
//! The SDK trusts the gateway's responses; the ledger, not this layer, is
//! authoritative for asset custody. Marketplace and reward bookkeeping are a
//! process-local convenience index that does not survive a restart.
//!
//! # Usage
//!
//! ```ignore
//! use cryptoplay_client::{ClientBuilder, Network, SdkConfig};
//!
//! let client = ClientBuilder::new()
//!     .gateway(gateway)
//!     .config(SdkConfig::new(Network::Testnet, wallet, operator))
//!     .build()?;
//!
//! client.create_listing(TokenId(7), "100".parse()?, seller).await?;
//! let outcome = client.buy_nft(TokenId(7), &buyer).await?;
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod events;

pub use builder::ClientBuilder;
pub use client::{CryptoPlay, GameState};
pub use config::{Network, NftConfig, SdkConfig, TokenConfig};
pub use events::{EventHub, LedgerEvent, Subscription, Topic};

// Re-export the component crates' public surface
pub use game_ledger::{
    GameError, PlayerStats, Reward, RewardKind, RewardLedger, RewardRequest, Score,
};
pub use ledger_core::{
    Address, FungibleGateway, LedgerError, LedgerGateway, NftAttribute, NftMetadata,
    NonFungibleGateway, OwnedNft, TokenId, TransactionId, TransactionOutcome,
};
pub use marketplace::{
    Listing, ListingStatus, MarketError, MarketplaceLedger, MarketplaceStats, Offer, OfferStatus,
    TradeRecord, TradeStep,
};
