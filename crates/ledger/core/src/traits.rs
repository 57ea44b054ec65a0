//! Ledger gateway abstraction traits.
//!
//! This module defines a layered ledger abstraction:
//! - Domain traits: FungibleGateway, NonFungibleGateway
//! - Composite trait: LedgerGateway

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::types::{Address, NftMetadata, OwnedNft, TokenId, TransactionOutcome};

// ============================================================================
// Error Types
// ============================================================================

/// Errors surfaced by ledger gateway calls.
///
/// Gateway errors are propagated to the caller verbatim; no retry or
/// timeout handling happens at this layer.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("network error: {0}")]
    Network(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("not authorized: {0}")]
    NotAuthorized(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("backend-specific error: {0}")]
    Backend(String),
}

// ============================================================================
// Domain Traits
// ============================================================================

/// Fungible token operations.
///
/// Transfers and approvals are signed by the wallet the gateway was
/// constructed with; the sender is implicit.
#[async_trait]
pub trait FungibleGateway: Send + Sync {
    /// Transfer tokens from the gateway's wallet to `to`.
    async fn transfer_fungible(
        &self,
        to: &Address,
        amount: Decimal,
    ) -> Result<TransactionOutcome, LedgerError>;

    /// Approve `spender` to move up to `amount` tokens from the gateway's wallet.
    async fn approve_fungible(
        &self,
        spender: &Address,
        amount: Decimal,
    ) -> Result<TransactionOutcome, LedgerError>;

    /// Query the token balance of an address.
    async fn fungible_balance(&self, address: &Address) -> Result<Decimal, LedgerError>;
}

/// NFT collection operations.
#[async_trait]
pub trait NonFungibleGateway: Send + Sync {
    /// Mint a new NFT to `owner` with the given metadata.
    async fn mint_non_fungible(
        &self,
        owner: &Address,
        metadata: NftMetadata,
    ) -> Result<TransactionOutcome, LedgerError>;

    /// Transfer an NFT between addresses.
    async fn transfer_non_fungible(
        &self,
        from: &Address,
        to: &Address,
        token_id: TokenId,
    ) -> Result<TransactionOutcome, LedgerError>;

    /// Authorize `operator` to move a single token.
    async fn approve_non_fungible(
        &self,
        operator: &Address,
        token_id: TokenId,
    ) -> Result<TransactionOutcome, LedgerError>;

    /// Authorize or revoke `operator` for every token owned by the
    /// gateway's wallet.
    async fn set_approval_for_all(
        &self,
        operator: &Address,
        approved: bool,
    ) -> Result<TransactionOutcome, LedgerError>;

    /// Query the current owner of a token.
    async fn owner_of(&self, token_id: TokenId) -> Result<Address, LedgerError>;

    /// Query the metadata of a token.
    async fn metadata_of(&self, token_id: TokenId) -> Result<NftMetadata, LedgerError>;

    /// Query all tokens owned by an address, with metadata.
    async fn tokens_of(&self, address: &Address) -> Result<Vec<OwnedNft>, LedgerError>;
}

// ============================================================================
// Composite Trait
// ============================================================================

/// Complete ledger gateway.
///
/// All ledger backends consumed by the SDK must implement this trait.
pub trait LedgerGateway: FungibleGateway + NonFungibleGateway + Send + Sync {
    /// Ledger name (e.g., "Ethereum", "Sui").
    fn name(&self) -> &str;

    /// Network name (e.g., "mainnet", "testnet", "local").
    fn network(&self) -> &str;
}
