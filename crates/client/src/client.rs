//! SDK facade bound to one session wallet.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use game_ledger::{GameError, PlayerStats, Reward, RewardLedger, RewardRequest, Score};
use ledger_core::{
    Address, FungibleGateway, LedgerError, LedgerGateway, NftMetadata, NonFungibleGateway,
    OwnedNft, TokenId, TransactionOutcome,
};
use marketplace::{
    Listing, MarketError, MarketplaceLedger, MarketplaceStats, Offer, TradeRecord,
};

use crate::config::SdkConfig;
use crate::events::{EventHub, LedgerEvent, Subscription, Topic};

/// Snapshot of the session wallet's holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub wallet_address: Address,
    pub token_balance: Decimal,
    pub token_symbol: String,
    pub nfts: Vec<OwnedNft>,
}

/// Player/game-facing SDK facade.
///
/// Binds one session wallet address to the marketplace and reward ledgers
/// plus pass-through gateway calls. Every method is a direct delegation;
/// the state machines and their invariants live in the components, reachable
/// directly through [`marketplace()`](Self::marketplace) and
/// [`game()`](Self::game).
pub struct CryptoPlay<G> {
    wallet: Address,
    config: SdkConfig,
    gateway: Arc<G>,
    marketplace: MarketplaceLedger<G>,
    game: RewardLedger<G>,
    events: EventHub,
}

impl<G: LedgerGateway> CryptoPlay<G> {
    pub(crate) fn new(gateway: Arc<G>, config: SdkConfig, events: EventHub) -> Self {
        let wallet = Address::new(config.wallet_address.clone());
        let operator = Address::new(config.operator_address.clone());
        Self {
            wallet,
            marketplace: MarketplaceLedger::new(Arc::clone(&gateway), operator),
            game: RewardLedger::new(Arc::clone(&gateway)),
            gateway,
            config,
            events,
        }
    }

    pub fn wallet_address(&self) -> &Address {
        &self.wallet
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Marketplace component.
    pub fn marketplace(&self) -> &MarketplaceLedger<G> {
        &self.marketplace
    }

    /// Score/reward component.
    pub fn game(&self) -> &RewardLedger<G> {
        &self.game
    }

    // ========================================================================
    // Wallet & contract pass-throughs
    // ========================================================================

    /// Mint an NFT to the session wallet.
    pub async fn mint_nft(&self, metadata: NftMetadata) -> Result<TransactionOutcome, LedgerError> {
        let outcome = self
            .gateway
            .mint_non_fungible(&self.wallet, metadata.clone())
            .await?;
        self.events.publish(LedgerEvent::NftMinted {
            owner: self.wallet.clone(),
            metadata,
            transaction_id: outcome.transaction_id.clone(),
        });
        Ok(outcome)
    }

    /// Transfer game tokens from the session wallet.
    pub async fn transfer_token(
        &self,
        to: &Address,
        amount: Decimal,
    ) -> Result<TransactionOutcome, LedgerError> {
        let outcome = self.gateway.transfer_fungible(to, amount).await?;
        self.events.publish(LedgerEvent::TokenTransferred {
            from: self.wallet.clone(),
            to: to.clone(),
            amount,
        });
        Ok(outcome)
    }

    /// Approve a spender for the session wallet's tokens.
    pub async fn approve_token(
        &self,
        spender: &Address,
        amount: Decimal,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.gateway.approve_fungible(spender, amount).await
    }

    /// Transfer an NFT out of the session wallet.
    pub async fn transfer_nft(
        &self,
        to: &Address,
        token_id: TokenId,
    ) -> Result<TransactionOutcome, LedgerError> {
        let outcome = self
            .gateway
            .transfer_non_fungible(&self.wallet, to, token_id)
            .await?;
        self.events.publish(LedgerEvent::NftTransferred {
            from: self.wallet.clone(),
            to: to.clone(),
            token_id,
        });
        Ok(outcome)
    }

    /// Approve an operator for a single NFT.
    pub async fn approve_nft(
        &self,
        operator: &Address,
        token_id: TokenId,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.gateway.approve_non_fungible(operator, token_id).await
    }

    /// Approve or revoke an operator for all session wallet NFTs.
    pub async fn set_approval_for_all(
        &self,
        operator: &Address,
        approved: bool,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.gateway.set_approval_for_all(operator, approved).await
    }

    pub async fn token_balance(&self, address: &Address) -> Result<Decimal, LedgerError> {
        self.gateway.fungible_balance(address).await
    }

    pub async fn nft_metadata(&self, token_id: TokenId) -> Result<NftMetadata, LedgerError> {
        self.gateway.metadata_of(token_id).await
    }

    pub async fn nfts_by_owner(&self, address: &Address) -> Result<Vec<OwnedNft>, LedgerError> {
        self.gateway.tokens_of(address).await
    }

    /// Snapshot of the session wallet's holdings.
    pub async fn game_state(&self) -> Result<GameState, LedgerError> {
        let token_balance = self.gateway.fungible_balance(&self.wallet).await?;
        let nfts = self.gateway.tokens_of(&self.wallet).await?;
        Ok(GameState {
            wallet_address: self.wallet.clone(),
            token_balance,
            token_symbol: self.config.token.symbol.clone(),
            nfts,
        })
    }

    // ========================================================================
    // Game delegations
    // ========================================================================

    pub async fn record_score(&self, player: Address, score: u64, game_id: &str) {
        self.game.record_score(player, score, game_id).await
    }

    pub async fn player_scores(&self, player: &Address) -> Vec<Score> {
        self.game.player_scores(player).await
    }

    pub async fn leaderboard(&self, game_id: &str, limit: Option<usize>) -> Vec<Score> {
        self.game.leaderboard(game_id, limit).await
    }

    pub async fn distribute_reward(
        &self,
        player: &Address,
        request: RewardRequest,
    ) -> Result<TransactionOutcome, GameError> {
        self.game.distribute_reward(player, request).await
    }

    pub async fn player_rank(&self, player: &Address, game_id: &str) -> usize {
        self.game.player_rank(player, game_id).await
    }

    pub async fn player_stats(&self, player: &Address) -> PlayerStats {
        self.game.player_stats(player).await
    }

    pub async fn player_rewards(&self, player: &Address) -> Vec<Reward> {
        self.game.player_rewards(player).await
    }

    // ========================================================================
    // Marketplace delegations
    // ========================================================================

    pub async fn create_listing(
        &self,
        token_id: TokenId,
        price: Decimal,
        seller: Address,
    ) -> Result<(), MarketError> {
        self.marketplace.create_listing(token_id, price, seller).await
    }

    pub async fn cancel_listing(&self, token_id: TokenId) -> Result<(), MarketError> {
        self.marketplace.cancel_listing(token_id).await
    }

    pub async fn buy_nft(
        &self,
        token_id: TokenId,
        buyer: &Address,
    ) -> Result<TransactionOutcome, MarketError> {
        self.marketplace.buy_nft(token_id, buyer).await
    }

    pub async fn create_offer(
        &self,
        token_id: TokenId,
        price: Decimal,
        buyer: Address,
    ) -> Result<(), MarketError> {
        self.marketplace.create_offer(token_id, price, buyer).await
    }

    pub async fn accept_offer(
        &self,
        token_id: TokenId,
        buyer: &Address,
    ) -> Result<TransactionOutcome, MarketError> {
        self.marketplace.accept_offer(token_id, buyer).await
    }

    pub async fn reject_offer(&self, token_id: TokenId, buyer: &Address) -> Result<(), MarketError> {
        self.marketplace.reject_offer(token_id, buyer).await
    }

    pub async fn active_listings(&self) -> Vec<Listing> {
        self.marketplace.active_listings().await
    }

    pub async fn token_offers(&self, token_id: TokenId) -> Vec<Offer> {
        self.marketplace.token_offers(token_id).await
    }

    pub async fn listing_details(&self, token_id: TokenId) -> Option<Listing> {
        self.marketplace.listing(token_id).await
    }

    pub async fn marketplace_stats(&self) -> MarketplaceStats {
        self.marketplace.stats().await
    }

    /// Trades that never reached their commit step; see
    /// [`MarketplaceLedger::incomplete_trades`].
    pub async fn incomplete_trades(&self) -> Vec<TradeRecord> {
        self.marketplace.incomplete_trades().await
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Subscribe to events published by this client's own ledger calls.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        self.events.subscribe(topic)
    }
}
