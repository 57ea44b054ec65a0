//! Marketplace state and trade orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use ledger_core::{
    Address, FungibleGateway, LedgerGateway, NonFungibleGateway, TokenId, TransactionOutcome,
};

use crate::error::{MarketError, Result};
use crate::trade::{TradeRecord, TradeStep};
use crate::types::{Listing, ListingStatus, MarketplaceStats, Offer, OfferStatus};

/// Listing/offer lifecycle owner.
///
/// Orchestrates buy and offer-acceptance flows that combine a token transfer
/// with an NFT transfer through the ledger gateway. State is process-local
/// and does not survive a restart; the ledger remains the durable source of
/// truth for asset ownership, and this bookkeeping is an off-chain
/// convenience index over it.
///
/// Single-writer access is assumed; the locks make concurrent reads safe but
/// no cross-operation mutual exclusion per token is attempted.
pub struct MarketplaceLedger<G> {
    gateway: Arc<G>,

    /// Address authorized to move escrowed NFTs for trades
    operator: Address,

    /// At most one listing per token, last-write-wins
    listings: Arc<RwLock<HashMap<TokenId, Listing>>>,

    /// Offers per token, in creation order
    offers: Arc<RwLock<HashMap<TokenId, Vec<Offer>>>>,

    /// Append-only settlement trail for buy/accept flows
    trades: Arc<RwLock<Vec<TradeRecord>>>,
}

impl<G> Clone for MarketplaceLedger<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            operator: self.operator.clone(),
            listings: Arc::clone(&self.listings),
            offers: Arc::clone(&self.offers),
            trades: Arc::clone(&self.trades),
        }
    }
}

impl<G: LedgerGateway> MarketplaceLedger<G> {
    pub fn new(gateway: Arc<G>, operator: Address) -> Self {
        Self {
            gateway,
            operator,
            listings: Arc::new(RwLock::new(HashMap::new())),
            offers: Arc::new(RwLock::new(HashMap::new())),
            trades: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// List a token for sale.
    ///
    /// Requests an NFT approval for the marketplace operator first; if the
    /// approval fails no listing is recorded. A listing that already exists
    /// for the token is replaced.
    pub async fn create_listing(
        &self,
        token_id: TokenId,
        price: Decimal,
        seller: Address,
    ) -> Result<()> {
        self.gateway
            .approve_non_fungible(&self.operator, token_id)
            .await
            .map_err(|source| MarketError::Ledger {
                op: "create_listing",
                source,
            })?;

        let listing = Listing {
            token_id,
            seller: seller.clone(),
            price,
            created_at: Utc::now(),
            status: ListingStatus::Active,
        };

        let previous = self.listings.write().await.insert(token_id, listing);
        if previous.is_some() {
            tracing::debug!(%token_id, "existing listing replaced");
        }
        tracing::info!(%token_id, %seller, %price, "listing created");

        Ok(())
    }

    /// Cancel an active listing.
    pub async fn cancel_listing(&self, token_id: TokenId) -> Result<()> {
        let mut listings = self.listings.write().await;
        let listing = listings
            .get_mut(&token_id)
            .ok_or(MarketError::ListingNotFound(token_id))?;

        if listing.status != ListingStatus::Active {
            return Err(MarketError::ListingNotActive(token_id));
        }

        listing.status = ListingStatus::Cancelled;
        tracing::info!(%token_id, "listing cancelled");
        Ok(())
    }

    /// Buy a listed token at its asking price.
    ///
    /// Payment and asset transfer are separate ledger calls. If the payment
    /// settles but the asset transfer fails, the buyer has paid without
    /// receiving the asset: the listing stays active and the trade record is
    /// left at [`TradeStep::PaymentSettled`] for the caller to reconcile via
    /// [`incomplete_trades`](Self::incomplete_trades).
    ///
    /// Returns the outcome of the NFT transfer.
    pub async fn buy_nft(
        &self,
        token_id: TokenId,
        buyer: &Address,
    ) -> Result<TransactionOutcome> {
        let (seller, price) = {
            let listings = self.listings.read().await;
            let listing = listings
                .get(&token_id)
                .ok_or(MarketError::ListingNotFound(token_id))?;
            if listing.status != ListingStatus::Active {
                return Err(MarketError::ListingNotActive(token_id));
            }
            (listing.seller.clone(), listing.price)
        };

        let (trade, outcome) = self
            .settle(token_id, buyer, &seller, price, "buy_nft")
            .await?;

        {
            let mut listings = self.listings.write().await;
            if let Some(listing) = listings.get_mut(&token_id) {
                listing.status = ListingStatus::Sold;
            }
        }
        self.commit_trade(trade).await;
        tracing::info!(%token_id, %buyer, %seller, %price, "token sold");

        Ok(outcome)
    }

    /// Place an offer against an active listing.
    ///
    /// Multiple pending offers per (token, buyer) are retained; acceptance
    /// picks the first in creation order.
    pub async fn create_offer(
        &self,
        token_id: TokenId,
        price: Decimal,
        buyer: Address,
    ) -> Result<()> {
        {
            let listings = self.listings.read().await;
            let listing = listings
                .get(&token_id)
                .ok_or(MarketError::ListingNotFound(token_id))?;
            if listing.status != ListingStatus::Active {
                return Err(MarketError::ListingNotActive(token_id));
            }
        }

        let offer = Offer {
            token_id,
            buyer: buyer.clone(),
            price,
            created_at: Utc::now(),
            status: OfferStatus::Pending,
        };
        self.offers.write().await.entry(token_id).or_default().push(offer);
        tracing::debug!(%token_id, %buyer, %price, "offer created");

        Ok(())
    }

    /// Accept a buyer's pending offer at the offered price.
    ///
    /// Matches the first pending offer in creation order for the buyer.
    /// Settlement follows the same non-atomic pay → transfer → commit
    /// sequence as [`buy_nft`](Self::buy_nft), with the same partial-failure
    /// contract. Returns the outcome of the NFT transfer.
    pub async fn accept_offer(
        &self,
        token_id: TokenId,
        buyer: &Address,
    ) -> Result<TransactionOutcome> {
        let price = {
            let offers = self.offers.read().await;
            offers
                .get(&token_id)
                .and_then(|list| list.iter().find(|offer| Self::is_pending_from(offer, buyer)))
                .map(|offer| offer.price)
                .ok_or_else(|| MarketError::OfferNotFound {
                    token_id,
                    buyer: buyer.clone(),
                })?
        };

        let seller = {
            let listings = self.listings.read().await;
            let listing = listings
                .get(&token_id)
                .ok_or(MarketError::ListingNotFound(token_id))?;
            if listing.status != ListingStatus::Active {
                return Err(MarketError::ListingNotActive(token_id));
            }
            listing.seller.clone()
        };

        let (trade, outcome) = self
            .settle(token_id, buyer, &seller, price, "accept_offer")
            .await?;

        {
            let mut offers = self.offers.write().await;
            if let Some(offer) = offers
                .get_mut(&token_id)
                .and_then(|list| list.iter_mut().find(|offer| Self::is_pending_from(offer, buyer)))
            {
                offer.status = OfferStatus::Accepted;
            }
        }
        {
            let mut listings = self.listings.write().await;
            if let Some(listing) = listings.get_mut(&token_id) {
                listing.status = ListingStatus::Sold;
            }
        }
        self.commit_trade(trade).await;
        tracing::info!(%token_id, %buyer, %seller, %price, "offer accepted");

        Ok(outcome)
    }

    /// Reject a buyer's pending offer.
    ///
    /// Matches the first pending offer in creation order for the buyer.
    pub async fn reject_offer(&self, token_id: TokenId, buyer: &Address) -> Result<()> {
        let mut offers = self.offers.write().await;
        let offer = offers
            .get_mut(&token_id)
            .and_then(|list| list.iter_mut().find(|offer| Self::is_pending_from(offer, buyer)))
            .ok_or_else(|| MarketError::OfferNotFound {
                token_id,
                buyer: buyer.clone(),
            })?;

        offer.status = OfferStatus::Rejected;
        tracing::debug!(%token_id, %buyer, "offer rejected");
        Ok(())
    }

    /// All listings currently active, ordered by token id.
    pub async fn active_listings(&self) -> Vec<Listing> {
        let listings = self.listings.read().await;
        let mut active: Vec<Listing> = listings
            .values()
            .filter(|listing| listing.status == ListingStatus::Active)
            .cloned()
            .collect();
        active.sort_by_key(|listing| listing.token_id);
        active
    }

    /// Every offer recorded against a token, in creation order.
    pub async fn token_offers(&self, token_id: TokenId) -> Vec<Offer> {
        self.offers
            .read()
            .await
            .get(&token_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Current listing record for a token, if any.
    pub async fn listing(&self, token_id: TokenId) -> Option<Listing> {
        self.listings.read().await.get(&token_id).cloned()
    }

    /// Aggregate counters over all listings.
    pub async fn stats(&self) -> MarketplaceStats {
        let listings = self.listings.read().await;

        let mut active_listings = 0;
        let mut total_sales = 0;
        let mut total_volume = Decimal::ZERO;
        for listing in listings.values() {
            match listing.status {
                ListingStatus::Active => active_listings += 1,
                ListingStatus::Sold => {
                    total_sales += 1;
                    total_volume += listing.price;
                }
                ListingStatus::Cancelled => {}
            }
        }

        MarketplaceStats {
            total_listings: listings.len(),
            active_listings,
            total_sales,
            total_volume,
        }
    }

    /// Full settlement trail, oldest first.
    pub async fn trades(&self) -> Vec<TradeRecord> {
        self.trades.read().await.clone()
    }

    /// Trades that did not reach [`TradeStep::Committed`].
    ///
    /// A record stuck at [`TradeStep::PaymentSettled`] means a buyer has
    /// paid without receiving the asset; the caller decides how to
    /// reconcile. Nothing here is retried automatically.
    pub async fn incomplete_trades(&self) -> Vec<TradeRecord> {
        self.trades
            .read()
            .await
            .iter()
            .filter(|record| !record.step.is_complete())
            .cloned()
            .collect()
    }

    fn is_pending_from(offer: &Offer, buyer: &Address) -> bool {
        offer.buyer == *buyer && offer.status == OfferStatus::Pending
    }

    /// Run the pay → transfer-asset steps of a trade, recording progress.
    async fn settle(
        &self,
        token_id: TokenId,
        buyer: &Address,
        seller: &Address,
        price: Decimal,
        op: &'static str,
    ) -> Result<(usize, TransactionOutcome)> {
        let trade = {
            let mut trades = self.trades.write().await;
            trades.push(TradeRecord::new(
                token_id,
                buyer.clone(),
                seller.clone(),
                price,
            ));
            trades.len() - 1
        };

        let payment = match self.gateway.transfer_fungible(seller, price).await {
            Ok(outcome) => outcome,
            Err(source) => {
                tracing::warn!(%token_id, %buyer, "payment failed, trade halted before settlement");
                return Err(MarketError::Ledger { op, source });
            }
        };
        {
            let mut trades = self.trades.write().await;
            trades[trade].payment_tx = Some(payment.transaction_id.clone());
            trades[trade].advance(TradeStep::PaymentSettled);
        }

        let outcome = match self
            .gateway
            .transfer_non_fungible(seller, buyer, token_id)
            .await
        {
            Ok(outcome) => outcome,
            Err(source) => {
                tracing::warn!(
                    %token_id, %buyer,
                    "asset transfer failed after payment settled; trade needs reconciliation",
                );
                return Err(MarketError::Ledger { op, source });
            }
        };
        {
            let mut trades = self.trades.write().await;
            trades[trade].asset_tx = Some(outcome.transaction_id.clone());
            trades[trade].advance(TradeStep::AssetTransferred);
        }

        Ok((trade, outcome))
    }

    async fn commit_trade(&self, trade: usize) {
        let mut trades = self.trades.write().await;
        trades[trade].advance(TradeStep::Committed);
    }
}
