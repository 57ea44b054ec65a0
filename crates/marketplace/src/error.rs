use ledger_core::{Address, LedgerError, TokenId};

/// Marketplace errors.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("listing not found for token {0}")]
    ListingNotFound(TokenId),

    #[error("listing for token {0} is not active")]
    ListingNotActive(TokenId),

    #[error("no pending offer from {buyer} for token {token_id}")]
    OfferNotFound { token_id: TokenId, buyer: Address },

    #[error("{op}: {source}")]
    Ledger {
        op: &'static str,
        #[source]
        source: LedgerError,
    },
}

pub type Result<T> = std::result::Result<T, MarketError>;
