use ledger_core::LedgerError;

/// Game ledger errors.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Reward request is malformed; reported before any ledger call.
    #[error("invalid reward: {0}")]
    InvalidReward(String),

    #[error("{op}: {source}")]
    Ledger {
        op: &'static str,
        #[source]
        source: LedgerError,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
