//! Game score and reward ledger.
//!
//! Records player scores and distributed rewards, and derives leaderboards,
//! ranks, and per-player statistics from the score log on demand. Reward
//! distribution settles through a [`ledger_core::LedgerGateway`] (a token
//! transfer or an NFT mint) after the reward is recorded; bookkeeping and
//! settlement are deliberately decoupled.

pub mod error;
pub mod ledger;
pub mod types;

pub use error::GameError;
pub use ledger::RewardLedger;
pub use types::{PlayerStats, Reward, RewardKind, RewardRequest, RewardRequestKind, Score};
