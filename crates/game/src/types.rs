//! Score and reward records.

use chrono::{DateTime, Utc};
use ledger_core::{Address, NftMetadata};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One recorded game result. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub player: Address,
    pub score: u64,
    pub recorded_at: DateTime<Utc>,
    pub game_id: String,
}

/// What a reward pays out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum RewardKind {
    /// Fungible token payout
    Token { amount: Decimal },
    /// Newly minted NFT
    Nft { metadata: NftMetadata },
}

/// A distributed (or distribution-attempted) reward. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    #[serde(flatten)]
    pub kind: RewardKind,
    pub game_id: String,
}

/// Reward distribution request as it arrives from the embedding application.
///
/// The optional fields mirror the wire shape: `amount` must be present for
/// token rewards, `metadata` for NFT rewards. [`RewardRequest::into_reward`]
/// enforces that before anything is recorded or sent to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRequest {
    pub kind: RewardRequestKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NftMetadata>,
    pub game_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardRequestKind {
    Token,
    Nft,
}

impl RewardRequest {
    /// A token reward of `amount`.
    pub fn token(amount: Decimal, game_id: impl Into<String>) -> Self {
        Self {
            kind: RewardRequestKind::Token,
            amount: Some(amount),
            metadata: None,
            game_id: game_id.into(),
        }
    }

    /// An NFT reward carrying `metadata`.
    pub fn nft(metadata: NftMetadata, game_id: impl Into<String>) -> Self {
        Self {
            kind: RewardRequestKind::Nft,
            amount: None,
            metadata: Some(metadata),
            game_id: game_id.into(),
        }
    }

    /// Validate the request into a well-formed [`Reward`].
    pub fn into_reward(self) -> Result<Reward, GameError> {
        let kind = match self.kind {
            RewardRequestKind::Token => {
                let amount = self.amount.ok_or_else(|| {
                    GameError::InvalidReward("token reward without an amount".to_string())
                })?;
                RewardKind::Token { amount }
            }
            RewardRequestKind::Nft => {
                let metadata = self.metadata.ok_or_else(|| {
                    GameError::InvalidReward("nft reward without metadata".to_string())
                })?;
                RewardKind::Nft { metadata }
            }
        };
        Ok(Reward {
            kind,
            game_id: self.game_id,
        })
    }
}

/// Aggregate statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_games: usize,
    /// Arithmetic mean of scores; 0.0 when no scores are recorded
    pub average_score: f64,
    pub highest_score: u64,
    pub total_rewards: usize,
}
