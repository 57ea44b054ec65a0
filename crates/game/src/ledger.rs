//! Score and reward bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use ledger_core::{
    Address, FungibleGateway, LedgerGateway, NonFungibleGateway, TransactionOutcome,
};

use crate::error::{GameError, Result};
use crate::types::{PlayerStats, Reward, RewardKind, RewardRequest, Score};

/// Score and reward ledger.
///
/// Scores are kept in one append-only, insertion-ordered log so that
/// leaderboard tie-breaks are deterministic across players. Rewards are
/// recorded before distribution is attempted: bookkeeping and settlement
/// are deliberately decoupled, and a failed ledger call leaves the reward
/// record in place for the caller to reconcile.
///
/// State is process-local and does not survive a restart.
pub struct RewardLedger<G> {
    gateway: Arc<G>,
    scores: Arc<RwLock<Vec<Score>>>,
    rewards: Arc<RwLock<HashMap<Address, Vec<Reward>>>>,
}

impl<G> Clone for RewardLedger<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            scores: Arc::clone(&self.scores),
            rewards: Arc::clone(&self.rewards),
        }
    }
}

impl<G: LedgerGateway> RewardLedger<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            scores: Arc::new(RwLock::new(Vec::new())),
            rewards: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a game result. Never fails; score history is unbounded.
    pub async fn record_score(&self, player: Address, score: u64, game_id: impl Into<String>) {
        let game_id = game_id.into();
        tracing::debug!(%player, score, %game_id, "score recorded");
        self.scores.write().await.push(Score {
            player,
            score,
            recorded_at: Utc::now(),
            game_id,
        });
    }

    /// All scores recorded for a player, in insertion order.
    pub async fn player_scores(&self, player: &Address) -> Vec<Score> {
        self.scores
            .read()
            .await
            .iter()
            .filter(|score| score.player == *player)
            .cloned()
            .collect()
    }

    /// Top scores for a game, highest first.
    ///
    /// Ties keep insertion order. `limit` of `None` returns the full table.
    /// Recomputed from the score log on every call, O(total scores); fine
    /// for session-sized datasets, not for long-lived high-score tables.
    pub async fn leaderboard(&self, game_id: &str, limit: Option<usize>) -> Vec<Score> {
        let scores = self.scores.read().await;
        let mut board: Vec<Score> = scores
            .iter()
            .filter(|score| score.game_id == game_id)
            .cloned()
            .collect();
        // Stable sort: equal scores keep their insertion order
        board.sort_by(|a, b| b.score.cmp(&a.score));
        if let Some(limit) = limit {
            board.truncate(limit);
        }
        board
    }

    /// 1-based position of the player's best entry in the full leaderboard.
    ///
    /// Returns 0 when the player has no qualifying score; not an error.
    pub async fn player_rank(&self, player: &Address, game_id: &str) -> usize {
        self.leaderboard(game_id, None)
            .await
            .iter()
            .position(|score| score.player == *player)
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    /// Record and distribute a reward.
    ///
    /// The request is validated first; an invalid request fails before
    /// anything is recorded or sent to the ledger. A valid reward is
    /// appended to the player record and THEN settled through the gateway,
    /// a token transfer or an NFT mint. The two steps are not atomic: if
    /// the ledger call fails the reward record remains appended and the
    /// error is surfaced to the caller.
    pub async fn distribute_reward(
        &self,
        player: &Address,
        request: RewardRequest,
    ) -> Result<TransactionOutcome> {
        let reward = request.into_reward()?;
        let kind = reward.kind.clone();

        self.rewards
            .write()
            .await
            .entry(player.clone())
            .or_default()
            .push(reward);

        let outcome = match kind {
            RewardKind::Token { amount } => {
                tracing::info!(%player, %amount, "distributing token reward");
                self.gateway
                    .transfer_fungible(player, amount)
                    .await
                    .map_err(|source| GameError::Ledger {
                        op: "distribute_reward: token transfer",
                        source,
                    })?
            }
            RewardKind::Nft { metadata } => {
                tracing::info!(%player, nft = %metadata.name, "distributing nft reward");
                self.gateway
                    .mint_non_fungible(player, metadata)
                    .await
                    .map_err(|source| GameError::Ledger {
                        op: "distribute_reward: nft mint",
                        source,
                    })?
            }
        };

        Ok(outcome)
    }

    /// All rewards recorded for a player, in distribution order.
    pub async fn player_rewards(&self, player: &Address) -> Vec<Reward> {
        self.rewards
            .read()
            .await
            .get(player)
            .cloned()
            .unwrap_or_default()
    }

    /// Aggregate statistics for a player.
    ///
    /// With no recorded scores every numeric field is zero
    /// (`average_score` is 0.0, not NaN).
    pub async fn player_stats(&self, player: &Address) -> PlayerStats {
        let scores = self.player_scores(player).await;
        let total_rewards = self.rewards.read().await.get(player).map_or(0, Vec::len);

        if scores.is_empty() {
            return PlayerStats {
                total_games: 0,
                average_score: 0.0,
                highest_score: 0,
                total_rewards,
            };
        }

        let total: u64 = scores.iter().map(|score| score.score).sum();
        PlayerStats {
            total_games: scores.len(),
            average_score: total as f64 / scores.len() as f64,
            highest_score: scores.iter().map(|score| score.score).max().unwrap_or(0),
            total_rewards,
        }
    }
}
