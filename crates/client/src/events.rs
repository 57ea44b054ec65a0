//! Topic-based ledger event hub.
//!
//! The SDK publishes an event after each of its own successful pass-through
//! ledger calls. Delivery is best-effort: a subscriber that lags skips
//! ahead, and no ordering is guaranteed across reconnects.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use ledger_core::{Address, NftMetadata, TokenId, TransactionId};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// NFT mints
    NftMints,
    /// Fungible token transfers
    TokenTransfers,
    /// NFT transfers
    NftTransfers,
}

const TOPICS: [Topic; 3] = [Topic::NftMints, Topic::TokenTransfers, Topic::NftTransfers];

/// Events published by the SDK's own ledger calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    NftMinted {
        owner: Address,
        metadata: NftMetadata,
        transaction_id: TransactionId,
    },
    TokenTransferred {
        from: Address,
        to: Address,
        amount: Decimal,
    },
    NftTransferred {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
}

impl LedgerEvent {
    pub fn topic(&self) -> Topic {
        match self {
            LedgerEvent::NftMinted { .. } => Topic::NftMints,
            LedgerEvent::TokenTransferred { .. } => Topic::TokenTransfers,
            LedgerEvent::NftTransferred { .. } => Topic::NftTransfers,
        }
    }
}

/// Topic-based event hub
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventHub {
    channels: Arc<HashMap<Topic, broadcast::Sender<LedgerEvent>>>,
}

impl EventHub {
    /// Creates a new event hub with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event hub with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = TOPICS
            .iter()
            .map(|&topic| (topic, broadcast::channel(capacity).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: LedgerEvent) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a handle that only receives events for that topic.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let receiver = self
            .channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe();
        Subscription {
            topic,
            receiver: Some(receiver),
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one topic subscription.
pub struct Subscription {
    topic: Topic,
    receiver: Option<broadcast::Receiver<LedgerEvent>>,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Next event on the topic.
    ///
    /// Returns `None` once unsubscribed or when the hub is gone. A lagged
    /// subscriber skips the overwritten events and keeps receiving.
    pub async fn recv(&mut self) -> Option<LedgerEvent> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, topic = ?self.topic, "subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Stop receiving events. Idempotent.
    pub fn unsubscribe(&mut self) {
        self.receiver = None;
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(amount: u64) -> LedgerEvent {
        LedgerEvent::TokenTransferred {
            from: Address::from("alice"),
            to: Address::from("bob"),
            amount: Decimal::from(amount),
        }
    }

    #[tokio::test]
    async fn test_events_route_by_topic() {
        let hub = EventHub::new();
        let mut transfers = hub.subscribe(Topic::TokenTransfers);
        let mut mints = hub.subscribe(Topic::NftMints);

        hub.publish(transfer(5));

        let event = transfers.recv().await.unwrap();
        assert!(matches!(event, LedgerEvent::TokenTransferred { .. }));

        // Nothing was published on the mint topic
        hub.publish(transfer(6));
        tokio::select! {
            _ = mints.recv() => panic!("mint subscriber received a transfer event"),
            _ = tokio::task::yield_now() => {}
        }
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let hub = EventHub::new();
        let mut subscription = hub.subscribe(Topic::TokenTransfers);
        assert!(subscription.is_active());

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert!(subscription.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let hub = EventHub::new();
        hub.publish(transfer(1));
    }
}
