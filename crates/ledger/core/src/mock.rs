//! Mock ledger gateway for testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::traits::{FungibleGateway, LedgerError, LedgerGateway, NonFungibleGateway};
use crate::types::{Address, NftMetadata, OwnedNft, TokenId, TransactionId, TransactionOutcome};

/// Gateway operations that can be made to fail on their next invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    TransferFungible,
    ApproveFungible,
    MintNonFungible,
    TransferNonFungible,
    ApproveNonFungible,
    SetApprovalForAll,
}

#[derive(Debug, Clone)]
struct NftRecord {
    owner: Address,
    metadata: NftMetadata,
    approved: Option<Address>,
}

/// Mock ledger gateway for testing without network.
///
/// Simulates ledger operations in-memory. Calls succeed unless a one-shot
/// failure has been injected with [`MockLedgerClient::fail_next`]. Balances
/// are tracked but not enforced; the mock accepts any transfer.
#[derive(Clone)]
pub struct MockLedgerClient {
    /// Wallet the gateway signs with (implicit sender for fungible transfers)
    wallet: Address,
    balances: Arc<Mutex<HashMap<Address, Decimal>>>,
    nfts: Arc<Mutex<HashMap<TokenId, NftRecord>>>,
    /// (owner, operator) pairs granted blanket approval
    operators: Arc<Mutex<HashSet<(Address, Address)>>>,
    next_token: Arc<Mutex<u64>>,
    tx_counter: Arc<Mutex<u64>>,
    fail_next: Arc<Mutex<HashSet<FailPoint>>>,
}

impl MockLedgerClient {
    pub fn new(wallet: Address) -> Self {
        Self {
            wallet,
            balances: Arc::new(Mutex::new(HashMap::new())),
            nfts: Arc::new(Mutex::new(HashMap::new())),
            operators: Arc::new(Mutex::new(HashSet::new())),
            next_token: Arc::new(Mutex::new(1)),
            tx_counter: Arc::new(Mutex::new(0)),
            fail_next: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Seed a token balance.
    pub fn with_balance(self, address: Address, amount: Decimal) -> Self {
        self.balances.lock().unwrap().insert(address, amount);
        self
    }

    /// Seed an existing NFT.
    pub fn seed_nft(&self, token_id: TokenId, owner: Address, metadata: NftMetadata) {
        let mut next = self.next_token.lock().unwrap();
        *next = (*next).max(token_id.0 + 1);
        self.nfts.lock().unwrap().insert(
            token_id,
            NftRecord {
                owner,
                metadata,
                approved: None,
            },
        );
    }

    /// Make the next invocation of `point` fail.
    pub fn fail_next(&self, point: FailPoint) {
        self.fail_next.lock().unwrap().insert(point);
    }

    /// Operator approved for a single token, if any. Test helper.
    pub fn approved_operator(&self, token_id: TokenId) -> Option<Address> {
        self.nfts
            .lock()
            .unwrap()
            .get(&token_id)
            .and_then(|record| record.approved.clone())
    }

    fn check_failure(&self, point: FailPoint) -> Result<(), LedgerError> {
        if self.fail_next.lock().unwrap().remove(&point) {
            return Err(LedgerError::TransactionFailed(format!(
                "injected failure at {point:?}"
            )));
        }
        Ok(())
    }

    fn next_outcome(&self, sender: &Address, recipient: &Address) -> TransactionOutcome {
        let mut counter = self.tx_counter.lock().unwrap();
        *counter += 1;
        let digest = Sha256::digest(counter.to_le_bytes());
        TransactionOutcome {
            transaction_id: TransactionId::from_bytes(digest.to_vec()),
            block_number: *counter,
            sender: sender.clone(),
            recipient: recipient.clone(),
            success: true,
        }
    }
}

#[async_trait]
impl FungibleGateway for MockLedgerClient {
    async fn transfer_fungible(
        &self,
        to: &Address,
        amount: Decimal,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.check_failure(FailPoint::TransferFungible)?;

        let mut balances = self.balances.lock().unwrap();
        *balances.entry(self.wallet.clone()).or_default() -= amount;
        *balances.entry(to.clone()).or_default() += amount;

        Ok(self.next_outcome(&self.wallet, to))
    }

    async fn approve_fungible(
        &self,
        spender: &Address,
        _amount: Decimal,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.check_failure(FailPoint::ApproveFungible)?;
        Ok(self.next_outcome(&self.wallet, spender))
    }

    async fn fungible_balance(&self, address: &Address) -> Result<Decimal, LedgerError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait]
impl NonFungibleGateway for MockLedgerClient {
    async fn mint_non_fungible(
        &self,
        owner: &Address,
        metadata: NftMetadata,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.check_failure(FailPoint::MintNonFungible)?;

        let token_id = {
            let mut next = self.next_token.lock().unwrap();
            let id = TokenId(*next);
            *next += 1;
            id
        };

        self.nfts.lock().unwrap().insert(
            token_id,
            NftRecord {
                owner: owner.clone(),
                metadata,
                approved: None,
            },
        );

        Ok(self.next_outcome(&self.wallet, owner))
    }

    async fn transfer_non_fungible(
        &self,
        from: &Address,
        to: &Address,
        token_id: TokenId,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.check_failure(FailPoint::TransferNonFungible)?;

        let mut nfts = self.nfts.lock().unwrap();
        let record = nfts
            .get_mut(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;

        if record.owner != *from {
            return Err(LedgerError::NotAuthorized(format!(
                "{from} does not own token {token_id}"
            )));
        }

        record.owner = to.clone();
        record.approved = None;

        Ok(self.next_outcome(from, to))
    }

    async fn approve_non_fungible(
        &self,
        operator: &Address,
        token_id: TokenId,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.check_failure(FailPoint::ApproveNonFungible)?;

        let mut nfts = self.nfts.lock().unwrap();
        let record = nfts
            .get_mut(&token_id)
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        record.approved = Some(operator.clone());
        let owner = record.owner.clone();

        Ok(self.next_outcome(&owner, operator))
    }

    async fn set_approval_for_all(
        &self,
        operator: &Address,
        approved: bool,
    ) -> Result<TransactionOutcome, LedgerError> {
        self.check_failure(FailPoint::SetApprovalForAll)?;

        let pair = (self.wallet.clone(), operator.clone());
        let mut operators = self.operators.lock().unwrap();
        if approved {
            operators.insert(pair);
        } else {
            operators.remove(&pair);
        }

        Ok(self.next_outcome(&self.wallet, operator))
    }

    async fn owner_of(&self, token_id: TokenId) -> Result<Address, LedgerError> {
        self.nfts
            .lock()
            .unwrap()
            .get(&token_id)
            .map(|record| record.owner.clone())
            .ok_or(LedgerError::TokenNotFound(token_id))
    }

    async fn metadata_of(&self, token_id: TokenId) -> Result<NftMetadata, LedgerError> {
        self.nfts
            .lock()
            .unwrap()
            .get(&token_id)
            .map(|record| record.metadata.clone())
            .ok_or(LedgerError::TokenNotFound(token_id))
    }

    async fn tokens_of(&self, address: &Address) -> Result<Vec<OwnedNft>, LedgerError> {
        let nfts = self.nfts.lock().unwrap();
        let mut owned: Vec<OwnedNft> = nfts
            .iter()
            .filter(|(_, record)| record.owner == *address)
            .map(|(id, record)| OwnedNft {
                id: *id,
                metadata: record.metadata.clone(),
            })
            .collect();
        owned.sort_by_key(|nft| nft.id);
        Ok(owned)
    }
}

impl LedgerGateway for MockLedgerClient {
    fn name(&self) -> &str {
        "MockLedger"
    }

    fn network(&self) -> &str {
        "mock-network"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(name: &str) -> NftMetadata {
        NftMetadata {
            name: name.to_string(),
            description: "test token".to_string(),
            attributes: vec![],
            image: None,
        }
    }

    #[tokio::test]
    async fn test_fungible_transfer_moves_balance() {
        let alice = Address::from("alice");
        let bob = Address::from("bob");
        let client =
            MockLedgerClient::new(alice.clone()).with_balance(alice.clone(), Decimal::from(100));

        let outcome = client
            .transfer_fungible(&bob, Decimal::from(30))
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.sender, alice);
        assert_eq!(outcome.recipient, bob);

        assert_eq!(
            client.fungible_balance(&alice).await.unwrap(),
            Decimal::from(70)
        );
        assert_eq!(
            client.fungible_balance(&bob).await.unwrap(),
            Decimal::from(30)
        );
    }

    #[tokio::test]
    async fn test_mint_and_transfer_nft() {
        let alice = Address::from("alice");
        let bob = Address::from("bob");
        let client = MockLedgerClient::new(alice.clone());

        client
            .mint_non_fungible(&alice, metadata("sword"))
            .await
            .unwrap();
        let owned = client.tokens_of(&alice).await.unwrap();
        assert_eq!(owned.len(), 1);
        let token_id = owned[0].id;

        client
            .transfer_non_fungible(&alice, &bob, token_id)
            .await
            .unwrap();
        assert_eq!(client.owner_of(token_id).await.unwrap(), bob);
        assert!(client.tokens_of(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_requires_ownership() {
        let alice = Address::from("alice");
        let bob = Address::from("bob");
        let client = MockLedgerClient::new(alice.clone());
        client.seed_nft(TokenId(7), alice.clone(), metadata("shield"));

        let err = client
            .transfer_non_fungible(&bob, &alice, TokenId(7))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotAuthorized(_)));
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot() {
        let alice = Address::from("alice");
        let bob = Address::from("bob");
        let client = MockLedgerClient::new(alice.clone());
        client.fail_next(FailPoint::TransferFungible);

        let err = client
            .transfer_fungible(&bob, Decimal::ONE)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::TransactionFailed(_)));

        // Next call succeeds
        client
            .transfer_fungible(&bob, Decimal::ONE)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_approval_is_recorded_and_cleared_on_transfer() {
        let alice = Address::from("alice");
        let market = Address::from("market-operator");
        let bob = Address::from("bob");
        let client = MockLedgerClient::new(alice.clone());
        client.seed_nft(TokenId(1), alice.clone(), metadata("ring"));

        client
            .approve_non_fungible(&market, TokenId(1))
            .await
            .unwrap();
        assert_eq!(client.approved_operator(TokenId(1)), Some(market));

        client
            .transfer_non_fungible(&alice, &bob, TokenId(1))
            .await
            .unwrap();
        assert_eq!(client.approved_operator(TokenId(1)), None);
    }
}
