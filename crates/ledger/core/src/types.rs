//! Common types for ledger interactions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// On-ledger account address.
///
/// Stored as the ledger's canonical string form. Each ledger uses its own
/// format (hex for EVM-style chains, base58 elsewhere); this layer treats
/// addresses as opaque identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

/// Identifier of a single token within the NFT collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Generic transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(pub Vec<u8>);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Result record returned by a ledger call once observably finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    /// Transaction identifier on the ledger
    pub transaction_id: TransactionId,

    /// Block containing the transaction
    pub block_number: u64,

    /// Sender address
    pub sender: Address,

    /// Recipient address
    pub recipient: Address,

    /// Whether the transaction executed successfully
    pub success: bool,
}

/// A single trait entry in NFT metadata.
///
/// Values may be strings or numbers, so they are kept as raw JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

/// Off-chain metadata describing one NFT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub attributes: Vec<NftAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An NFT together with its identifier, as returned by ownership queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedNft {
    pub id: TokenId,
    pub metadata: NftMetadata,
}
