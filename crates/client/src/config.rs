//! SDK configuration.

use std::env;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger network to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Local,
}

impl Network {
    pub fn default_rpc_url(&self) -> &str {
        match self {
            Network::Mainnet => "https://ethereum-rpc.publicnode.com",
            Network::Testnet => "https://ethereum-sepolia-rpc.publicnode.com",
            Network::Local => "http://127.0.0.1:8545",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Local => "local",
        }
    }
}

/// Fungible game token parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub initial_supply: Decimal,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Game Token".to_string(),
            symbol: "GAME".to_string(),
            initial_supply: Decimal::from(1_000_000),
        }
    }
}

/// NFT collection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftConfig {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub max_supply: u64,
}

impl Default for NftConfig {
    fn default() -> Self {
        Self {
            name: "Game Collectible".to_string(),
            symbol: "GNFT".to_string(),
            base_uri: "https://metadata.example/".to_string(),
            max_supply: 10_000,
        }
    }
}

/// SDK-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Network to connect to
    pub network: Network,

    /// Custom RPC endpoint URL (overrides network default)
    pub rpc_url: Option<String>,

    /// Session wallet address all calls are bound to
    pub wallet_address: String,

    /// Marketplace operating address, authorized to move escrowed NFTs
    pub operator_address: String,

    pub token: TokenConfig,
    pub nft: NftConfig,
}

impl SdkConfig {
    pub fn new(
        network: Network,
        wallet_address: impl Into<String>,
        operator_address: impl Into<String>,
    ) -> Self {
        Self {
            network,
            rpc_url: None,
            wallet_address: wallet_address.into(),
            operator_address: operator_address.into(),
            token: TokenConfig::default(),
            nft: NftConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file if present. Environment variables:
    /// - `CRYPTOPLAY_NETWORK` - mainnet, testnet, or local (default: testnet)
    /// - `CRYPTOPLAY_RPC_URL` - custom RPC endpoint URL
    /// - `CRYPTOPLAY_WALLET_ADDRESS` - session wallet address (required)
    /// - `CRYPTOPLAY_OPERATOR_ADDRESS` - marketplace operator address (required)
    /// - `CRYPTOPLAY_TOKEN_NAME` / `CRYPTOPLAY_TOKEN_SYMBOL` /
    ///   `CRYPTOPLAY_TOKEN_SUPPLY`
    /// - `CRYPTOPLAY_NFT_NAME` / `CRYPTOPLAY_NFT_SYMBOL` /
    ///   `CRYPTOPLAY_NFT_BASE_URI` / `CRYPTOPLAY_NFT_MAX_SUPPLY`
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let network = match env::var("CRYPTOPLAY_NETWORK")
            .unwrap_or_else(|_| "testnet".to_string())
            .to_lowercase()
            .as_str()
        {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            "local" => Network::Local,
            other => {
                return Err(format!(
                    "Invalid CRYPTOPLAY_NETWORK: {other}. Must be mainnet, testnet, or local"
                ));
            }
        };

        let wallet_address = env::var("CRYPTOPLAY_WALLET_ADDRESS")
            .map_err(|_| "CRYPTOPLAY_WALLET_ADDRESS is required".to_string())?;
        let operator_address = env::var("CRYPTOPLAY_OPERATOR_ADDRESS")
            .map_err(|_| "CRYPTOPLAY_OPERATOR_ADDRESS is required".to_string())?;

        let mut config = Self::new(network, wallet_address, operator_address);
        config.rpc_url = env::var("CRYPTOPLAY_RPC_URL").ok();

        if let Ok(name) = env::var("CRYPTOPLAY_TOKEN_NAME") {
            config.token.name = name;
        }
        if let Ok(symbol) = env::var("CRYPTOPLAY_TOKEN_SYMBOL") {
            config.token.symbol = symbol;
        }
        if let Ok(supply) = env::var("CRYPTOPLAY_TOKEN_SUPPLY") {
            config.token.initial_supply = supply
                .parse()
                .map_err(|_| format!("Invalid CRYPTOPLAY_TOKEN_SUPPLY: {supply}"))?;
        }
        if let Ok(name) = env::var("CRYPTOPLAY_NFT_NAME") {
            config.nft.name = name;
        }
        if let Ok(symbol) = env::var("CRYPTOPLAY_NFT_SYMBOL") {
            config.nft.symbol = symbol;
        }
        if let Ok(base_uri) = env::var("CRYPTOPLAY_NFT_BASE_URI") {
            config.nft.base_uri = base_uri;
        }
        if let Ok(max_supply) = env::var("CRYPTOPLAY_NFT_MAX_SUPPLY") {
            config.nft.max_supply = max_supply
                .parse()
                .map_err(|_| format!("Invalid CRYPTOPLAY_NFT_MAX_SUPPLY: {max_supply}"))?;
        }

        Ok(config)
    }

    /// Set custom RPC URL.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Set token parameters.
    pub fn with_token(mut self, token: TokenConfig) -> Self {
        self.token = token;
        self
    }

    /// Set NFT collection parameters.
    pub fn with_nft(mut self, nft: NftConfig) -> Self {
        self.nft = nft;
        self
    }

    /// Get the RPC URL (custom or default for network).
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = self.rpc_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("Invalid RPC URL format: {url}"));
        }

        if self.wallet_address.is_empty() {
            return Err("Wallet address cannot be empty".to_string());
        }
        if self.operator_address.is_empty() {
            return Err("Operator address cannot be empty".to_string());
        }

        if self.token.symbol.is_empty() {
            return Err("Token symbol cannot be empty".to_string());
        }
        if self.token.initial_supply < Decimal::ZERO {
            return Err("Token initial supply cannot be negative".to_string());
        }
        if self.nft.max_supply == 0 {
            return Err("NFT max supply must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SdkConfig::new(Network::Testnet, "0xwallet", "0xoperator");
        assert!(config.validate().is_ok());
        assert_eq!(config.rpc_url(), Network::Testnet.default_rpc_url());
    }

    #[test]
    fn test_custom_rpc_url_overrides_default() {
        let config = SdkConfig::new(Network::Local, "0xwallet", "0xoperator")
            .with_rpc_url("http://localhost:9999");
        assert_eq!(config.rpc_url(), "http://localhost:9999");
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = SdkConfig::new(Network::Testnet, "", "0xoperator");
        assert!(config.validate().is_err());

        let config =
            SdkConfig::new(Network::Testnet, "0xwallet", "0xoperator").with_rpc_url("ftp://nope");
        assert!(config.validate().is_err());

        let mut config = SdkConfig::new(Network::Testnet, "0xwallet", "0xoperator");
        config.nft.max_supply = 0;
        assert!(config.validate().is_err());
    }
}
