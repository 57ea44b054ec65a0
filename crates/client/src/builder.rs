//! Client builder with dependency injection pattern.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use ledger_core::LedgerGateway;

use crate::client::CryptoPlay;
use crate::config::SdkConfig;
use crate::events::EventHub;

/// Builder for constructing a [`CryptoPlay`] client with proper validation.
///
/// # Design Principles
///
/// - **Required fields**: gateway and configuration must be provided
/// - **Fail-fast validation**: a missing field or invalid configuration
///   causes build() to fail
/// - **Fluent API**: chainable methods for ergonomic construction
pub struct ClientBuilder<G> {
    gateway: Option<Arc<G>>,
    config: Option<SdkConfig>,
    event_capacity: usize,
}

impl<G> Default for ClientBuilder<G> {
    fn default() -> Self {
        Self {
            gateway: None,
            config: None,
            event_capacity: 100,
        }
    }
}

impl<G: LedgerGateway> ClientBuilder<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ledger gateway (required).
    pub fn gateway(mut self, gateway: Arc<G>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Set the SDK configuration (required).
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Capacity of each event topic channel.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway or configuration is missing, or if
    /// the configuration fails validation.
    pub fn build(self) -> Result<CryptoPlay<G>> {
        let gateway = self
            .gateway
            .context("Gateway is required. Use .gateway() to set it.")?;
        let config = self
            .config
            .context("Configuration is required. Use .config() to set it.")?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

        tracing::info!(
            ledger = gateway.name(),
            network = gateway.network(),
            wallet = %config.wallet_address,
            "client configured",
        );

        Ok(CryptoPlay::new(
            gateway,
            config,
            EventHub::with_capacity(self.event_capacity),
        ))
    }
}
