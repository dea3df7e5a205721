//! Relayer client facade: the narrow interface through which handlers
//! reach the transaction-relaying service.
//!
//! - Resolve a named relaying channel (`RelayerApi`)
//! - Submit a transaction request (`RelayerChannel`)
//! - Await a confirmation receipt (`Submission`)
//!
//! Signing, broadcast, and gas pricing live behind this boundary; the
//! core only depends on the trait contracts.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use bondwatch_types::{BondwatchError, Result, TransactionReceipt, TransactionRequest};

pub mod http;
pub mod mock;

pub use http::HttpRelayerChannel;

/// Opaque handle for a submitted transaction.
///
/// The core treats this as a capability: it reads the identifier for
/// reporting and may block on `wait`, nothing more.
#[async_trait]
pub trait Submission: Send + Sync {
    /// Relayer-assigned transaction identifier.
    fn id(&self) -> &str;

    /// Block until the transaction reaches a terminal state.
    async fn wait(&self) -> Result<TransactionReceipt>;
}

/// A named transaction-relaying channel.
#[async_trait]
pub trait RelayerChannel: Send + Sync {
    async fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Box<dyn Submission>>;
}

/// Resolver for named relaying channels.
pub trait RelayerApi: Send + Sync {
    fn use_relayer(&self, name: &str) -> Result<Arc<dyn RelayerChannel>>;
}

/// Configuration for one named channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    pub base_url: String,
    pub relayer_id: String,
    pub api_key: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Relayer facade configuration: channel name to connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayerConfig {
    pub channels: HashMap<String, ChannelConfig>,
}

/// Name-indexed channel registry.
///
/// The concrete `RelayerApi` handed to handlers in production; tests
/// register `mock::MockChannel` instances instead.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, Arc<dyn RelayerChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    /// Build a registry of HTTP channels from configuration.
    pub fn from_config(config: &RelayerConfig) -> Self {
        let mut registry = Self::new();
        for (name, channel_config) in &config.channels {
            registry.register(name, Arc::new(HttpRelayerChannel::from_config(channel_config)));
        }
        registry
    }

    pub fn register(&mut self, name: &str, channel: Arc<dyn RelayerChannel>) {
        self.channels.insert(name.to_string(), channel);
    }
}

impl RelayerApi for ChannelRegistry {
    fn use_relayer(&self, name: &str) -> Result<Arc<dyn RelayerChannel>> {
        self.channels
            .get(name)
            .cloned()
            .ok_or_else(|| BondwatchError::UnknownChannel(name.to_string()))
    }
}
