//! HTTP channel for the transaction-relaying service.
//!
//! Endpoints:
//! - POST /api/v1/relayers/<relayer_id>/transactions
//! - GET  /api/v1/relayers/<relayer_id>/transactions/<tx_id>

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use bondwatch_types::{BondwatchError, Hex, Result, TransactionReceipt, TransactionRequest};

use crate::{ChannelConfig, RelayerChannel, Submission};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

/// Relaying service API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: Option<bool>,
    pub error: Option<String>,
    pub data: T,
}

/// Transaction state as reported by the relaying service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub id: String,
    pub status: String,
    pub hash: Option<Hex>,
    pub confirmed_at: Option<String>,
    pub block_number: Option<u64>,
}

/// Whether a reported status is terminal, and if so whether it succeeded.
pub fn terminal_outcome(status: &str) -> Option<bool> {
    match status {
        "confirmed" | "mined" => Some(true),
        "failed" | "canceled" | "expired" => Some(false),
        _ => None,
    }
}

/// Channel implementation backed by the relaying service's HTTP API.
#[derive(Clone)]
pub struct HttpRelayerChannel {
    base_url: String,
    relayer_id: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl HttpRelayerChannel {
    pub fn new(base_url: &str, relayer_id: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            relayer_id: relayer_id.to_string(),
            api_key: None,
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }

    pub fn from_config(config: &ChannelConfig) -> Self {
        let mut channel = Self::new(&config.base_url, &config.relayer_id, config.timeout_ms);
        channel.api_key = config.api_key.clone();
        channel
    }

    fn transactions_url(&self) -> String {
        format!(
            "{}/api/v1/relayers/{}/transactions",
            self.base_url, self.relayer_id
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Submit a transaction request to the relaying service.
    ///
    /// POST /api/v1/relayers/<relayer_id>/transactions
    pub async fn submit(&self, request: &TransactionRequest) -> Result<TransactionStatus> {
        let url = self.transactions_url();

        let resp = self
            .authorized(self.client.post(&url).json(request))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BondwatchError::Submission(format!("relayer request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(BondwatchError::Submission(format!(
                "relayer returned status {}: {}",
                status, body
            )));
        }

        let body: ApiResponse<TransactionStatus> = resp.json().await.map_err(|e| {
            BondwatchError::Submission(format!("failed to parse relayer response: {}", e))
        })?;

        Ok(body.data)
    }

    /// Fetch the current state of a submitted transaction.
    ///
    /// GET /api/v1/relayers/<relayer_id>/transactions/<tx_id>
    pub async fn get_status(&self, tx_id: &str) -> Result<TransactionStatus> {
        let url = format!("{}/{}", self.transactions_url(), tx_id);

        let resp = self
            .authorized(self.client.get(&url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BondwatchError::Confirmation(format!("relayer request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(BondwatchError::Confirmation(format!(
                "relayer returned status {}",
                resp.status()
            )));
        }

        let body: ApiResponse<TransactionStatus> = resp.json().await.map_err(|e| {
            BondwatchError::Confirmation(format!("failed to parse relayer response: {}", e))
        })?;

        Ok(body.data)
    }

    /// Poll for a terminal state, waiting between attempts.
    ///
    /// Timeout and revert both surface as a confirmation error; the
    /// transaction may still land on-chain afterwards, which the caller
    /// reports as a failure regardless.
    pub async fn wait_for_receipt(&self, tx_id: &str) -> Result<TransactionReceipt> {
        for attempt in 0..self.max_poll_attempts {
            let state = self.get_status(tx_id).await?;
            debug!(id = %tx_id, status = %state.status, attempt, "polled transaction status");

            match terminal_outcome(&state.status) {
                Some(true) => {
                    return Ok(TransactionReceipt {
                        id: state.id,
                        status: state.status,
                        hash: state.hash,
                        block_number: state.block_number,
                    });
                }
                Some(false) => {
                    return Err(BondwatchError::Confirmation(format!(
                        "transaction {} reached terminal status {}",
                        tx_id, state.status
                    )));
                }
                None => {}
            }

            if attempt + 1 < self.max_poll_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
        Err(BondwatchError::Confirmation(format!(
            "transaction {} not confirmed after {} attempts",
            tx_id, self.max_poll_attempts
        )))
    }
}

#[async_trait]
impl RelayerChannel for HttpRelayerChannel {
    async fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Box<dyn Submission>> {
        let state = self.submit(request).await?;
        Ok(Box::new(HttpSubmission {
            channel: self.clone(),
            id: state.id,
        }))
    }
}

struct HttpSubmission {
    channel: HttpRelayerChannel,
    id: String,
}

#[async_trait]
impl Submission for HttpSubmission {
    fn id(&self) -> &str {
        &self.id
    }

    async fn wait(&self) -> Result<TransactionReceipt> {
        self.channel.wait_for_receipt(&self.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_outcome_classification() {
        assert_eq!(terminal_outcome("confirmed"), Some(true));
        assert_eq!(terminal_outcome("mined"), Some(true));
        assert_eq!(terminal_outcome("failed"), Some(false));
        assert_eq!(terminal_outcome("canceled"), Some(false));
        assert_eq!(terminal_outcome("expired"), Some(false));
        assert_eq!(terminal_outcome("pending"), None);
        assert_eq!(terminal_outcome("submitted"), None);
    }

    #[test]
    fn test_parse_submit_response() {
        let body = r#"{
            "success": true,
            "error": null,
            "data": {
                "id": "3f0f86b2-27c6-4b5b-93a2-6dbf9eeb1c5a",
                "status": "pending",
                "hash": null,
                "confirmed_at": null,
                "block_number": null
            }
        }"#;
        let parsed: ApiResponse<TransactionStatus> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.id, "3f0f86b2-27c6-4b5b-93a2-6dbf9eeb1c5a");
        assert_eq!(parsed.data.status, "pending");
    }

    #[test]
    fn test_transactions_url() {
        let channel = HttpRelayerChannel::new("https://relayer.example.com/", "sepolia-1", None);
        assert_eq!(
            channel.transactions_url(),
            "https://relayer.example.com/api/v1/relayers/sepolia-1/transactions"
        );
    }
}
