use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 0x-prefixed hex string (e.g. "0x1234...").
pub type Hex = String;

/// 0x-prefixed EVM address string (20 bytes).
pub type Address = String;

/// Bondwatch error types.
#[derive(Debug, Error)]
pub enum BondwatchError {
    #[error("unknown relayer channel: {0}")]
    UnknownChannel(String),

    #[error("channel unavailable: {0}")]
    ChannelUnavailable(String),

    #[error("submission rejected: {0}")]
    Submission(String),

    #[error("confirmation failed: {0}")]
    Confirmation(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid action descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BondwatchError>;

/// Submission urgency tier understood by the relaying service.
///
/// Influences how aggressively the service prices and schedules the
/// transaction. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Standard,
    Fast,
}

/// Transaction request submitted through a relaying channel.
///
/// Built deterministically from a handler's action descriptor; webhook
/// payload contents never flow into `to` or `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: Address,
    pub data: Hex,
    pub value: u64,
    pub gas_limit: u64,
    pub speed: Speed,
}

/// Confirmation receipt returned once a submitted transaction reaches a
/// terminal state at the relaying service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub id: String,
    pub status: String,
    pub hash: Option<Hex>,
    pub block_number: Option<u64>,
}

/// Uniform outcome record returned by every handler invocation.
///
/// Constructed exactly once per invocation, immediately before return,
/// and never mutated afterwards. Serializes camelCase for the
/// monitoring/alerting infrastructure that consumes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub success: bool,
    pub action: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Action-specific reporting fields (e.g. the observed transfer that
    /// triggered an emergency pause).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResultEnvelope {
    /// Envelope for a confirmed, successfully submitted action.
    pub fn success(
        action: &str,
        message: &str,
        transaction_id: &str,
        contract_address: &str,
    ) -> Self {
        Self {
            success: true,
            action: action.to_string(),
            message: message.to_string(),
            transaction_id: Some(transaction_id.to_string()),
            contract_address: Some(contract_address.to_string()),
            error: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Envelope for a failed invocation.
    ///
    /// Carries the error's message text, never the fault object itself.
    pub fn failure(action: &str, message: &str, error: &BondwatchError) -> Self {
        Self {
            success: false,
            action: action.to_string(),
            message: message.to_string(),
            transaction_id: None,
            contract_address: None,
            error: Some(error.to_string()),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an action-specific reporting field.
    pub fn with_extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

/// Parse a hex string to a big-endian byte array.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(hex_str).map_err(|e| BondwatchError::InvalidHex(e.to_string()))
}

/// Convert bytes to a 0x-prefixed hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
