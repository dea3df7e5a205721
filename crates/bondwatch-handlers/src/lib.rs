//! Webhook-triggered action handlers for the Acme bond contract.
//!
//! External monitoring infrastructure detects on-chain conditions (a
//! pause event, a large transfer, an interest-due trigger) and invokes
//! a handler with a loosely structured payload. Each handler submits a
//! fixed contract call through the relayer facade and reports the
//! outcome as a `ResultEnvelope`. No fault ever escapes a dispatch:
//! every code path terminates in exactly one envelope.

use async_trait::async_trait;
use serde_json::Value;

use bondwatch_relayer::RelayerApi;
use bondwatch_types::{hex_to_bytes, BondwatchError, Address, Hex, Result, ResultEnvelope, Speed};

pub mod interest_due;
pub mod large_transfer;
pub mod params;
pub mod pause_event;
pub mod workflow;

pub use interest_due::InterestDueHandler;
pub use large_transfer::LargeTransferHandler;
pub use pause_event::PauseEventHandler;

/// The bond contract all production descriptors target.
pub const BOND_CONTRACT_ADDRESS: &str = "0xB9A538E720f7C05a7A4747A484C231c956920bef";

/// Name of the relaying channel configured for the bond contract.
pub const BOND_RELAYER_CHANNEL: &str = "acme-bond-sepolia";

/// Fixed contract-call configuration for one handler.
///
/// Descriptors are static by design: webhook payload contents never
/// flow into `contract_address`, `call_data`, or `value`, so a
/// malicious payload cannot redirect the encoded call. Payload data
/// only ever reaches the envelope's reporting fields.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    /// Action name reported in every envelope for this handler.
    pub action: String,
    /// Relaying channel to resolve at dispatch time.
    pub relayer: String,
    pub contract_address: Address,
    /// ABI-encoded selector (plus arguments, if any) for the target call.
    pub call_data: Hex,
    pub value: u64,
    /// Conservative per-action gas ceiling.
    pub gas_limit: u64,
    pub speed: Speed,
    /// Block on the confirmation wait before reporting success.
    pub confirm: bool,
}

impl ActionDescriptor {
    /// Check the descriptor's address and call data are well-formed hex.
    pub fn validate(&self) -> Result<()> {
        let address = hex_to_bytes(&self.contract_address)?;
        if address.len() != 20 {
            return Err(BondwatchError::InvalidDescriptor(format!(
                "contract address must be 20 bytes, got {}",
                address.len()
            )));
        }
        let call_data = hex_to_bytes(&self.call_data)?;
        if call_data.len() < 4 {
            return Err(BondwatchError::InvalidDescriptor(
                "call data must carry at least a 4-byte selector".to_string(),
            ));
        }
        Ok(())
    }
}

/// One webhook-triggered action handler.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Execute one detect-act-report cycle.
    ///
    /// Never fails: channel resolution errors, submission rejections,
    /// and confirmation failures all come back as a failure-shaped
    /// envelope.
    async fn dispatch(&self, api: &dyn RelayerApi, payload: &Value) -> ResultEnvelope;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ActionDescriptor {
        ActionDescriptor {
            action: "unpause".to_string(),
            relayer: BOND_RELAYER_CHANNEL.to_string(),
            contract_address: BOND_CONTRACT_ADDRESS.to_string(),
            call_data: "0x3f4ba83a".to_string(),
            value: 0,
            gas_limit: 100_000,
            speed: Speed::Fast,
            confirm: true,
        }
    }

    #[test]
    fn test_descriptor_validates() {
        assert!(descriptor().validate().is_ok());
    }

    #[test]
    fn test_descriptor_rejects_short_address() {
        let mut d = descriptor();
        d.contract_address = "0xB9A5".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_descriptor_rejects_truncated_selector() {
        let mut d = descriptor();
        d.call_data = "0x3f4b".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_descriptor_rejects_bad_hex() {
        let mut d = descriptor();
        d.call_data = "0xnothex".to_string();
        assert!(d.validate().is_err());
    }
}
