//! Responds to large-transfer alerts by pausing the contract.
//!
//! A damage-control action. The observed transfer's recipient and
//! amount are echoed in the envelope for downstream alerting but are
//! never encoded into the transaction itself.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, warn};

use bondwatch_relayer::RelayerApi;
use bondwatch_types::{ResultEnvelope, Speed};

use crate::params::TransferParams;
use crate::workflow::submit_action;
use crate::{ActionDescriptor, Handler, BOND_CONTRACT_ADDRESS, BOND_RELAYER_CHANNEL};

/// Selector for pause().
pub const PAUSE_SELECTOR: &str = "0x8456cb59";

pub struct LargeTransferHandler {
    descriptor: ActionDescriptor,
}

impl LargeTransferHandler {
    /// Production descriptor: fast emergency pause() call, confirmed
    /// before success is reported.
    pub fn new() -> Self {
        Self::with_descriptor(ActionDescriptor {
            action: "EMERGENCY_PAUSE".to_string(),
            relayer: BOND_RELAYER_CHANNEL.to_string(),
            contract_address: BOND_CONTRACT_ADDRESS.to_string(),
            call_data: PAUSE_SELECTOR.to_string(),
            value: 0,
            gas_limit: 100_000,
            speed: Speed::Fast,
            confirm: true,
        })
    }

    pub fn with_descriptor(descriptor: ActionDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Default for LargeTransferHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for LargeTransferHandler {
    async fn dispatch(&self, api: &dyn RelayerApi, payload: &Value) -> ResultEnvelope {
        let params = TransferParams::from_payload(payload);
        warn!(
            amount = %params.amount,
            to = %params.to,
            "large transfer detected, pausing contract"
        );

        match submit_action(api, &self.descriptor).await {
            Ok(outcome) => ResultEnvelope::success(
                &self.descriptor.action,
                "Contract paused. Compliance team notified. Manual review required.",
                &outcome.transaction_id,
                &self.descriptor.contract_address,
            )
            .with_extra(
                "reason",
                json!("Large transfer detected - contract paused to prevent additional transfers"),
            )
            .with_extra(
                "suspiciousTransfer",
                json!({ "to": params.to, "amount": params.amount }),
            ),
            Err(e) => {
                error!(error = %e, "failed to pause contract");
                ResultEnvelope::failure(
                    &self.descriptor.action,
                    "Failed to pause contract - MANUAL INTERVENTION REQUIRED",
                    &e,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondwatch_relayer::mock::MockChannel;
    use bondwatch_relayer::ChannelRegistry;
    use std::sync::Arc;

    fn registry_with(channel: Arc<MockChannel>) -> ChannelRegistry {
        let mut registry = ChannelRegistry::new();
        registry.register(BOND_RELAYER_CHANNEL, channel);
        registry
    }

    #[tokio::test]
    async fn test_suspicious_transfer_echoed_in_envelope() {
        let channel = Arc::new(MockChannel::new());
        let registry = registry_with(channel.clone());

        let payload = json!({
            "event": { "from": "0xA", "to": "0xB", "amount": "999999" }
        });
        let envelope = LargeTransferHandler::new()
            .dispatch(&registry, &payload)
            .await;

        assert!(envelope.success);
        assert_eq!(envelope.action, "EMERGENCY_PAUSE");
        assert_eq!(
            envelope.extra["suspiciousTransfer"],
            json!({ "to": "0xB", "amount": "999999" })
        );

        // The observed transfer must never reach the encoded call.
        let submitted = channel.submitted();
        assert_eq!(submitted[0].to, BOND_CONTRACT_ADDRESS);
        assert_eq!(submitted[0].data, PAUSE_SELECTOR);
        assert_eq!(submitted[0].value, 0);
    }

    #[tokio::test]
    async fn test_missing_transfer_fields_default() {
        let channel = Arc::new(MockChannel::new());
        let registry = registry_with(channel);

        let envelope = LargeTransferHandler::new()
            .dispatch(&registry, &json!({}))
            .await;

        assert!(envelope.success);
        assert_eq!(
            envelope.extra["suspiciousTransfer"],
            json!({ "to": "unknown", "amount": "unknown" })
        );
    }

    #[tokio::test]
    async fn test_submission_rejection_flags_manual_intervention() {
        let channel = Arc::new(MockChannel::failing_submit("relayer unavailable"));
        let registry = registry_with(channel);

        let envelope = LargeTransferHandler::new()
            .dispatch(&registry, &json!({}))
            .await;

        assert!(!envelope.success);
        assert_eq!(envelope.action, "EMERGENCY_PAUSE");
        assert_eq!(
            envelope.message,
            "Failed to pause contract - MANUAL INTERVENTION REQUIRED"
        );
        assert_eq!(
            envelope.error.as_deref(),
            Some("submission rejected: relayer unavailable")
        );
    }
}
