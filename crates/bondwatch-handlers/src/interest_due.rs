//! Responds to interest-due triggers by calling distributeInterest().
//!
//! The distribution iterates over every bond holder, hence the higher
//! gas ceiling and the standard priority tier.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info};

use bondwatch_relayer::RelayerApi;
use bondwatch_types::{ResultEnvelope, Speed};

use crate::params::NotificationParams;
use crate::workflow::submit_action;
use crate::{ActionDescriptor, Handler, BOND_CONTRACT_ADDRESS, BOND_RELAYER_CHANNEL};

/// Selector for distributeInterest().
pub const DISTRIBUTE_INTEREST_SELECTOR: &str = "0x4e71d92d";

pub struct InterestDueHandler {
    descriptor: ActionDescriptor,
}

impl InterestDueHandler {
    /// Production descriptor: standard-priority distributeInterest()
    /// call with a 500k gas ceiling, confirmed before success is
    /// reported.
    pub fn new() -> Self {
        Self::with_descriptor(ActionDescriptor {
            action: "distributeInterest".to_string(),
            relayer: BOND_RELAYER_CHANNEL.to_string(),
            contract_address: BOND_CONTRACT_ADDRESS.to_string(),
            call_data: DISTRIBUTE_INTEREST_SELECTOR.to_string(),
            value: 0,
            gas_limit: 500_000,
            speed: Speed::Standard,
            confirm: true,
        })
    }

    pub fn with_descriptor(descriptor: ActionDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Default for InterestDueHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for InterestDueHandler {
    async fn dispatch(&self, api: &dyn RelayerApi, payload: &Value) -> ResultEnvelope {
        let params = NotificationParams::from_payload(payload);
        info!(title = %params.title, "interest payment trigger received");

        match submit_action(api, &self.descriptor).await {
            Ok(outcome) => ResultEnvelope::success(
                &self.descriptor.action,
                "Successfully distributed interest payments to all bond holders",
                &outcome.transaction_id,
                &self.descriptor.contract_address,
            )
            .with_extra("timestamp", json!(Utc::now().to_rfc3339())),
            Err(e) => {
                error!(error = %e, "failed to distribute interest");
                ResultEnvelope::failure(
                    &self.descriptor.action,
                    "Failed to distribute interest payments",
                    &e,
                )
            }
        }
    }
}
