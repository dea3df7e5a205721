//! Responds to pause events by sending unpause().
//!
//! An automatic recovery action: the monitor reports that the bond
//! contract was paused and this handler immediately lifts the pause.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};

use bondwatch_relayer::RelayerApi;
use bondwatch_types::{ResultEnvelope, Speed};

use crate::params::NotificationParams;
use crate::workflow::submit_action;
use crate::{ActionDescriptor, Handler, BOND_CONTRACT_ADDRESS, BOND_RELAYER_CHANNEL};

/// Selector for unpause().
pub const UNPAUSE_SELECTOR: &str = "0x3f4ba83a";

pub struct PauseEventHandler {
    descriptor: ActionDescriptor,
}

impl PauseEventHandler {
    /// Production descriptor: fast unpause() call against the bond
    /// contract, confirmed before success is reported.
    pub fn new() -> Self {
        Self::with_descriptor(ActionDescriptor {
            action: "unpause".to_string(),
            relayer: BOND_RELAYER_CHANNEL.to_string(),
            contract_address: BOND_CONTRACT_ADDRESS.to_string(),
            call_data: UNPAUSE_SELECTOR.to_string(),
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

impl Default for PauseEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for PauseEventHandler {
    async fn dispatch(&self, api: &dyn RelayerApi, payload: &Value) -> ResultEnvelope {
        let params = NotificationParams::from_payload(payload);
        info!(title = %params.title, body = %params.body, "pause event received");

        match submit_action(api, &self.descriptor).await {
            Ok(outcome) => ResultEnvelope::success(
                &self.descriptor.action,
                "Successfully sent unpause() transaction in response to pause event",
                &outcome.transaction_id,
                &self.descriptor.contract_address,
            ),
            Err(e) => {
                error!(error = %e, "failed to send unpause transaction");
                ResultEnvelope::failure(
                    &self.descriptor.action,
                    "Failed to send unpause transaction",
                    &e,
                )
            }
        }
    }
}
