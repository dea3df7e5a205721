//! Shared submit-and-confirm workflow backing every handler.
//!
//! One invocation runs the sequence resolve channel, build request,
//! submit, optionally await confirmation. Exactly one submission is
//! issued per invocation; webhook redelivery is the monitoring
//! system's retry mechanism, not ours.

use tracing::info;

use bondwatch_relayer::RelayerApi;
use bondwatch_types::{Result, TransactionRequest};

use crate::ActionDescriptor;

/// Outcome of one successful submission.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub transaction_id: String,
}

/// Build the descriptor's fixed transaction request.
///
/// Deterministic in the descriptor alone; no payload data enters here.
pub fn build_request(descriptor: &ActionDescriptor) -> TransactionRequest {
    TransactionRequest {
        to: descriptor.contract_address.clone(),
        data: descriptor.call_data.clone(),
        value: descriptor.value,
        gas_limit: descriptor.gas_limit,
        speed: descriptor.speed,
    }
}

/// Resolve the channel, submit the descriptor's call, and (when the
/// descriptor asks for it) block until the transaction is confirmed.
///
/// Any error along the way surfaces as `Err`; the calling handler maps
/// it into a failure envelope. A confirmation failure after a
/// successful submit is still an `Err`: no partial-success state is
/// ever reported, even though the transaction may land later.
pub async fn submit_action(
    api: &dyn RelayerApi,
    descriptor: &ActionDescriptor,
) -> Result<ActionOutcome> {
    descriptor.validate()?;
    let channel = api.use_relayer(&descriptor.relayer)?;

    let request = build_request(descriptor);
    info!(
        action = %descriptor.action,
        to = %request.to,
        gas_limit = request.gas_limit,
        "submitting transaction"
    );

    let submission = channel.send_transaction(&request).await?;
    let transaction_id = submission.id().to_string();
    info!(action = %descriptor.action, id = %transaction_id, "transaction submitted");

    if descriptor.confirm {
        let receipt = submission.wait().await?;
        info!(
            action = %descriptor.action,
            id = %transaction_id,
            status = %receipt.status,
            "transaction confirmed"
        );
    }

    Ok(ActionOutcome { transaction_id })
}
