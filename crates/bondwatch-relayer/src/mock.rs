//! In-memory relaying channel for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use bondwatch_types::{BondwatchError, Result, TransactionReceipt, TransactionRequest};

use crate::{RelayerChannel, Submission};

/// In-memory channel that records submitted requests.
///
/// Failure modes are injectable per instance: reject every submission,
/// or accept submissions but fail the confirmation wait.
pub struct MockChannel {
    requests: Mutex<Vec<TransactionRequest>>,
    next_id: Mutex<u64>,
    submit_error: Option<String>,
    confirm_error: Option<String>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
            submit_error: None,
            confirm_error: None,
        }
    }

    /// Channel whose `send_transaction` always fails with `message`.
    pub fn failing_submit(message: &str) -> Self {
        Self {
            submit_error: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Channel that accepts submissions but fails confirmation.
    pub fn failing_confirmation(message: &str) -> Self {
        Self {
            confirm_error: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Requests submitted so far, in order.
    pub fn submitted(&self) -> Vec<TransactionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayerChannel for MockChannel {
    async fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Box<dyn Submission>> {
        if let Some(message) = &self.submit_error {
            return Err(BondwatchError::Submission(message.clone()));
        }

        self.requests.lock().unwrap().push(request.clone());
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        Ok(Box::new(MockSubmission {
            id: format!("mock-tx-{}", *next_id),
            confirm_error: self.confirm_error.clone(),
        }))
    }
}

struct MockSubmission {
    id: String,
    confirm_error: Option<String>,
}

#[async_trait]
impl Submission for MockSubmission {
    fn id(&self) -> &str {
        &self.id
    }

    async fn wait(&self) -> Result<TransactionReceipt> {
        match &self.confirm_error {
            Some(message) => Err(BondwatchError::Confirmation(message.clone())),
            None => Ok(TransactionReceipt {
                id: self.id.clone(),
                status: "confirmed".to_string(),
                hash: Some(format!("0x{:064x}", 0xb0bd)),
                block_number: Some(1),
            }),
        }
    }
}
