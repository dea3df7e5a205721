//! Parameter normalization for loosely structured webhook payloads.
//!
//! The monitoring system enforces no schema upstream: a field may sit
//! at the top level, nested under a wrapper key, or be absent entirely.
//! Extraction never fails; per field the precedence is direct top-level
//! value, then nested wrapper value, then a fixed placeholder.

use serde_json::Value;
use tracing::debug;

/// Placeholder substituted for any absent field.
pub const UNKNOWN: &str = "unknown";

fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lookup(payload: &Value, wrappers: &[&str], field: &str) -> String {
    payload
        .get(field)
        .and_then(coerce)
        .or_else(|| {
            wrappers
                .iter()
                .find_map(|wrapper| payload.get(wrapper)?.get(field).and_then(coerce))
        })
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Notification fields the monitor attaches to every webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationParams {
    pub title: String,
    pub body: String,
}

impl NotificationParams {
    pub fn from_payload(payload: &Value) -> Self {
        debug!(payload = %payload, "normalizing notification params");
        Self {
            title: lookup(payload, &["message"], "title"),
            body: lookup(payload, &["message"], "body"),
        }
    }
}

/// Observed transfer details carried by a large-transfer alert.
///
/// Reporting context only; these values never reach the transaction
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferParams {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl TransferParams {
    pub fn from_payload(payload: &Value) -> Self {
        debug!(payload = %payload, "normalizing transfer params");
        Self {
            from: lookup(payload, &["event", "message"], "from"),
            to: lookup(payload, &["event", "message"], "to"),
            amount: lookup(payload, &["event", "message"], "amount"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_payload() {
        let params = NotificationParams::from_payload(&json!({
            "title": "Pause detected",
            "body": "contract paused at block 100"
        }));
        assert_eq!(params.title, "Pause detected");
        assert_eq!(params.body, "contract paused at block 100");
    }

    #[test]
    fn test_wrapper_nested_payload() {
        let params = NotificationParams::from_payload(&json!({
            "message": { "title": "nested", "body": "also nested" }
        }));
        assert_eq!(params.title, "nested");
        assert_eq!(params.body, "also nested");
    }

    #[test]
    fn test_top_level_wins_over_nested() {
        let params = NotificationParams::from_payload(&json!({
            "title": "top",
            "message": { "title": "nested", "body": "nested body" }
        }));
        assert_eq!(params.title, "top");
        assert_eq!(params.body, "nested body");
    }

    #[test]
    fn test_empty_payload_defaults_every_field() {
        let params = NotificationParams::from_payload(&json!({}));
        assert_eq!(params.title, UNKNOWN);
        assert_eq!(params.body, UNKNOWN);

        let transfer = TransferParams::from_payload(&json!({}));
        assert_eq!(transfer.from, UNKNOWN);
        assert_eq!(transfer.to, UNKNOWN);
        assert_eq!(transfer.amount, UNKNOWN);
    }

    #[test]
    fn test_transfer_event_wrapper() {
        let params = TransferParams::from_payload(&json!({
            "event": { "from": "0xA", "to": "0xB", "amount": "999999" }
        }));
        assert_eq!(params.from, "0xA");
        assert_eq!(params.to, "0xB");
        assert_eq!(params.amount, "999999");
    }

    #[test]
    fn test_numeric_amount_is_stringified() {
        let params = TransferParams::from_payload(&json!({
            "event": { "amount": 999999 }
        }));
        assert_eq!(params.amount, "999999");
        assert_eq!(params.from, UNKNOWN);
    }

    #[test]
    fn test_non_coercible_field_falls_back() {
        let params = NotificationParams::from_payload(&json!({
            "title": { "unexpected": "object" },
            "message": { "title": "fallback" }
        }));
        assert_eq!(params.title, "fallback");
    }
}
