use serde::{Deserialize, Serialize};

/// Wire response of the notify-order endpoint.
///
/// Serializes as `{"success": true}` when a message went out and as
/// `{"message": "not configured"}` when the Telegram credentials are absent
/// (which is a deliberate no-op, not an error).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotifyOrderResponse {
    Delivered { success: bool },
    NotConfigured { message: String },
}

impl NotifyOrderResponse {
    pub fn delivered() -> Self {
        Self::Delivered { success: true }
    }

    pub fn not_configured() -> Self {
        Self::NotConfigured {
            message: "not configured".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shapes() {
        let delivered = serde_json::to_value(NotifyOrderResponse::delivered()).unwrap();
        assert_eq!(delivered, serde_json::json!({"success": true}));

        let skipped = serde_json::to_value(NotifyOrderResponse::not_configured()).unwrap();
        assert_eq!(skipped, serde_json::json!({"message": "not configured"}));
    }
}
