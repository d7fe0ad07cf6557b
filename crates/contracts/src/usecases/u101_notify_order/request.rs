use serde::{Deserialize, Serialize};

/// Request to (re)send the notification for one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyOrderRequest {
    #[serde(rename = "orderId")]
    pub order_id: String,
}
