use crate::domain::common::{AggregateId, BaseAggregate};
use crate::enums::order_status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
pub const MAX_CONTACT_LEN: usize = 255;
pub const MAX_MESSAGE_LEN: usize = 1000;

// ============================================================================
// ID Type
// ============================================================================

/// Unique order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A customer order. The product name and total price are snapshotted at
/// creation time: they stay as they were even if the product is later edited
/// or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub base: BaseAggregate<OrderId>,

    #[serde(rename = "customerName")]
    pub customer_name: String,

    /// Free-text contact: phone, email or messenger handle
    #[serde(rename = "customerContact")]
    pub customer_contact: String,

    /// Optional note from the customer
    pub message: Option<String>,

    /// Reference to the ordered product; None once the product is gone
    #[serde(rename = "productRef")]
    pub product_ref: Option<String>,

    #[serde(rename = "productName")]
    pub product_name: String,

    pub quantity: u32,

    /// unit price × quantity, fixed at creation and never recomputed
    #[serde(rename = "totalPrice")]
    pub total_price: f64,

    pub status: OrderStatus,

    /// Whether the outbound notification was delivered for this order
    #[serde(rename = "notificationSent")]
    pub notification_sent: bool,
}

impl Order {
    /// Build a new order from validated intake input. Computes the total
    /// price snapshot and starts the lifecycle as pending / not notified.
    pub fn new_from_intake(dto: &CreateOrderDto) -> Self {
        let id = OrderId::new_v4();
        let code = format!("ORD-{}", &id.as_string()[..8]);
        let description = format!("{} × {}", dto.quantity, dto.product_name);
        let base = BaseAggregate::new(id, code, description);

        Self {
            base,
            customer_name: dto.customer_name.trim().to_string(),
            customer_contact: dto.contact.trim().to_string(),
            message: dto
                .message
                .as_ref()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            product_ref: Some(dto.product_id.clone()),
            product_name: dto.product_name.clone(),
            quantity: dto.quantity,
            total_price: dto.unit_price * dto.quantity as f64,
            status: OrderStatus::Pending,
            notification_sent: false,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

// ============================================================================
// Intake DTO + validation
// ============================================================================

/// Field-keyed validation failure. Keys match the public form field names
/// (`name`, `contact`, `message`, `quantity`), not the struct field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub fields: BTreeMap<String, String>,
}

impl ValidationError {
    fn add(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Order intake request, as submitted by the storefront order form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    pub customer_name: String,
    pub contact: String,
    pub message: Option<String>,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl CreateOrderDto {
    /// Check every field and collect all failures at once. No order may be
    /// created while this returns Err.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError {
            fields: BTreeMap::new(),
        };

        let name = self.customer_name.trim();
        if name.is_empty() {
            err.add("name", "Name is required");
        } else if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
            err.add("name", "Name too long");
        }

        let contact = self.contact.trim();
        if contact.is_empty() {
            err.add("contact", "Contact is required");
        } else if contact.chars().count() > MAX_CONTACT_LEN {
            err.add("contact", "Contact too long");
        }

        if let Some(message) = &self.message {
            if message.chars().count() > MAX_MESSAGE_LEN {
                err.add("message", "Message too long");
            }
        }

        if self.quantity == 0 {
            err.add("quantity", "Quantity must be at least 1");
        }

        if err.fields.is_empty() {
            Ok(())
        } else {
            Err(err)
        }
    }
}

/// Admin request to move an order through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusDto {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateOrderDto {
        CreateOrderDto {
            customer_name: "Ana".into(),
            contact: "ana@x.com".into(),
            message: None,
            product_id: "p1".into(),
            product_name: "Mug".into(),
            quantity: 2,
            unit_price: 9.5,
        }
    }

    #[test]
    fn test_valid_dto_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_total_price_is_unit_price_times_quantity() {
        let order = Order::new_from_intake(&valid_dto());
        assert_eq!(order.total_price, 19.00);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.notification_sent);
        assert_eq!(order.product_name, "Mug");
        assert_eq!(order.product_ref.as_deref(), Some("p1"));
    }

    #[test]
    fn test_empty_name_is_rejected_with_field_key() {
        let mut dto = valid_dto();
        dto.customer_name = "".into();
        let err = dto.validate().unwrap_err();
        assert!(err.fields.contains_key("name"));
        assert!(!err.fields.contains_key("contact"));
    }

    #[test]
    fn test_whitespace_only_contact_is_rejected() {
        let mut dto = valid_dto();
        dto.contact = "   ".into();
        let err = dto.validate().unwrap_err();
        assert!(err.fields.contains_key("contact"));
    }

    #[test]
    fn test_overlong_fields_are_rejected() {
        let mut dto = valid_dto();
        dto.customer_name = "x".repeat(MAX_CUSTOMER_NAME_LEN + 1);
        dto.contact = "y".repeat(MAX_CONTACT_LEN + 1);
        dto.message = Some("z".repeat(MAX_MESSAGE_LEN + 1));
        let err = dto.validate().unwrap_err();
        assert_eq!(err.fields.len(), 3);
        assert!(err.fields.contains_key("name"));
        assert!(err.fields.contains_key("contact"));
        assert!(err.fields.contains_key("message"));
    }

    #[test]
    fn test_boundary_lengths_are_accepted() {
        let mut dto = valid_dto();
        dto.customer_name = "x".repeat(MAX_CUSTOMER_NAME_LEN);
        dto.contact = "y".repeat(MAX_CONTACT_LEN);
        dto.message = Some("z".repeat(MAX_MESSAGE_LEN));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut dto = valid_dto();
        dto.quantity = 0;
        let err = dto.validate().unwrap_err();
        assert!(err.fields.contains_key("quantity"));
    }

    #[test]
    fn test_blank_message_is_normalized_to_none() {
        let mut dto = valid_dto();
        dto.message = Some("   ".into());
        let order = Order::new_from_intake(&dto);
        assert!(order.message.is_none());
    }

    #[test]
    fn test_intake_dto_uses_camel_case_keys() {
        let dto: CreateOrderDto = serde_json::from_str(
            r#"{"customerName":"Ana","contact":"ana@x.com","productId":"p1",
                "productName":"Mug","quantity":2,"unitPrice":9.5}"#,
        )
        .unwrap();
        assert_eq!(dto.customer_name, "Ana");
        assert_eq!(dto.unit_price, 9.5);
        assert!(dto.message.is_none());
    }
}
