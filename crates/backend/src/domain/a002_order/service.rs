use super::repository;
use anyhow::Result;
use contracts::domain::a002_order::aggregate::{CreateOrderDto, Order, ValidationError};
use contracts::enums::order_status::OrderStatus;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::stores::{OrderStore, SqlOrderStore};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Validate and persist a new order. Fails fast: nothing is written unless
/// every field check passes. The total price is computed here, once, from
/// the submitted unit price and quantity.
pub async fn place_order(orders: &dyn OrderStore, dto: CreateOrderDto) -> Result<Order, IntakeError> {
    dto.validate()?;

    let order = Order::new_from_intake(&dto);
    orders.insert(&order).await?;

    tracing::info!(
        "Order {} created: {} × {} for {}",
        order.base.code,
        order.quantity,
        order.product_name,
        order.customer_name
    );

    Ok(order)
}

/// Production intake: persist through the SQL store, then hand the order id
/// to the notification dispatcher on a detached task. The caller gets the
/// created order as soon as persistence succeeds; whatever happens to the
/// notification afterwards is logged inside the task and never surfaces here.
pub async fn create(dto: CreateOrderDto) -> Result<Order, IntakeError> {
    let order = place_order(&SqlOrderStore, dto).await?;
    crate::usecases::u101_notify_order::spawn_dispatch(order.base.id.value());
    Ok(order)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Order>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<Order>> {
    repository::list_all().await
}

pub async fn update_status(id: Uuid, status: OrderStatus) -> Result<bool> {
    repository::update_status(id, status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryOrderStore {
        orders: Mutex<Vec<Order>>,
    }

    #[async_trait]
    impl OrderStore for InMemoryOrderStore {
        async fn insert(&self, order: &Order) -> Result<Uuid> {
            self.orders.lock().unwrap().push(order.clone());
            Ok(order.base.id.value())
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.base.id.value() == id)
                .cloned())
        }

        async fn set_notification_sent(&self, id: Uuid, sent: bool) -> Result<bool> {
            let mut orders = self.orders.lock().unwrap();
            match orders.iter_mut().find(|o| o.base.id.value() == id) {
                Some(order) => {
                    order.notification_sent = sent;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    fn dto() -> CreateOrderDto {
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

    #[tokio::test]
    async fn test_valid_intake_persists_pending_order() {
        let store = InMemoryOrderStore::default();
        let order = place_order(&store, dto()).await.unwrap();

        assert_eq!(order.total_price, 19.00);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.notification_sent);

        let persisted = store.orders.lock().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].base.id.value(), order.base.id.value());
    }

    #[tokio::test]
    async fn test_invalid_intake_persists_nothing() {
        let store = InMemoryOrderStore::default();
        let mut bad = dto();
        bad.customer_name = "".into();

        let err = place_order(&store, bad).await.unwrap_err();
        match err {
            IntakeError::Validation(v) => assert!(v.fields.contains_key("name")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_contact_is_field_keyed() {
        let store = InMemoryOrderStore::default();
        let mut bad = dto();
        bad.contact = "".into();

        let err = place_order(&store, bad).await.unwrap_err();
        match err {
            IntakeError::Validation(v) => {
                assert!(v.fields.contains_key("contact"));
                assert!(!v.fields.contains_key("name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.orders.lock().unwrap().is_empty());
    }
}
