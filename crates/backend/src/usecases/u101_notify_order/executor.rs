use contracts::domain::common::AggregateId;
use thiserror::Error;
use uuid::Uuid;

use super::message;
use crate::shared::stores::{MessagingClient, OrderStore, ProductStore, SettingsStore};

/// How a dispatch invocation ended, short of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A message reached Telegram (photo or text fallback)
    Delivered,
    /// Credentials absent: deliberate no-op, notification flag untouched
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("order not found")]
    OrderNotFound,
    #[error("notification delivery failed: {0}")]
    Delivery(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Order notification dispatcher.
///
/// Every collaborator comes in through a port so the executor never touches
/// the global connection. Invocations are independent: re-dispatching an
/// already-notified order just sends again (manual resends rely on that).
pub struct NotifyOrderExecutor<'a> {
    orders: &'a dyn OrderStore,
    products: &'a dyn ProductStore,
    settings: &'a dyn SettingsStore,
    messenger: &'a dyn MessagingClient,
}

impl<'a> NotifyOrderExecutor<'a> {
    pub fn new(
        orders: &'a dyn OrderStore,
        products: &'a dyn ProductStore,
        settings: &'a dyn SettingsStore,
        messenger: &'a dyn MessagingClient,
    ) -> Self {
        Self {
            orders,
            products,
            settings,
            messenger,
        }
    }

    pub async fn dispatch(&self, order_id: Uuid) -> Result<DispatchOutcome, NotifyError> {
        let order = self
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or(NotifyError::OrderNotFound)?;

        // Product details are best effort: a deleted product or a failing
        // lookup only shortens the message
        let product = match order.product_ref.as_deref().and_then(|r| Uuid::parse_str(r).ok()) {
            Some(product_id) => match self.products.get_by_id(product_id).await {
                Ok(product) => product,
                Err(e) => {
                    tracing::warn!(
                        "Product lookup failed for order {}, sending without product details: {}",
                        order.base.code,
                        e
                    );
                    None
                }
            },
            None => None,
        };

        let creds = match self.settings.get().await? {
            Some(settings) => settings.telegram_credentials(),
            None => None,
        };
        let Some(creds) = creds else {
            tracing::info!(
                "Telegram not configured, skipping notification for order {}",
                order.base.code
            );
            return Ok(DispatchOutcome::NotConfigured);
        };

        let text = message::format_order_message(&order, product.as_ref());

        // Preferred delivery is a photo message with the text as caption;
        // one text fallback, no further retries
        let delivered = match product.as_ref().and_then(|p| p.image_url.as_deref()) {
            Some(image_url) => match self.messenger.send_photo(&creds, image_url, &text).await {
                Ok(()) => Ok(()),
                Err(photo_err) => {
                    tracing::warn!(
                        "Photo notification failed for order {}, falling back to text: {}",
                        order.base.code,
                        photo_err
                    );
                    self.messenger.send_text(&creds, &text).await
                }
            },
            None => self.messenger.send_text(&creds, &text).await,
        };

        match delivered {
            Ok(()) => {
                if let Err(e) = self.orders.set_notification_sent(order_id, true).await {
                    tracing::error!(
                        "Notification sent but flag update failed for order {}: {}",
                        order.base.id.as_string(),
                        e
                    );
                }
                Ok(DispatchOutcome::Delivered)
            }
            Err(e) => Err(NotifyError::Delivery(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use contracts::domain::a001_product::aggregate::Product;
    use contracts::domain::a002_order::aggregate::{CreateOrderDto, Order};
    use contracts::domain::a003_site_settings::aggregate::{SiteSettings, TelegramCredentials};
    use contracts::enums::product_category::ProductCategory;
    use std::sync::Mutex;

    struct FakeOrderStore {
        order: Mutex<Option<Order>>,
    }

    #[async_trait]
    impl OrderStore for FakeOrderStore {
        async fn insert(&self, order: &Order) -> Result<Uuid> {
            *self.order.lock().unwrap() = Some(order.clone());
            Ok(order.base.id.value())
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>> {
            Ok(self
                .order
                .lock()
                .unwrap()
                .clone()
                .filter(|o| o.base.id.value() == id))
        }

        async fn set_notification_sent(&self, id: Uuid, sent: bool) -> Result<bool> {
            let mut guard = self.order.lock().unwrap();
            match guard.as_mut().filter(|o| o.base.id.value() == id) {
                Some(order) => {
                    order.notification_sent = sent;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    struct FakeProductStore {
        product: Option<Product>,
        fail: bool,
    }

    #[async_trait]
    impl ProductStore for FakeProductStore {
        async fn get_by_id(&self, _id: Uuid) -> Result<Option<Product>> {
            if self.fail {
                anyhow::bail!("product store down");
            }
            Ok(self.product.clone())
        }
    }

    struct FakeSettingsStore {
        settings: Option<SiteSettings>,
    }

    #[async_trait]
    impl SettingsStore for FakeSettingsStore {
        async fn get(&self) -> Result<Option<SiteSettings>> {
            Ok(self.settings.clone())
        }
    }

    #[derive(Default)]
    struct FakeMessenger {
        photo_calls: Mutex<u32>,
        text_calls: Mutex<u32>,
        photo_fails: bool,
        text_fails: bool,
        last_text: Mutex<Option<String>>,
    }

    #[async_trait]
    impl MessagingClient for FakeMessenger {
        async fn send_text(&self, _creds: &TelegramCredentials, text: &str) -> Result<()> {
            *self.text_calls.lock().unwrap() += 1;
            *self.last_text.lock().unwrap() = Some(text.to_string());
            if self.text_fails {
                anyhow::bail!("sendMessage failed");
            }
            Ok(())
        }

        async fn send_photo(
            &self,
            _creds: &TelegramCredentials,
            _photo_url: &str,
            caption: &str,
        ) -> Result<()> {
            *self.photo_calls.lock().unwrap() += 1;
            *self.last_text.lock().unwrap() = Some(caption.to_string());
            if self.photo_fails {
                anyhow::bail!("sendPhoto failed");
            }
            Ok(())
        }
    }

    fn make_order(product_id: Uuid) -> Order {
        Order::new_from_intake(&CreateOrderDto {
            customer_name: "Ana".into(),
            contact: "ana@x.com".into(),
            message: Some("gift wrap please".into()),
            product_id: product_id.to_string(),
            product_name: "Mug".into(),
            quantity: 2,
            unit_price: 9.5,
        })
    }

    fn make_product(image_url: Option<&str>) -> Product {
        Product::new_for_insert(
            "PRD-1".into(),
            "Mug".into(),
            9.5,
            ProductCategory::Crafts,
            image_url.map(str::to_string),
            10,
            true,
            None,
            None,
            None,
        )
    }

    fn configured_settings() -> SiteSettings {
        SiteSettings {
            id: "site".into(),
            artist_name: "Studio".into(),
            tagline: String::new(),
            bio: String::new(),
            about_text: None,
            profile_image_url: None,
            logo_url: None,
            telegram_bot_token: Some("123:abc".into()),
            telegram_chat_id: Some("-100".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn unconfigured_settings() -> SiteSettings {
        let mut settings = configured_settings();
        settings.telegram_bot_token = None;
        settings
    }

    struct Harness {
        orders: FakeOrderStore,
        products: FakeProductStore,
        settings: FakeSettingsStore,
        messenger: FakeMessenger,
        order_id: Uuid,
    }

    impl Harness {
        fn new(product: Option<Product>, settings: Option<SiteSettings>) -> Self {
            let product_id = product
                .as_ref()
                .map(|p| p.base.id.value())
                .unwrap_or_else(Uuid::new_v4);
            let order = make_order(product_id);
            let order_id = order.base.id.value();
            Self {
                orders: FakeOrderStore {
                    order: Mutex::new(Some(order)),
                },
                products: FakeProductStore {
                    product,
                    fail: false,
                },
                settings: FakeSettingsStore { settings },
                messenger: FakeMessenger::default(),
                order_id,
            }
        }

        async fn dispatch(&self) -> Result<DispatchOutcome, NotifyError> {
            NotifyOrderExecutor::new(
                &self.orders,
                &self.products,
                &self.settings,
                &self.messenger,
            )
            .dispatch(self.order_id)
            .await
        }

        fn photo_calls(&self) -> u32 {
            *self.messenger.photo_calls.lock().unwrap()
        }

        fn text_calls(&self) -> u32 {
            *self.messenger.text_calls.lock().unwrap()
        }

        fn notification_sent(&self) -> bool {
            self.orders
                .order
                .lock()
                .unwrap()
                .as_ref()
                .unwrap()
                .notification_sent
        }
    }

    #[tokio::test]
    async fn test_unknown_order_makes_no_network_call() {
        let harness = Harness::new(None, Some(configured_settings()));
        let missing = Uuid::new_v4();

        let err = NotifyOrderExecutor::new(
            &harness.orders,
            &harness.products,
            &harness.settings,
            &harness.messenger,
        )
        .dispatch(missing)
        .await
        .unwrap_err();

        assert!(matches!(err, NotifyError::OrderNotFound));
        assert_eq!(harness.photo_calls(), 0);
        assert_eq!(harness.text_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_is_a_noop() {
        let harness = Harness::new(None, Some(unconfigured_settings()));

        let outcome = harness.dispatch().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::NotConfigured);
        assert_eq!(harness.photo_calls(), 0);
        assert_eq!(harness.text_calls(), 0);
        assert!(!harness.notification_sent());
    }

    #[tokio::test]
    async fn test_missing_settings_row_is_a_noop() {
        let harness = Harness::new(None, None);

        let outcome = harness.dispatch().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::NotConfigured);
        assert!(!harness.notification_sent());
    }

    #[tokio::test]
    async fn test_product_with_image_goes_out_as_photo() {
        let harness = Harness::new(
            Some(make_product(Some("https://cdn.example/mug.jpg"))),
            Some(configured_settings()),
        );

        let outcome = harness.dispatch().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Delivered);
        assert_eq!(harness.photo_calls(), 1);
        assert_eq!(harness.text_calls(), 0);
        assert!(harness.notification_sent());
    }

    #[tokio::test]
    async fn test_photo_failure_falls_back_to_text_exactly_once() {
        let mut harness = Harness::new(
            Some(make_product(Some("https://cdn.example/mug.jpg"))),
            Some(configured_settings()),
        );
        harness.messenger.photo_fails = true;

        let outcome = harness.dispatch().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Delivered);
        assert_eq!(harness.photo_calls(), 1);
        assert_eq!(harness.text_calls(), 1);
        assert!(harness.notification_sent());

        // the fallback carries the same message body as the caption
        let text = harness.messenger.last_text.lock().unwrap().clone().unwrap();
        assert!(text.contains("*Product:* Mug"));
        assert!(text.contains("*Total:* $19.00"));
    }

    #[tokio::test]
    async fn test_no_image_sends_exactly_one_text() {
        let harness = Harness::new(Some(make_product(None)), Some(configured_settings()));

        let outcome = harness.dispatch().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Delivered);
        assert_eq!(harness.photo_calls(), 0);
        assert_eq!(harness.text_calls(), 1);
        assert!(harness.notification_sent());
    }

    #[tokio::test]
    async fn test_both_attempts_failing_leaves_flag_false() {
        let mut harness = Harness::new(
            Some(make_product(Some("https://cdn.example/mug.jpg"))),
            Some(configured_settings()),
        );
        harness.messenger.photo_fails = true;
        harness.messenger.text_fails = true;

        let err = harness.dispatch().await.unwrap_err();

        assert!(matches!(err, NotifyError::Delivery(_)));
        assert_eq!(harness.photo_calls(), 1);
        assert_eq!(harness.text_calls(), 1);
        assert!(!harness.notification_sent());
    }

    #[tokio::test]
    async fn test_failing_product_lookup_still_delivers() {
        let mut harness = Harness::new(None, Some(configured_settings()));
        harness.products.fail = true;

        let outcome = harness.dispatch().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Delivered);
        assert_eq!(harness.text_calls(), 1);
        assert!(harness.notification_sent());

        // message falls back to the snapshotted order fields
        let text = harness.messenger.last_text.lock().unwrap().clone().unwrap();
        assert!(text.contains("*Product:* Mug"));
        assert!(!text.contains("*Category:*"));
    }

    #[tokio::test]
    async fn test_dispatch_is_repeatable_without_dedup() {
        let harness = Harness::new(Some(make_product(None)), Some(configured_settings()));

        assert_eq!(harness.dispatch().await.unwrap(), DispatchOutcome::Delivered);
        assert_eq!(harness.dispatch().await.unwrap(), DispatchOutcome::Delivered);

        assert_eq!(harness.text_calls(), 2);
        assert!(harness.notification_sent());
    }
}
