//! Store and messaging ports used by order intake and the notification
//! dispatcher. Handlers wire in the SQL-backed adapters below; tests plug in
//! in-memory fakes instead of reaching for the global connection.

use anyhow::Result;
use async_trait::async_trait;
use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_order::aggregate::Order;
use contracts::domain::a003_site_settings::aggregate::{SiteSettings, TelegramCredentials};
use uuid::Uuid;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: &Order) -> Result<Uuid>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>>;
    async fn set_notification_sent(&self, id: Uuid, sent: bool) -> Result<bool>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> Result<Option<SiteSettings>>;
}

/// Outbound messaging channel. Both calls send one message to the configured
/// chat; failures come back as errors and never panic.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn send_text(&self, creds: &TelegramCredentials, text: &str) -> Result<()>;
    async fn send_photo(
        &self,
        creds: &TelegramCredentials,
        photo_url: &str,
        caption: &str,
    ) -> Result<()>;
}

// ============================================================================
// SQL-backed adapters (delegate to the domain repositories)
// ============================================================================

pub struct SqlOrderStore;

#[async_trait]
impl OrderStore for SqlOrderStore {
    async fn insert(&self, order: &Order) -> Result<Uuid> {
        crate::domain::a002_order::repository::insert(order).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        crate::domain::a002_order::repository::get_by_id(id).await
    }

    async fn set_notification_sent(&self, id: Uuid, sent: bool) -> Result<bool> {
        crate::domain::a002_order::repository::set_notification_sent(id, sent).await
    }
}

pub struct SqlProductStore;

#[async_trait]
impl ProductStore for SqlProductStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        crate::domain::a001_product::repository::get_by_id(id).await
    }
}

pub struct SqlSettingsStore;

#[async_trait]
impl SettingsStore for SqlSettingsStore {
    async fn get(&self) -> Result<Option<SiteSettings>> {
        crate::domain::a003_site_settings::repository::get().await
    }
}
