//! UseCase u101: send the Telegram notification for one order.
//!
//! Invoked on a detached task right after order intake and synchronously by
//! the admin "resend" action. Loading the order is the only hard
//! precondition; a vanished product only trims the message, and missing
//! Telegram credentials turn the whole dispatch into a recorded no-op.

pub mod executor;
pub mod message;
pub mod telegram_api_client;

pub use executor::{DispatchOutcome, NotifyError, NotifyOrderExecutor};

use crate::shared::stores::{SqlOrderStore, SqlProductStore, SqlSettingsStore};
use telegram_api_client::TelegramApiClient;
use uuid::Uuid;

/// Run the dispatcher against the live stores and the real Telegram API
pub async fn dispatch(order_id: Uuid) -> Result<DispatchOutcome, NotifyError> {
    let orders = SqlOrderStore;
    let products = SqlProductStore;
    let settings = SqlSettingsStore;
    let messenger = TelegramApiClient::new();

    NotifyOrderExecutor::new(&orders, &products, &settings, &messenger)
        .dispatch(order_id)
        .await
}

/// Fire-and-forget entry used by order intake. Every outcome is swallowed
/// here: the order already exists and must not be affected by anything the
/// dispatcher does.
pub fn spawn_dispatch(order_id: Uuid) {
    tokio::spawn(async move {
        match dispatch(order_id).await {
            Ok(DispatchOutcome::Delivered) => {
                tracing::info!("Order notification sent for {}", order_id);
            }
            Ok(DispatchOutcome::NotConfigured) => {
                tracing::info!(
                    "Telegram not configured, skipped notification for order {}",
                    order_id
                );
            }
            Err(e) => {
                tracing::warn!("Order notification failed for {}: {}", order_id, e);
            }
        }
    });
}
