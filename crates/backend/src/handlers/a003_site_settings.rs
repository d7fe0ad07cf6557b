use axum::{http::StatusCode, Json};
use contracts::domain::a003_site_settings::aggregate::{SiteSettings, SiteSettingsDto};

use crate::domain::a003_site_settings;

async fn load_settings() -> Result<SiteSettings, StatusCode> {
    a003_site_settings::service::get()
        .await
        .map_err(|e| {
            tracing::error!("Failed to load site settings: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)
}

/// Handler for the public settings read (display fields for the storefront).
/// The Telegram credentials never leave the admin surface.
pub async fn get_settings() -> Result<Json<SiteSettings>, StatusCode> {
    let mut settings = load_settings().await?;
    settings.telegram_bot_token = None;
    settings.telegram_chat_id = None;
    Ok(Json(settings))
}

/// Admin handler: full settings read, credentials included
pub async fn get_settings_admin() -> Result<Json<SiteSettings>, StatusCode> {
    Ok(Json(load_settings().await?))
}

/// Admin handler: partial settings update
pub async fn save_settings(
    Json(dto): Json<SiteSettingsDto>,
) -> Result<Json<SiteSettings>, StatusCode> {
    let settings = a003_site_settings::service::update(dto).await.map_err(|e| {
        tracing::error!("Failed to save site settings: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(settings))
}
