use super::repository;
use anyhow::Result;
use chrono::Utc;
use contracts::domain::a003_site_settings::aggregate::{SiteSettings, SiteSettingsDto};

/// Make sure the singleton settings row exists so that public reads never
/// come back empty. Telegram stays unconfigured until the admin fills it in.
pub async fn ensure_default_settings() -> Result<()> {
    if repository::get().await?.is_some() {
        return Ok(());
    }

    tracing::info!("No site settings found. Creating default row...");
    let now = Utc::now();
    let defaults = SiteSettings {
        id: repository::SINGLETON_ID.to_string(),
        artist_name: "Artist".to_string(),
        tagline: String::new(),
        bio: String::new(),
        about_text: None,
        profile_image_url: None,
        logo_url: None,
        telegram_bot_token: None,
        telegram_chat_id: None,
        created_at: now,
        updated_at: now,
    };
    repository::insert(&defaults).await
}

pub async fn get() -> Result<Option<SiteSettings>> {
    repository::get().await
}

/// Apply a partial update from the admin settings screen
pub async fn update(dto: SiteSettingsDto) -> Result<SiteSettings> {
    let mut settings = repository::get()
        .await?
        .ok_or_else(|| anyhow::anyhow!("Site settings not initialized"))?;

    if let Some(artist_name) = dto.artist_name {
        settings.artist_name = artist_name;
    }
    if let Some(tagline) = dto.tagline {
        settings.tagline = tagline;
    }
    if let Some(bio) = dto.bio {
        settings.bio = bio;
    }
    if let Some(about_text) = dto.about_text {
        settings.about_text = Some(about_text);
    }
    if let Some(profile_image_url) = dto.profile_image_url {
        settings.profile_image_url = Some(profile_image_url);
    }
    if let Some(logo_url) = dto.logo_url {
        settings.logo_url = Some(logo_url);
    }
    if let Some(telegram_bot_token) = dto.telegram_bot_token {
        settings.telegram_bot_token = Some(telegram_bot_token);
    }
    if let Some(telegram_chat_id) = dto.telegram_chat_id {
        settings.telegram_chat_id = Some(telegram_chat_id);
    }
    settings.updated_at = Utc::now();

    repository::update(&settings).await?;
    Ok(settings)
}
