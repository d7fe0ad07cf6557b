use anyhow::Result;
use chrono::Utc;
use contracts::domain::a003_site_settings::aggregate::SiteSettings;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// The settings table holds exactly one row under this id
pub const SINGLETON_ID: &str = "site";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub artist_name: String,
    pub tagline: String,
    pub bio: String,
    pub about_text: Option<String>,
    pub profile_image_url: Option<String>,
    pub logo_url: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SiteSettings {
    fn from(m: Model) -> Self {
        SiteSettings {
            id: m.id,
            artist_name: m.artist_name,
            tagline: m.tagline,
            bio: m.bio,
            about_text: m.about_text,
            profile_image_url: m.profile_image_url,
            logo_url: m.logo_url,
            telegram_bot_token: m.telegram_bot_token,
            telegram_chat_id: m.telegram_chat_id,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active_model(settings: &SiteSettings) -> ActiveModel {
    ActiveModel {
        id: Set(SINGLETON_ID.to_string()),
        artist_name: Set(settings.artist_name.clone()),
        tagline: Set(settings.tagline.clone()),
        bio: Set(settings.bio.clone()),
        about_text: Set(settings.about_text.clone()),
        profile_image_url: Set(settings.profile_image_url.clone()),
        logo_url: Set(settings.logo_url.clone()),
        telegram_bot_token: Set(settings.telegram_bot_token.clone()),
        telegram_chat_id: Set(settings.telegram_chat_id.clone()),
        created_at: Set(Some(settings.created_at)),
        updated_at: Set(Some(settings.updated_at)),
    }
}

pub async fn get() -> Result<Option<SiteSettings>> {
    let result = Entity::find_by_id(SINGLETON_ID.to_string())
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(settings: &SiteSettings) -> Result<()> {
    to_active_model(settings).insert(conn()).await?;
    Ok(())
}

pub async fn update(settings: &SiteSettings) -> Result<()> {
    let mut active = to_active_model(settings);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}
