use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Site-wide configuration. A single row: public display fields for the
/// storefront plus the Telegram integration credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub id: String,

    #[serde(rename = "artistName")]
    pub artist_name: String,

    pub tagline: String,

    pub bio: String,

    #[serde(rename = "aboutText")]
    pub about_text: Option<String>,

    #[serde(rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,

    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,

    #[serde(rename = "telegramBotToken")]
    pub telegram_bot_token: Option<String>,

    #[serde(rename = "telegramChatId")]
    pub telegram_chat_id: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl SiteSettings {
    /// Messaging credentials, present only when both parts are configured.
    /// Empty strings count as absent.
    pub fn telegram_credentials(&self) -> Option<TelegramCredentials> {
        let token = self.telegram_bot_token.as_deref()?.trim();
        let chat_id = self.telegram_chat_id.as_deref()?.trim();
        if token.is_empty() || chat_id.is_empty() {
            return None;
        }
        Some(TelegramCredentials {
            bot_token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

/// Bot token + destination chat for the order notification channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

/// Admin update payload; every field optional so partial saves work
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsDto {
    pub artist_name: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub about_text: Option<String>,
    pub profile_image_url: Option<String>,
    pub logo_url: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(token: Option<&str>, chat: Option<&str>) -> SiteSettings {
        SiteSettings {
            id: "settings".into(),
            artist_name: "Studio".into(),
            tagline: "".into(),
            bio: "".into(),
            about_text: None,
            profile_image_url: None,
            logo_url: None,
            telegram_bot_token: token.map(str::to_string),
            telegram_chat_id: chat.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_credentials_present_when_both_set() {
        let creds = settings(Some("123:abc"), Some("-100"))
            .telegram_credentials()
            .unwrap();
        assert_eq!(creds.bot_token, "123:abc");
        assert_eq!(creds.chat_id, "-100");
    }

    #[test]
    fn test_credentials_absent_when_either_missing_or_blank() {
        assert!(settings(None, Some("-100")).telegram_credentials().is_none());
        assert!(settings(Some("123:abc"), None)
            .telegram_credentials()
            .is_none());
        assert!(settings(Some("  "), Some("-100"))
            .telegram_credentials()
            .is_none());
        assert!(settings(Some("123:abc"), Some(""))
            .telegram_credentials()
            .is_none());
    }
}
