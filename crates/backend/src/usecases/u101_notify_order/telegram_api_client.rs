use anyhow::Result;
use async_trait::async_trait;
use contracts::domain::a003_site_settings::aggregate::TelegramCredentials;
use serde::Serialize;

use crate::shared::stores::MessagingClient;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// HTTP client for the Telegram Bot API
pub struct TelegramApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Serialize)]
struct SendPhotoRequest<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
}

impl TelegramApiClient {
    pub fn new() -> Self {
        Self::with_base_url(TELEGRAM_API_BASE.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
        }
    }

    /// POST one Bot API method; non-2xx responses become errors carrying the
    /// response body Telegram returned
    async fn call<T: Serialize>(&self, token: &str, method: &str, body: &T) -> Result<()> {
        let url = format!("{}/bot{}/{}", self.base_url, token, method);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Telegram {} failed: {}", method, body);
            anyhow::bail!("Telegram {} failed with status {}: {}", method, status, body);
        }

        tracing::debug!("Telegram {} delivered", method);
        Ok(())
    }
}

impl Default for TelegramApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingClient for TelegramApiClient {
    async fn send_text(&self, creds: &TelegramCredentials, text: &str) -> Result<()> {
        self.call(
            &creds.bot_token,
            "sendMessage",
            &SendMessageRequest {
                chat_id: &creds.chat_id,
                text,
                parse_mode: "Markdown",
            },
        )
        .await
    }

    async fn send_photo(
        &self,
        creds: &TelegramCredentials,
        photo_url: &str,
        caption: &str,
    ) -> Result<()> {
        self.call(
            &creds.bot_token,
            "sendPhoto",
            &SendPhotoRequest {
                chat_id: &creds.chat_id,
                photo: photo_url,
                caption,
                parse_mode: "Markdown",
            },
        )
        .await
    }
}
