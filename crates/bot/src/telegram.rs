//! Minimal Telegram Bot API client.
//!
//! Covers the two methods the bot needs (`getUpdates` long polling and
//! `sendMessage`) using [`reqwest`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Extra time allowed on top of the long-poll timeout before the HTTP
/// request itself is abandoned.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

/// HTTP client bound to one bot token.
pub struct TelegramClient {
    client: reqwest::Client,
    /// `{api_url}/bot{token}`; must not appear in errors or logs.
    base_url: String,
}

/// Errors from the Bot API layer.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// Telegram answered with `ok: false`.
    #[error("Telegram API error ({status}): {description}")]
    Api { status: u16, description: String },
}

/// Request URLs carry the bot token, so they are stripped before the error
/// can reach a log line.
impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// An incoming update. Only message updates are requested.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

impl TelegramClient {
    /// Create a client for `token` against `api_url`
    /// (normally `https://api.telegram.org`).
    pub fn new(api_url: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        }
    }

    /// Long-poll for updates newer than `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, BotError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };
        let response = self
            .client
            .post(format!("{}/getUpdates", self.base_url))
            .timeout(Duration::from_secs(timeout_secs) + REQUEST_GRACE)
            .json(&body)
            .send()
            .await?;

        let updates: Option<Vec<Update>> = Self::parse_response(response).await?;
        Ok(updates.unwrap_or_default())
    }

    /// Send a plain-text message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await?;

        let _: Option<serde_json::Value> = Self::parse_response(response).await?;
        Ok(())
    }

    /// Decode the Bot API envelope, turning `ok: false` into
    /// [`BotError::Api`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, BotError> {
        let status = response.status().as_u16();
        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.ok {
            return Err(BotError::Api {
                status,
                description: envelope
                    .description
                    .unwrap_or_else(|| "<no description>".to_string()),
            });
        }
        Ok(envelope.result)
    }
}
