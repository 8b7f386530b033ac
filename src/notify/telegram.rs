//! Telegram Bot API transport.
//!
//! # Responsibilities
//! - `getMe` reachability precheck
//! - `sendMessage` delivery to the configured chat
//! - `getUpdates` chat discovery for first-time setup
//!
//! # Design Decisions
//! - The bot token is part of every URL, so reqwest errors are logged `without_url`
//! - Each call carries its own timeout

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ChatId, TelegramConfig, TelegramCredentials};
use crate::notify::sender::NotificationSender;

/// Longest slice of an error body carried into logs.
const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("transport error: {0}")]
    Http(reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("no updates yet; send any message to the bot and retry")]
    NoUpdates,

    #[error("no chat found in recent updates; send a message to the bot and retry")]
    NoChat,
}

impl From<reqwest::Error> for TelegramError {
    fn from(e: reqwest::Error) -> Self {
        TelegramError::Http(e.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub channel_post: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl Chat {
    /// Title for groups/channels, otherwise username, otherwise first name.
    pub fn display_name(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.username.as_deref())
            .or(self.first_name.as_deref())
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Thin Bot API client.
pub struct TelegramClient {
    http: Client,
    api_base: String,
    bot_token: String,
    precheck_timeout: Duration,
    send_timeout: Duration,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig, bot_token: impl Into<String>) -> Result<Self, TelegramError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            precheck_timeout: Duration::from_secs(config.precheck_timeout_secs),
            send_timeout: Duration::from_secs(config.send_timeout_secs),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token, method)
    }

    pub async fn get_me(&self) -> Result<BotUser, TelegramError> {
        let response = self
            .http
            .get(self.method_url("getMe"))
            .timeout(self.precheck_timeout)
            .send()
            .await?;
        read_result(response).await
    }

    pub async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<(), TelegramError> {
        let payload = SendMessage {
            chat_id,
            text,
            disable_web_page_preview: true,
        };
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .timeout(self.send_timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TelegramError::Status {
                status,
                body: snippet(&body),
            });
        }
        Ok(())
    }

    pub async fn get_updates(&self) -> Result<Vec<Update>, TelegramError> {
        let response = self
            .http
            .get(self.method_url("getUpdates"))
            .timeout(self.send_timeout)
            .send()
            .await?;
        read_result(response).await
    }

    /// Most recent chat that wrote to the bot.
    pub async fn discover_chat(&self) -> Result<Chat, TelegramError> {
        let updates = self.get_updates().await?;
        if updates.is_empty() {
            return Err(TelegramError::NoUpdates);
        }
        latest_chat(&updates).cloned().ok_or(TelegramError::NoChat)
    }
}

async fn read_result<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, TelegramError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TelegramError::Status {
            status,
            body: snippet(&body),
        });
    }

    let body: ApiResponse<T> = response.json().await?;
    match (body.ok, body.result) {
        (true, Some(result)) => Ok(result),
        _ => Err(TelegramError::Api(
            body.description.unwrap_or_else(|| "unknown error".to_string()),
        )),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

/// Scan newest-first for a message or channel post with a chat.
pub fn latest_chat(updates: &[Update]) -> Option<&Chat> {
    updates
        .iter()
        .rev()
        .find_map(|u| u.message.as_ref().or(u.channel_post.as_ref()))
        .map(|m| &m.chat)
}

/// `NotificationSender` delivering to one Telegram chat.
pub struct TelegramSender {
    client: TelegramClient,
    chat_id: ChatId,
    precheck: bool,
}

impl TelegramSender {
    pub fn new(config: &TelegramConfig, credentials: TelegramCredentials) -> Result<Self, TelegramError> {
        Ok(Self {
            client: TelegramClient::new(config, credentials.bot_token)?,
            chat_id: credentials.chat_id,
            precheck: config.precheck,
        })
    }

    pub fn client(&self) -> &TelegramClient {
        &self.client
    }
}

impl NotificationSender for TelegramSender {
    async fn send(&self, text: &str) -> bool {
        // Only an unreachable API aborts; an API-level refusal is left to sendMessage.
        if self.precheck {
            match self.client.get_me().await {
                Err(TelegramError::Http(e)) => {
                    tracing::warn!(error = %e, "Telegram precheck failed: API unreachable");
                    return false;
                }
                Err(e) => tracing::debug!(error = %e, "Telegram precheck answered with an error"),
                Ok(_) => {}
            }
        }

        match self.client.send_message(&self.chat_id, text).await {
            Ok(()) => {
                tracing::debug!(chat_id = %self.chat_id, length = text.len(), "Telegram message sent");
                true
            }
            Err(TelegramError::Http(e)) if e.is_timeout() => {
                tracing::warn!(error = %e, "Telegram send timed out");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Telegram send failed");
                false
            }
        }
    }
}
