//! Telegram credentials supplied through the environment.

use std::env;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("TELEGRAM_CHAT_ID '{0}' is neither a numeric chat id nor an @channel name")]
    InvalidChatId(String),
}

/// Destination chat: numeric id or public `@channel` username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl ChatId {
    pub fn parse(raw: &str) -> Result<Self, CredentialsError> {
        let raw = raw.trim();
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(ChatId::Id(id));
        }
        if raw.len() > 1 && raw.starts_with('@') && !raw.contains(char::is_whitespace) {
            return Ok(ChatId::Username(raw.to_string()));
        }
        Err(CredentialsError::InvalidChatId(raw.to_string()))
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

/// Bot token plus destination. The token is redacted from `Debug` output.
#[derive(Clone)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: ChatId,
}

impl fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramCredentials {
    /// Read both variables from the process environment.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_values(env::var(BOT_TOKEN_VAR).ok(), env::var(CHAT_ID_VAR).ok())
    }

    pub fn from_values(
        bot_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, CredentialsError> {
        let bot_token = require(bot_token, BOT_TOKEN_VAR)?;
        let chat_id = ChatId::parse(&require(chat_id, CHAT_ID_VAR)?)?;
        Ok(Self { bot_token, chat_id })
    }
}

/// Read only the bot token (chat discovery does not need a destination yet).
pub fn bot_token_from_env() -> Result<String, CredentialsError> {
    require(env::var(BOT_TOKEN_VAR).ok(), BOT_TOKEN_VAR)
}

fn require(value: Option<String>, var: &'static str) -> Result<String, CredentialsError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CredentialsError::Missing(var)),
    }
}
