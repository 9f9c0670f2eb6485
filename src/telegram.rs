//! Telegram Bot API client
//!
//! Implements the two slices of the Bot API this bot needs: long polling for
//! incoming updates and `sendMessage` for replies.
//!
//! API Reference: https://core.telegram.org/bots/api

use crate::error::{Error, Result};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org/bot";

/// Long-poll timeout passed to `getUpdates`
pub const POLL_TIMEOUT_SECS: u64 = 30;

/// Thin Telegram Bot API client
#[derive(Debug, Clone)]
pub struct TelegramBot {
    client: reqwest::Client,
    token: String,
}

/// A chat command this bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Hi,
    CreateMultisig,
}

impl BotCommand {
    /// Parse a command out of message text.
    ///
    /// Accepts an optional `@botname` suffix on the command, as sent in
    /// group chats. Anything that is not one of the three known commands
    /// is `None` and gets ignored upstream.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.trim().split_whitespace().next()?;
        let command = first.strip_prefix('/')?;
        let command = command.split('@').next()?;

        match command {
            "start" => Some(Self::Start),
            "hi" => Some(Self::Hi),
            "create_multisig" => Some(Self::CreateMultisig),
            _ => None,
        }
    }
}

/// A parsed incoming command and its reply target
#[derive(Debug, Clone)]
pub struct CommandUpdate {
    pub update_id: i64,
    pub chat_id: i64,
    pub command: BotCommand,
}

impl TelegramBot {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
        }
    }

    /// Build API URL for a method
    fn api_url(token: &str, method: &str) -> String {
        format!("{}{}/{}", TELEGRAM_API_BASE, token, method)
    }

    /// Call the Bot API and return the unwrapped `result` payload
    async fn api_call(&self, method: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let url = Self::api_url(&self.token, method);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Telegram(format!("Telegram API request failed: {}", e)))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Telegram(format!("Failed to parse Telegram response: {}", e)))?;

        if !status.is_success() || body.get("ok") != Some(&serde_json::Value::Bool(true)) {
            let description = body["description"].as_str().unwrap_or("unknown error");
            return Err(Error::Telegram(format!(
                "Telegram API error ({}): {}",
                status, description
            )));
        }

        Ok(body["result"].clone())
    }

    /// Verify the token and return the bot's username
    pub async fn get_me(&self) -> Result<String> {
        let me = self.api_call("getMe", &serde_json::json!({})).await?;
        Ok(me["username"].as_str().unwrap_or("unknown").to_string())
    }

    /// Fetch pending updates at `offset`, blocking server-side for up to
    /// [`POLL_TIMEOUT_SECS`]
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<serde_json::Value>> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"]
        });

        let result = self.api_call("getUpdates", &body).await?;
        Ok(result.as_array().cloned().unwrap_or_default())
    }

    /// Send a plain-text reply to a chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        self.api_call("sendMessage", &body).await?;
        Ok(())
    }
}

/// Parse a Telegram update into a command, if it carries one.
///
/// Non-message updates, messages without text, and text that is not a known
/// command all map to `None`.
pub fn parse_update(update: &serde_json::Value) -> Option<CommandUpdate> {
    let update_id = update["update_id"].as_i64()?;
    let message = update.get("message")?;
    let chat_id = message["chat"]["id"].as_i64()?;
    let text = message.get("text").and_then(|v| v.as_str())?;
    let command = BotCommand::parse(text)?;

    Some(CommandUpdate {
        update_id,
        chat_id,
        command,
    })
}
