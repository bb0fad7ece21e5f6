//! Telegram Bot API: inbound update shape and outbound `sendMessage`.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The parts of a Telegram update the bot reads.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Update {
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct IncomingMessage {
    pub text: Option<String>,
    pub chat: Option<Chat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Message text and chat id, when both are present and the text is not blank.
    pub fn text_and_chat(&self) -> Option<(&str, i64)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref().filter(|t| !t.trim().is_empty())?;
        let chat = message.chat.as_ref()?;
        Some((text, chat.id))
    }
}

/// Outbound chat delivery.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
}

pub struct TelegramClient {
    http: reqwest::Client,
    send_url: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            send_url: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token),
        }
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let resp = self
            .http
            .post(&self.send_url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .context("telegram sendMessage request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("telegram error: {status} {txt}");
        }
        Ok(())
    }
}
