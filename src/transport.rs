use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, LinkPreviewOptions};
use teloxide::Bot;

use crate::formatter::FormattedMessage;

/// Outbound delivery seam. Implementations map to a messenger transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers one formatted message to the given chat.
    async fn send(&self, chat_id: i64, message: &FormattedMessage) -> Result<()>;
}

/// Teloxide-backed [`Transport`] talking to the Telegram Bot API.
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }
}

#[async_trait]
impl Transport for TelegramSender {
    async fn send(&self, chat_id: i64, message: &FormattedMessage) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), message.body.as_str())
            .parse_mode(message.options.parse_mode);
        if message.options.disable_link_preview {
            request = request.link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }
        request
            .await
            .with_context(|| format!("Failed to send message to chat {chat_id}"))?;
        Ok(())
    }
}
