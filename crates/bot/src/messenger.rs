//! Outbound messaging seam between handlers and the chat platform.

use async_trait::async_trait;
use dichbot_common::{AppError, AppResult};
use dichbot_telegram::{InlineKeyboardMarkup, ParseMode, TelegramClient, TelegramError};

/// Formatting applied to an outgoing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Markdown,
}

impl TextFormat {
    const fn parse_mode(self) -> Option<ParseMode> {
        match self {
            Self::Plain => None,
            Self::Markdown => Some(ParseMode::Markdown),
        }
    }
}

/// Sends and edits chat messages on behalf of the handlers.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to `chat_id` and return the new message id.
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> AppResult<i64>;

    /// Replace the text (and keyboard) of a message sent earlier.
    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> AppResult<()>;

    /// Acknowledge a button press.
    async fn answer_callback(&self, callback_id: &str) -> AppResult<()>;
}

fn messaging_error(err: TelegramError) -> AppError {
    AppError::Messaging(err.to_string())
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> AppResult<i64> {
        let message = self
            .send_message(chat_id, text, format.parse_mode(), keyboard)
            .await
            .map_err(messaging_error)?;
        Ok(message.message_id)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> AppResult<()> {
        self.edit_message_text(chat_id, message_id, text, format.parse_mode(), keyboard)
            .await
            .map_err(messaging_error)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> AppResult<()> {
        self.answer_callback_query(callback_id, None)
            .await
            .map_err(messaging_error)
    }
}
