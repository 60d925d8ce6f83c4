//! Bot API HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    AnswerCallbackQuery, ApiResponse, EditMessageText, GetUpdates, InlineKeyboardMarkup, Message,
    ParseMode, SendMessage, Update, User,
};

/// Extra time on top of the long polling timeout before the HTTP request gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Error type for Bot API calls.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },
    #[error("Bot API returned no result for {0}")]
    MissingResult(&'static str),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        Self::Http(err.without_url())
    }
}

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    /// Create a new client for `token` against `api_url`.
    ///
    /// `poll_timeout` is the long polling timeout that will be passed to
    /// [`TelegramClient::get_updates`]; the HTTP timeout is derived from it.
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(poll_timeout + POLL_GRACE)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    async fn call<P, R>(&self, method: &'static str, params: &P) -> Result<R, TelegramError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(params)
            .send()
            .await?;

        let status = response.status();
        let envelope: ApiResponse<R> = response.json().await?;

        if !envelope.ok {
            let description = envelope.description.unwrap_or_default();
            warn!(method, status = %status, description = %description, "Bot API call failed");
            return Err(TelegramError::Api {
                code: envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description,
            });
        }

        envelope.result.ok_or(TelegramError::MissingResult(method))
    }

    /// Identify the bot.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdates {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: &["message", "callback_query"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &params).await?;
        if !updates.is_empty() {
            debug!(count = updates.len(), "Received updates");
        }
        Ok(updates)
    }

    /// Send a text message.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let params = SendMessage {
            chat_id,
            text,
            parse_mode,
            reply_markup,
        };
        self.call("sendMessage", &params).await
    }

    /// Replace the text of a message previously sent by the bot.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let params = EditMessageText {
            chat_id,
            message_id,
            text,
            parse_mode,
            reply_markup,
        };
        self.call("editMessageText", &params).await
    }

    /// Acknowledge a callback query so the client stops its progress indicator.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        let params = AnswerCallbackQuery {
            callback_query_id,
            text,
        };
        let _: bool = self.call("answerCallbackQuery", &params).await?;
        Ok(())
    }
}
