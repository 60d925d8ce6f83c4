//! Chat front-end for dichbot.
//!
//! Turns Telegram updates into calls on the translation core: commands are
//! looked up in a [`CommandRegistry`], plain text goes through auto-mode, and
//! inline buttons drive the settings panel. Replies leave through the
//! [`Messenger`] trait so handlers can run without a network.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use dichbot_bot::{Bot, run_polling};
//! use dichbot_common::{Config, get_metrics};
//! use dichbot_core::{GeminiTranslator, SettingsStore, TranslationService};
//! use dichbot_telegram::TelegramClient;
//!
//! # async fn example(config: Config) -> Result<(), Box<dyn std::error::Error>> {
//! let timeout = Duration::from_secs(config.telegram.poll_timeout_secs);
//! let client = TelegramClient::new(&config.telegram.api_url, &config.telegram.token, timeout)?;
//! let translation = TranslationService::new(
//!     Arc::new(GeminiTranslator::new(config.gemini)),
//!     get_metrics().clone(),
//! );
//! let bot = Bot::new(
//!     translation,
//!     SettingsStore::new(),
//!     Arc::new(client.clone()),
//!     get_metrics().clone(),
//! );
//! let shutdown = async {
//!     let _ = tokio::signal::ctrl_c().await;
//! };
//! run_polling(client, Arc::new(bot), timeout, shutdown).await;
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod commands;
pub mod messages;
pub mod messenger;
pub mod runner;

pub use bot::Bot;
pub use commands::{
    CommandContext, CommandHandler, CommandRegistry, ParsedCommand, is_command, parse_command,
};
pub use messenger::{Messenger, TextFormat};
pub use runner::{RETRY_DELAY, run_polling};
