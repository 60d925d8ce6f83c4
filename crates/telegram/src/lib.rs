//! Minimal Telegram Bot API client.
//!
//! Only the methods the bot needs are covered: long polling with
//! `getUpdates`, sending and editing text messages with inline keyboards,
//! and answering callback queries.

pub mod client;
pub mod types;

pub use client::{TelegramClient, TelegramError};
pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode, Update,
    User,
};
