//! Update dispatch and handlers.

use std::sync::Arc;

use chrono::Local;
use dichbot_common::{AppError, AppResult, Metrics};
use dichbot_core::{Dictionary, Route, SettingsStore, TranslationService, Trigger, UserId, routing};
use dichbot_telegram::{CallbackQuery, Message, Update};
use tracing::{debug, info, warn};

use crate::commands::{CommandContext, CommandRegistry, is_command, parse_command};
use crate::messages::{self, ResultCard, StatsReport};
use crate::messenger::{Messenger, TextFormat};

/// Chat bot state shared by every update handler.
pub struct Bot {
    translation: TranslationService,
    settings: SettingsStore,
    dictionary: Dictionary,
    metrics: Arc<Metrics>,
    messenger: Arc<dyn Messenger>,
    commands: CommandRegistry,
    username: Option<String>,
}

impl Bot {
    /// Create a bot with the standard command set.
    #[must_use]
    pub fn new(
        translation: TranslationService,
        settings: SettingsStore,
        messenger: Arc<dyn Messenger>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            translation,
            settings,
            dictionary: Dictionary::builtin(),
            metrics,
            messenger,
            commands: CommandRegistry::standard(),
            username: None,
        }
    }

    /// Set the bot's own username so `/cmd@otherbot` can be told apart.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub const fn translation(&self) -> &TranslationService {
        &self.translation
    }

    #[must_use]
    pub const fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Handle one update. Errors are logged and counted, never returned.
    pub async fn handle_update(&self, update: Update) {
        self.metrics.record_update();
        let update_id = update.update_id;

        let (chat_id, result) = if let Some(query) = update.callback_query {
            let chat_id = query
                .message
                .as_ref()
                .map_or(query.from.id, |m| m.chat.id);
            (chat_id, self.handle_callback(&query).await)
        } else if let Some(message) = update.message {
            (message.chat.id, self.handle_message(&message).await)
        } else {
            debug!(update_id, "Ignoring update without message or callback");
            return;
        };

        if let Err(e) = result {
            self.report_error(update_id, chat_id, e).await;
        }
    }

    async fn report_error(&self, update_id: i64, chat_id: i64, err: AppError) {
        if let AppError::MissingInput(usage) = &err {
            debug!(update_id, chat_id, "Command invoked without text");
            if let Err(e) = self
                .messenger
                .send_text(chat_id, usage, TextFormat::Markdown, None)
                .await
            {
                self.metrics.record_handler_error();
                warn!(update_id, error = %e, "Failed to send usage hint");
            }
            return;
        }

        self.metrics.record_handler_error();
        warn!(
            update_id,
            chat_id,
            error = %err,
            code = err.error_code(),
            "Update handler failed"
        );
    }

    async fn handle_message(&self, message: &Message) -> AppResult<()> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        let chat_id = message.chat.id;
        let user_id = message.from.as_ref().map_or(chat_id, |u| u.id);

        if !is_command(text) {
            return self.handle_text(chat_id, user_id, text).await;
        }

        let Some(parsed) = parse_command(text, self.username.as_deref()) else {
            return Ok(());
        };
        let Some(handler) = self.commands.get(&parsed.name) else {
            debug!(command = %parsed.name, "Ignoring unknown command");
            return Ok(());
        };

        self.metrics.record_command();
        debug!(command = %parsed.name, user_id, "Dispatching command");
        let ctx = CommandContext {
            chat_id,
            user_id,
            args: parsed.args,
        };
        handler(self, &ctx).await
    }

    // === Commands ===

    pub(crate) async fn start(&self, ctx: &CommandContext) -> AppResult<()> {
        self.settings.reset(ctx.user_id).await;
        let keyboard = messages::welcome_keyboard();
        self.messenger
            .send_text(ctx.chat_id, messages::WELCOME, TextFormat::Markdown, Some(&keyboard))
            .await?;
        Ok(())
    }

    pub(crate) async fn help(&self, chat_id: i64) -> AppResult<()> {
        self.messenger
            .send_text(chat_id, messages::HELP, TextFormat::Markdown, None)
            .await?;
        Ok(())
    }

    pub(crate) async fn stats(&self, ctx: &CommandContext) -> AppResult<()> {
        let time = Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
        let report = StatsReport {
            dictionary_entries: self.dictionary.len(),
            cached_translations: self.translation.cache_len().await,
            users: self.settings.len().await,
            engine: self.translation.engine_name(),
            metrics: self.metrics.snapshot(),
            time: &time,
        };
        self.messenger
            .send_text(ctx.chat_id, &report.render(), TextFormat::Markdown, None)
            .await?;
        Ok(())
    }

    pub(crate) async fn set_auto(&self, ctx: &CommandContext, enabled: bool) -> AppResult<()> {
        self.settings.set_auto_translate(ctx.user_id, enabled).await;
        info!(user_id = ctx.user_id, enabled, "Auto-translate changed");

        let reply = if enabled {
            messages::AUTO_ON
        } else {
            messages::AUTO_OFF
        };
        self.messenger
            .send_text(ctx.chat_id, reply, TextFormat::Plain, None)
            .await?;
        Ok(())
    }

    pub(crate) async fn translate_command(
        &self,
        ctx: &CommandContext,
        trigger: Trigger,
        usage: &str,
    ) -> AppResult<()> {
        let text = ctx.require_text(usage)?;
        // Manual triggers always produce a route.
        let Some(route) = routing::route(trigger, &text) else {
            return Ok(());
        };
        self.perform_translation(ctx.chat_id, &text, route, trigger)
            .await
    }

    // === Plain text ===

    async fn handle_text(&self, chat_id: i64, user_id: UserId, text: &str) -> AppResult<()> {
        if !self.settings.is_auto_translate(user_id).await {
            return Ok(());
        }
        let Some(route) = routing::route(Trigger::AutoMode, text) else {
            debug!(user_id, "Auto-mode ignores text that is neither Chinese nor Vietnamese");
            return Ok(());
        };

        self.metrics.record_auto_translation();
        self.perform_translation(chat_id, text, route, Trigger::AutoMode)
            .await
    }

    /// Post a placeholder, translate, then replace the placeholder with the outcome.
    async fn perform_translation(
        &self,
        chat_id: i64,
        text: &str,
        route: Route,
        trigger: Trigger,
    ) -> AppResult<()> {
        let placeholder = self
            .messenger
            .send_text(chat_id, messages::TRANSLATING, TextFormat::Plain, None)
            .await?;

        // Failures are logged with their cause by the translation service.
        let Ok(translation) = self.translation.translate(text, route.target).await else {
            return self
                .messenger
                .edit_text(
                    chat_id,
                    placeholder,
                    messages::TRANSLATION_FAILED,
                    TextFormat::Plain,
                    None,
                )
                .await;
        };

        let time = Local::now().format("%H:%M:%S").to_string();
        let card = ResultCard {
            source: route.source,
            target: route.target,
            manual: trigger.is_manual(),
            original: text,
            translation: &translation,
            time: &time,
        };

        if let Err(e) = self
            .messenger
            .edit_text(chat_id, placeholder, &card.render(), TextFormat::Markdown, None)
            .await
        {
            warn!(chat_id, error = %e, "Failed to deliver translation");
            self.messenger
                .edit_text(
                    chat_id,
                    placeholder,
                    messages::DELIVERY_FAILED,
                    TextFormat::Plain,
                    None,
                )
                .await?;
        }
        Ok(())
    }

    // === Buttons ===

    async fn handle_callback(&self, query: &CallbackQuery) -> AppResult<()> {
        self.messenger.answer_callback(&query.id).await?;

        let user_id = query.from.id;
        let data = query.data.as_deref().unwrap_or_default();

        if data == messages::CB_HELP {
            let chat_id = query.message.as_ref().map_or(user_id, |m| m.chat.id);
            return self.help(chat_id).await;
        }

        let Some(message) = query.message.as_ref() else {
            debug!(data, "Callback without a message to edit");
            return Ok(());
        };
        let (chat_id, message_id) = (message.chat.id, message.message_id);

        match data {
            messages::CB_SETTINGS => {
                let settings = self.settings.get(user_id).await;
                let keyboard = messages::settings_keyboard();
                self.messenger
                    .edit_text(
                        chat_id,
                        message_id,
                        &messages::settings_panel(&settings),
                        TextFormat::Markdown,
                        Some(&keyboard),
                    )
                    .await
            }
            messages::CB_TOGGLE_AUTO => {
                let enabled = self.settings.toggle_auto_translate(user_id).await;
                info!(user_id, enabled, "Auto-translate toggled");
                self.messenger
                    .edit_text(
                        chat_id,
                        message_id,
                        &messages::auto_toggled(enabled),
                        TextFormat::Plain,
                        None,
                    )
                    .await
            }
            messages::CB_HOME => {
                let keyboard = messages::welcome_keyboard();
                self.messenger
                    .edit_text(
                        chat_id,
                        message_id,
                        messages::WELCOME,
                        TextFormat::Markdown,
                        Some(&keyboard),
                    )
                    .await
            }
            other => {
                debug!(data = other, "Ignoring unknown callback data");
                Ok(())
            }
        }
    }
}
