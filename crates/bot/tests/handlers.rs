//! Handler behaviour with an in-memory messenger and a fake translator.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dichbot_bot::{Bot, Messenger, TextFormat, messages};
use dichbot_common::{AppError, AppResult, Metrics};
use dichbot_core::{SettingsStore, TargetLanguage, TranslationService, Translator};
use dichbot_telegram::{InlineKeyboardMarkup, Update};
use serde_json::json;

const USER: i64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sent {
    Text {
        chat_id: i64,
        text: String,
        format: TextFormat,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Edit {
        message_id: i64,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Answer(String),
}

/// Records every outbound call. Message ids start at 100.
#[derive(Default)]
struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_markdown_edits: bool,
}

impl RecordingMessenger {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn last(&self) -> Sent {
        self.sent().last().cloned().unwrap()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> AppResult<i64> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Text {
            chat_id,
            text: text.to_string(),
            format,
            keyboard: keyboard.cloned(),
        });
        Ok(100 + i64::try_from(sent.len()).unwrap())
    }

    async fn edit_text(
        &self,
        _chat_id: i64,
        message_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> AppResult<()> {
        if self.fail_markdown_edits && format == TextFormat::Markdown {
            return Err(AppError::Messaging("can't parse entities".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Edit {
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Answer(callback_id.to_string()));
        Ok(())
    }
}

/// Answers with a fixed text, or fails when none is set. Records prompts.
struct FakeTranslator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeTranslator {
    fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_target(&self) -> TargetLanguage {
        let prompts = self.prompts.lock().unwrap();
        let prompt = prompts.last().unwrap();
        if prompt.contains(TargetLanguage::Chinese.prompt_name()) {
            TargetLanguage::Chinese
        } else {
            TargetLanguage::Vietnamese
        }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| AppError::TranslatorUnavailable("Gemini API error: 500".to_string()))
    }

    fn name(&self) -> &str {
        "Fake Engine"
    }
}

struct Harness {
    bot: Bot,
    messenger: Arc<RecordingMessenger>,
    translator: Arc<FakeTranslator>,
    metrics: Arc<Metrics>,
}

impl Harness {
    fn new(translator: Arc<FakeTranslator>) -> Self {
        Self::with_messenger(translator, RecordingMessenger::default())
    }

    fn with_messenger(translator: Arc<FakeTranslator>, messenger: RecordingMessenger) -> Self {
        let messenger = Arc::new(messenger);
        let metrics = Arc::new(Metrics::new());
        let translation = TranslationService::new(translator.clone(), metrics.clone());
        let bot = Bot::new(
            translation,
            SettingsStore::new(),
            messenger.clone(),
            metrics.clone(),
        )
        .with_username("dichbot");
        Self {
            bot,
            messenger,
            translator,
            metrics,
        }
    }

    async fn text(&self, text: &str) {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "from": {"id": USER, "is_bot": false, "first_name": "Lan"},
                "chat": {"id": USER, "type": "private"},
                "date": 1_700_000_000,
                "text": text
            }
        }))
        .unwrap();
        self.bot.handle_update(update).await;
    }

    async fn press(&self, data: &str) {
        let update: Update = serde_json::from_value(json!({
            "update_id": 2,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": USER, "is_bot": false, "first_name": "Lan"},
                "message": {
                    "message_id": 77,
                    "chat": {"id": USER, "type": "private"},
                    "date": 1_700_000_000,
                    "text": "menu"
                },
                "data": data
            }
        }))
        .unwrap();
        self.bot.handle_update(update).await;
    }
}

fn edited_text(sent: &Sent) -> &str {
    match sent {
        Sent::Edit { text, .. } => text,
        other => panic!("Expected an edit, got {other:?}"),
    }
}

// === Translation commands ===

#[tokio::test]
async fn test_dich_chinese_routes_to_vietnamese_and_caches() {
    let h = Harness::new(FakeTranslator::answering("Xin chào"));

    h.text("/dich 你好").await;

    assert_eq!(h.translator.calls(), 1);
    assert_eq!(h.translator.last_target(), TargetLanguage::Vietnamese);
    assert_eq!(
        h.bot
            .translation()
            .cached("你好", TargetLanguage::Vietnamese)
            .await
            .as_deref(),
        Some("Xin chào")
    );

    let sent = h.messenger.sent();
    assert_eq!(
        sent[0],
        Sent::Text {
            chat_id: USER,
            text: messages::TRANSLATING.to_string(),
            format: TextFormat::Plain,
            keyboard: None,
        }
    );
    let card = edited_text(&sent[1]);
    assert!(card.starts_with("**🇨🇳 → 🇻🇳 Dịch thuật** 🎯 Thủ công"));
    assert!(card.contains("📝 **Gốc:**\n你好"));
    assert!(card.contains("✨ **Dịch:**\nXin chào"));

    // Same command again: served from cache.
    h.text("/dich 你好").await;
    assert_eq!(h.translator.calls(), 1);
    assert!(edited_text(&h.messenger.last()).contains("Xin chào"));
}

#[tokio::test]
async fn test_dich_routes_by_detected_language() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.text("/dich 你好世界").await;
    assert_eq!(h.translator.last_target(), TargetLanguage::Vietnamese);

    h.text("/dich Xin chào thế giới").await;
    assert_eq!(h.translator.last_target(), TargetLanguage::Chinese);

    h.text("/dich Hello world").await;
    assert_eq!(h.translator.last_target(), TargetLanguage::Vietnamese);
    assert!(edited_text(&h.messenger.last()).starts_with("**🇺🇸 → 🇻🇳"));
}

#[tokio::test]
async fn test_forced_targets() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.text("/dich_zh Hello world").await;
    assert_eq!(h.translator.last_target(), TargetLanguage::Chinese);

    // Forced target even when the text is already Vietnamese.
    h.text("/dich_vi Xin chào").await;
    assert_eq!(h.translator.last_target(), TargetLanguage::Vietnamese);
    assert!(edited_text(&h.messenger.last()).starts_with("**🇻🇳 → 🇻🇳"));
}

#[tokio::test]
async fn test_args_are_rejoined_with_single_spaces() {
    let h = Harness::new(FakeTranslator::answering("Hello world"));

    h.text("/dich@dichbot   你好 \n  世界").await;

    assert!(
        h.bot
            .translation()
            .cached("你好 世界", TargetLanguage::Vietnamese)
            .await
            .is_some()
    );
}

#[tokio::test]
async fn test_missing_text_sends_usage_without_translator_call() {
    let h = Harness::new(FakeTranslator::answering("unused"));

    h.text("/dich").await;
    h.text("/dich_zh   ").await;

    assert_eq!(h.translator.calls(), 0);
    let sent = h.messenger.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(
        &sent[0],
        Sent::Text { text, format: TextFormat::Markdown, .. } if text == messages::USAGE_DICH
    ));
    assert!(matches!(&sent[1], Sent::Text { text, .. } if text == messages::USAGE_DICH_ZH));
    assert_eq!(h.metrics.snapshot().handler_errors, 0);
}

#[tokio::test]
async fn test_translator_failure_edits_failure_text_and_caches_nothing() {
    let h = Harness::new(FakeTranslator::failing());

    h.text("/dich 你好").await;

    assert_eq!(edited_text(&h.messenger.last()), messages::TRANSLATION_FAILED);
    assert_eq!(h.bot.translation().cache_len().await, 0);
    assert_eq!(h.metrics.snapshot().translator_failures, 1);
}

#[tokio::test]
async fn test_rejected_markdown_falls_back_to_error_text() {
    let messenger = RecordingMessenger {
        fail_markdown_edits: true,
        ..RecordingMessenger::default()
    };
    let h = Harness::with_messenger(FakeTranslator::answering("*bold"), messenger);

    h.text("/dich 你好").await;

    assert_eq!(edited_text(&h.messenger.last()), messages::DELIVERY_FAILED);
    // The translation itself succeeded and stays cached.
    assert_eq!(h.bot.translation().cache_len().await, 1);
}

// === Auto-mode ===

#[tokio::test]
async fn test_auto_mode_off_ignores_text() {
    let h = Harness::new(FakeTranslator::answering("Xin chào"));

    h.text("你好").await;

    assert_eq!(h.translator.calls(), 0);
    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn test_auto_mode_on_translates_chinese_and_vietnamese_only() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.text("/auto_on").await;
    assert!(matches!(&h.messenger.last(), Sent::Text { text, .. } if text == messages::AUTO_ON));

    h.text("你好").await;
    assert_eq!(h.translator.calls(), 1);
    assert_eq!(h.translator.last_target(), TargetLanguage::Vietnamese);
    assert!(edited_text(&h.messenger.last()).contains("🤖 Tự động"));

    h.text("Xin chào").await;
    assert_eq!(h.translator.calls(), 2);
    assert_eq!(h.translator.last_target(), TargetLanguage::Chinese);

    h.text("hello").await;
    assert_eq!(h.translator.calls(), 2);
    assert_eq!(h.metrics.snapshot().auto_translations, 2);

    h.text("/auto_off").await;
    h.text("你好吗").await;
    assert_eq!(h.translator.calls(), 2);
}

#[tokio::test]
async fn test_slash_text_that_is_not_a_command_goes_to_auto_mode() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.text("/auto_on").await;
    h.text("/你好").await;
    h.text("/ 你好").await;

    assert_eq!(h.translator.calls(), 2);
    assert_eq!(h.translator.last_target(), TargetLanguage::Vietnamese);
    assert_eq!(h.metrics.snapshot().commands_handled, 1);
    assert_eq!(h.metrics.snapshot().auto_translations, 2);
}

#[tokio::test]
async fn test_start_resets_auto_mode() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.text("/auto_on").await;
    assert!(h.bot.settings().is_auto_translate(USER).await);

    h.text("/start").await;
    assert!(!h.bot.settings().is_auto_translate(USER).await);

    match h.messenger.last() {
        Sent::Text {
            text,
            format,
            keyboard,
            ..
        } => {
            assert_eq!(text, messages::WELCOME);
            assert_eq!(format, TextFormat::Markdown);
            assert_eq!(keyboard, Some(messages::welcome_keyboard()));
        }
        other => panic!("Expected welcome text, got {other:?}"),
    }
}

// === Other commands ===

#[tokio::test]
async fn test_unknown_and_foreign_commands_are_ignored() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.text("/translate 你好").await;
    h.text("/dich@otherbot 你好").await;

    assert!(h.messenger.sent().is_empty());
    assert_eq!(h.translator.calls(), 0);
}

#[tokio::test]
async fn test_stats_reports_counts() {
    let h = Harness::new(FakeTranslator::answering("Xin chào"));

    h.text("/start").await;
    h.text("/dich 你好").await;
    h.text("/stats").await;

    match h.messenger.last() {
        Sent::Text { text, .. } => {
            assert!(text.starts_with("📊 **Thống Kê Bot**"));
            assert!(text.contains("🔤 Từ điển: 25 từ/cụm từ"));
            assert!(text.contains("💾 Cache dịch: 1 bản dịch"));
            assert!(text.contains("👥 Người dùng: 1 users"));
            assert!(text.contains("🤖 Engine: Fake Engine"));
            assert!(text.contains("📈 Lượt dịch: 1 (cache: 0, tỉ lệ cache: 0%, lỗi: 0)"));
        }
        other => panic!("Expected stats text, got {other:?}"),
    }
}

// === Buttons ===

#[tokio::test]
async fn test_settings_toggle_and_home_buttons() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.press(messages::CB_SETTINGS).await;
    let sent = h.messenger.sent();
    assert_eq!(sent[0], Sent::Answer("cb-1".to_string()));
    match &sent[1] {
        Sent::Edit {
            message_id,
            text,
            keyboard,
        } => {
            assert_eq!(*message_id, 77);
            assert!(text.contains("Dịch tự động: **Tắt**"));
            assert_eq!(keyboard, &Some(messages::settings_keyboard()));
        }
        other => panic!("Expected settings panel, got {other:?}"),
    }

    h.press(messages::CB_TOGGLE_AUTO).await;
    assert!(h.bot.settings().is_auto_translate(USER).await);
    assert_eq!(edited_text(&h.messenger.last()), "✅ Đã bật chế độ dịch tự động!");

    h.press(messages::CB_TOGGLE_AUTO).await;
    assert!(!h.bot.settings().is_auto_translate(USER).await);
    assert_eq!(edited_text(&h.messenger.last()), "✅ Đã tắt chế độ dịch tự động!");

    h.press(messages::CB_HOME).await;
    assert_eq!(edited_text(&h.messenger.last()), messages::WELCOME);
}

#[tokio::test]
async fn test_help_button_sends_new_message() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.press(messages::CB_HELP).await;

    let sent = h.messenger.sent();
    assert_eq!(sent[0], Sent::Answer("cb-1".to_string()));
    assert!(matches!(
        &sent[1],
        Sent::Text { chat_id: USER, text, .. } if text == messages::HELP
    ));
}

#[tokio::test]
async fn test_unknown_button_is_only_answered() {
    let h = Harness::new(FakeTranslator::answering("ok"));

    h.press("bogus").await;

    assert_eq!(h.messenger.sent(), vec![Sent::Answer("cb-1".to_string())]);
}
