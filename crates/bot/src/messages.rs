//! Reply texts and inline keyboards.

#![allow(missing_docs)]

use dichbot_common::MetricsSnapshot;
use dichbot_core::{Language, TargetLanguage, UserSettings};
use dichbot_telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const WELCOME: &str = "🤖 **Bot Dịch Đa Ngôn Ngữ**

🌟 Tôi có thể dịch:
• Tiếng Trung → Tiếng Việt
• Tiếng Việt → Tiếng Trung
• Bất kỳ ngôn ngữ nào → Tiếng Việt

🚀 **Cách sử dụng:**
• `/dich <văn bản>` - Tự động phát hiện và dịch
• `/dich_zh <văn bản>` - Dịch sang tiếng Trung
• `/dich_vi <văn bản>` - Dịch sang tiếng Việt
• `/auto_on` - Bật dịch tự động
• `/auto_off` - Tắt dịch tự động

Powered by Google Gemini Flash ⚡";

pub const HELP: &str = "📖 **Hướng Dẫn Sử Dụng**

**Lệnh dịch:**
• `/dich <text>` - Tự động nhận diện và dịch
• `/dich_zh <text>` - Dịch sang tiếng Trung
• `/dich_vi <text>` - Dịch sang tiếng Việt

**Chế độ tự động:**
• `/auto_on` - Bật dịch tự động mọi tin nhắn
• `/auto_off` - Tắt dịch tự động

**Thống kê:**
• `/stats` - Xem thống kê bot

**Ví dụ:**
```
/dich 你好世界
/dich Xin chào thế giới
/dich_zh Hello world
```

🔥 **Tính năng đặc biệt:**
• Sử dụng AI Gemini Flash cho độ chính xác cao
• Cache thông minh giảm thời gian phản hồi
• Hỗ trợ dịch đa ngôn ngữ sang tiếng Việt";

pub const AUTO_ON: &str =
    "✅ Đã bật dịch tự động! Tôi sẽ dịch mọi tin nhắn có tiếng Trung hoặc tiếng Việt.";
pub const AUTO_OFF: &str = "❌ Đã tắt dịch tự động! Sử dụng lệnh /dich để dịch thủ công.";

pub const TRANSLATING: &str = "🔄 Đang dịch...";
pub const TRANSLATION_FAILED: &str = "❌ Không thể dịch văn bản này. Vui lòng thử lại!";
/// Shown when the result card itself could not be delivered.
pub const DELIVERY_FAILED: &str = "❌ Có lỗi xảy ra khi dịch. Vui lòng thử lại!";

pub const USAGE_DICH: &str = "❌ Vui lòng nhập văn bản cần dịch!\nVí dụ: `/dich 你好世界`";
pub const USAGE_DICH_ZH: &str = "❌ Vui lòng nhập văn bản cần dịch!\nVí dụ: `/dich_zh Xin chào`";
pub const USAGE_DICH_VI: &str = "❌ Vui lòng nhập văn bản cần dịch!\nVí dụ: `/dich_vi Hello world`";

// Callback data carried by the inline buttons.
pub const CB_SETTINGS: &str = "settings";
pub const CB_HELP: &str = "help";
pub const CB_TOGGLE_AUTO: &str = "toggle_auto";
pub const CB_HOME: &str = "home";

#[must_use]
pub fn welcome_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![
        InlineKeyboardButton::callback("🔧 Cài đặt", CB_SETTINGS),
        InlineKeyboardButton::callback("📖 Hướng dẫn", CB_HELP),
    ])
}

#[must_use]
pub fn settings_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(vec![
        InlineKeyboardButton::callback("🔄 Toggle Auto Translate", CB_TOGGLE_AUTO),
        InlineKeyboardButton::callback("🏠 Về trang chủ", CB_HOME),
    ])
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "Bật" } else { "Tắt" }
}

const fn target_label(target: TargetLanguage) -> &'static str {
    match target {
        TargetLanguage::Chinese => "Tiếng Trung",
        TargetLanguage::Vietnamese => "Tiếng Việt",
    }
}

/// Settings panel for one user.
#[must_use]
pub fn settings_panel(settings: &UserSettings) -> String {
    format!(
        "⚙️ **Cài Đặt**\n\n🤖 Dịch tự động: **{}**\n🌐 Ngôn ngữ ưu tiên: {}\n\nChọn tùy chọn bên dưới:",
        on_off(settings.auto_translate),
        target_label(settings.preferred_target)
    )
}

/// Confirmation after the toggle button.
#[must_use]
pub fn auto_toggled(enabled: bool) -> String {
    format!(
        "✅ Đã {} chế độ dịch tự động!",
        on_off(enabled).to_lowercase()
    )
}

/// Everything a translation result card shows.
#[derive(Debug, Clone, Copy)]
pub struct ResultCard<'a> {
    pub source: Language,
    pub target: TargetLanguage,
    pub manual: bool,
    pub original: &'a str,
    pub translation: &'a str,
    /// Local time, already formatted.
    pub time: &'a str,
}

impl ResultCard<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        let mode = if self.manual {
            "🎯 Thủ công"
        } else {
            "🤖 Tự động"
        };
        format!(
            "**{} → {} Dịch thuật** {mode}\n\n📝 **Gốc:**\n{}\n\n✨ **Dịch:**\n{}\n\n⚡ _Powered by Gemini Flash_\n🕐 {}",
            self.source.flag(),
            self.target.as_language().flag(),
            self.original,
            self.translation,
            self.time
        )
    }
}

/// Figures reported by `/stats`.
#[derive(Debug, Clone)]
pub struct StatsReport<'a> {
    pub dictionary_entries: usize,
    pub cached_translations: usize,
    pub users: usize,
    pub engine: &'a str,
    pub metrics: MetricsSnapshot,
    /// Local date and time, already formatted.
    pub time: &'a str,
}

impl StatsReport<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::from("📊 **Thống Kê Bot**\n\n");
        text.push_str(&format!("🔤 Từ điển: {} từ/cụm từ\n", self.dictionary_entries));
        text.push_str(&format!("💾 Cache dịch: {} bản dịch\n", self.cached_translations));
        text.push_str(&format!("👥 Người dùng: {} users\n", self.users));
        text.push_str(&format!("🤖 Engine: {}\n\n", self.engine));
        text.push_str(&format!(
            "📈 Lượt dịch: {} (cache: {}, tỉ lệ cache: {:.0}%, lỗi: {})\n\n",
            self.metrics.translations_requested,
            self.metrics.cache_hits,
            self.metrics.cache_hit_rate * 100.0,
            self.metrics.translator_failures
        ));
        text.push_str(&format!("⏰ Thời gian: {}", self.time));
        text
    }
}
