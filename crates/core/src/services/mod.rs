//! Translation services.

pub mod dictionary;
pub mod gemini;
pub mod language;
pub mod routing;
pub mod settings;
pub mod translation;

pub use dictionary::Dictionary;
pub use gemini::GeminiTranslator;
pub use language::{Language, TargetLanguage, contains_chinese, contains_vietnamese, detect};
pub use routing::{Route, Trigger, route};
pub use settings::{SettingsStore, UserId, UserSettings};
pub use translation::{TranslationService, Translator};
