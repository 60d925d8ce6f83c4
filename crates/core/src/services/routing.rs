//! Source/target selection for each kind of translation request.

use crate::services::language::{Language, TargetLanguage, detect};

/// What caused a translation to be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `/dich`: detect the source and pick the opposite language.
    AutoDetect,
    /// `/dich_zh`: always translate to Chinese.
    ForceChinese,
    /// `/dich_vi`: always translate to Vietnamese.
    ForceVietnamese,
    /// A plain message from a user with auto-translate enabled.
    AutoMode,
}

impl Trigger {
    /// Whether the request came from an explicit command.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        !matches!(self, Self::AutoMode)
    }
}

/// A routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Detected source language. Only used for display when the target is forced.
    pub source: Language,
    /// Language to request from the translator.
    pub target: TargetLanguage,
}

/// Decide the target language for `text`.
///
/// Returns `None` only for [`Trigger::AutoMode`] on text that is neither
/// Chinese nor Vietnamese; auto-mode silently ignores such messages.
#[must_use]
pub fn route(trigger: Trigger, text: &str) -> Option<Route> {
    let source = detect(text);

    let target = match trigger {
        Trigger::AutoDetect => match source {
            Language::Chinese => TargetLanguage::Vietnamese,
            Language::Vietnamese => TargetLanguage::Chinese,
            Language::Other => TargetLanguage::Vietnamese,
        },
        Trigger::ForceChinese => TargetLanguage::Chinese,
        Trigger::ForceVietnamese => TargetLanguage::Vietnamese,
        Trigger::AutoMode => match source {
            Language::Chinese => TargetLanguage::Vietnamese,
            Language::Vietnamese => TargetLanguage::Chinese,
            Language::Other => return None,
        },
    };

    Some(Route { source, target })
}
