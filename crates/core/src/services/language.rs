//! Language classification for incoming text.
//!
//! Detection is a two-step heuristic over code points: any CJK unified
//! ideograph makes the text Chinese, otherwise any Vietnamese marked letter
//! makes it Vietnamese, otherwise it is treated as English. The order of the
//! checks is the tie-break rule for mixed text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language detected in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Chinese,
    Vietnamese,
    /// Neither Chinese nor Vietnamese. Routed as English.
    Other,
}

/// Language a translation can be requested in.
///
/// `Other` is a valid source classification but never a valid target, so
/// targets get their own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLanguage {
    Chinese,
    #[default]
    Vietnamese,
}

impl Language {
    /// Short language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Chinese => "zh",
            Self::Vietnamese => "vi",
            Self::Other => "en",
        }
    }

    /// Flag shown next to the language in replies.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Chinese => "🇨🇳",
            Self::Vietnamese => "🇻🇳",
            Self::Other => "🇺🇸",
        }
    }
}

impl TargetLanguage {
    /// Short language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.as_language().code()
    }

    /// Name of the language as written into the translator prompt.
    #[must_use]
    pub const fn prompt_name(self) -> &'static str {
        match self {
            Self::Chinese => "tiếng Trung (Simplified Chinese)",
            Self::Vietnamese => "tiếng Việt",
        }
    }

    /// The other target of the Chinese/Vietnamese pair.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Chinese => Self::Vietnamese,
            Self::Vietnamese => Self::Chinese,
        }
    }

    /// Widen to a [`Language`].
    #[must_use]
    pub const fn as_language(self) -> Language {
        match self {
            Self::Chinese => Language::Chinese,
            Self::Vietnamese => Language::Vietnamese,
        }
    }
}

impl From<TargetLanguage> for Language {
    fn from(target: TargetLanguage) -> Self {
        target.as_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Vietnamese letters carrying a diacritic, in both cases.
const VIETNAMESE_MARKED: &str = "ăâđêôơư\
    áàảãạấầẩẫậắằẳẵặéèẻẽẹếềểễệíìỉĩịóòỏõọốồổỗộớờởỡợúùủũụứừửữựýỳỷỹỵ\
    ĂÂĐÊÔƠƯ\
    ÁÀẢÃẠẤẦẨẪẬẮẰẲẴẶÉÈẺẼẸẾỀỂỄỆÍÌỈĨỊÓÒỎÕỌỐỒỔỖỘỚỜỞỠỢÚÙỦŨỤỨỪỬỮỰÝỲỶỸỴ";

/// Whether `c` is in the CJK Unified Ideographs block.
#[must_use]
pub const fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}')
}

/// Whether `c` is a Vietnamese marked letter.
#[must_use]
pub fn is_vietnamese_marked(c: char) -> bool {
    VIETNAMESE_MARKED.contains(c)
}

/// Whether the text contains at least one CJK unified ideograph.
#[must_use]
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(is_cjk_ideograph)
}

/// Whether the text contains at least one Vietnamese marked letter.
#[must_use]
pub fn contains_vietnamese(text: &str) -> bool {
    text.chars().any(is_vietnamese_marked)
}

/// Classify `text`. Chinese wins over Vietnamese when both are present.
#[must_use]
pub fn detect(text: &str) -> Language {
    if contains_chinese(text) {
        Language::Chinese
    } else if contains_vietnamese(text) {
        Language::Vietnamese
    } else {
        Language::Other
    }
}
