//! Bundled Chinese/Vietnamese phrase list.
//!
//! The list is reported by `/stats` but is not used to answer translation
//! requests; every translation goes through the translator.

use std::collections::HashMap;

const ENTRIES: &[(&str, &str)] = &[
    ("你好", "Xin chào"),
    ("再见", "Tạm biệt"),
    ("谢谢", "Cảm ơn"),
    ("对不起", "Xin lỗi"),
    ("我", "Tôi"),
    ("你", "Bạn"),
    ("他", "Anh ấy"),
    ("她", "Cô ấy"),
    ("我们", "Chúng tôi"),
    ("是", "là"),
    ("不是", "không phải"),
    ("有", "có"),
    ("没有", "không có"),
    ("好", "tốt"),
    ("不好", "không tốt"),
    ("可以", "có thể"),
    ("不可以", "không thể"),
    ("Xin chào", "你好"),
    ("Cảm ơn", "谢谢"),
    ("Tôi", "我"),
    ("Bạn", "你"),
    ("Chúng tôi", "我们"),
    ("là", "是"),
    ("không", "不"),
    ("có", "有"),
];

/// Phrase list keyed by exact source phrase.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: HashMap<&'static str, &'static str>,
}

impl Dictionary {
    /// The bundled phrase list.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: ENTRIES.iter().copied().collect(),
        }
    }

    /// Exact-match lookup.
    #[must_use]
    pub fn lookup(&self, phrase: &str) -> Option<&'static str> {
        self.entries.get(phrase).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
