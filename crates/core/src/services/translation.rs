//! Translation service with an in-memory memoization cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use dichbot_common::{AppError, AppResult, Metrics};

use crate::services::language::TargetLanguage;

/// A text generation backend that can follow a translation instruction.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Run `prompt` and return the raw candidate text.
    ///
    /// Implementations return [`AppError::TranslatorUnavailable`] for
    /// transport, timeout and status failures, and [`AppError::EmptyResponse`]
    /// when the backend answers without a candidate.
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Human-readable engine name.
    fn name(&self) -> &str;

    /// Release network resources held by the backend.
    async fn close(&self) {}
}

/// Key of the memoization cache: exact source text and target language.
type CacheKey = (String, TargetLanguage);

/// Translation service.
///
/// Results are memoized per `(text, target)` for the lifetime of the
/// process. Entries are never invalidated, replaced or evicted; failures are
/// never cached.
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,
    metrics: Arc<Metrics>,
}

impl TranslationService {
    /// Create a new translation service.
    #[must_use]
    pub fn new(translator: Arc<dyn Translator>, metrics: Arc<Metrics>) -> Self {
        Self {
            translator,
            cache: Arc::new(RwLock::new(HashMap::new())),
            metrics,
        }
    }

    /// Build the instruction sent to the translator.
    #[must_use]
    pub fn build_prompt(text: &str, target: TargetLanguage) -> String {
        format!(
            "Hãy dịch văn bản sau sang {} một cách tự nhiên và chính xác nhất:\n\n\"{text}\"\n\nChỉ trả về bản dịch, không thêm giải thích hay ghi chú gì khác.",
            target.prompt_name()
        )
    }

    /// Translate `text` into `target`.
    ///
    /// A cached result is returned without calling the translator. On a miss
    /// the translator is called once; a non-empty result is trimmed, cached
    /// and returned. Any failure is logged and returned as an error without
    /// touching the cache.
    pub async fn translate(&self, text: &str, target: TargetLanguage) -> AppResult<String> {
        let key = (text.to_string(), target);

        let cached = self.cache.read().await.get(&key).cloned();
        if let Some(cached) = cached {
            self.metrics.record_translation(true);
            debug!(target_lang = %target, "Translation cache hit");
            return Ok(cached);
        }
        self.metrics.record_translation(false);

        let prompt = Self::build_prompt(text, target);
        let result = self.translator.generate(&prompt).await.and_then(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(AppError::EmptyResponse)
            } else {
                Ok(trimmed.to_string())
            }
        });

        match result {
            Ok(translation) => {
                let mut cache = self.cache.write().await;
                // A concurrent miss may have filled the key first; the first value stays.
                let stored = cache.entry(key).or_insert(translation).clone();
                debug!(target_lang = %target, cache_size = cache.len(), "Translation cached");
                Ok(stored)
            }
            Err(e) => {
                self.metrics.record_translator_failure();
                warn!(
                    error = %e,
                    code = e.error_code(),
                    engine = self.translator.name(),
                    target_lang = %target,
                    "Translation failed"
                );
                Err(e)
            }
        }
    }

    /// Look up a cached translation without calling the translator.
    pub async fn cached(&self, text: &str, target: TargetLanguage) -> Option<String> {
        self.cache
            .read()
            .await
            .get(&(text.to_string(), target))
            .cloned()
    }

    /// Number of memoized translations.
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Name of the translation engine.
    #[must_use]
    pub fn engine_name(&self) -> &str {
        self.translator.name()
    }

    /// Release the translator's network resources.
    pub async fn close(&self) {
        self.translator.close().await;
    }
}
