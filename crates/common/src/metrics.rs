//! Metrics collection for dichbot.
//!
//! Counters are process-wide and reset on restart, like the rest of the
//! bot's state. They back the `/stats` command.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics instance.
static METRICS: std::sync::OnceLock<Arc<Metrics>> = std::sync::OnceLock::new();

/// Get the global metrics instance.
pub fn get_metrics() -> &'static Arc<Metrics> {
    METRICS.get_or_init(|| Arc::new(Metrics::new()))
}

/// Application metrics collector.
#[derive(Debug, Default)]
pub struct Metrics {
    // === Messaging ===
    /// Updates received from the messaging platform
    pub updates_received: AtomicU64,
    /// Commands dispatched to a registered handler
    pub commands_handled: AtomicU64,
    /// Handler errors (send/edit failures and the like)
    pub handler_errors: AtomicU64,

    // === Translation ===
    /// Calls to the translation service
    pub translations_requested: AtomicU64,
    /// Translations served from the memoization cache
    pub cache_hits: AtomicU64,
    /// Translations that needed a translator call
    pub cache_misses: AtomicU64,
    /// Translator calls that failed
    pub translator_failures: AtomicU64,
    /// Translations triggered by auto-mode
    pub auto_translations: AtomicU64,
}

impl Metrics {
    /// Create a new metrics instance with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            updates_received: AtomicU64::new(0),
            commands_handled: AtomicU64::new(0),
            handler_errors: AtomicU64::new(0),

            translations_requested: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            translator_failures: AtomicU64::new(0),
            auto_translations: AtomicU64::new(0),
        }
    }

    /// Record an incoming update.
    pub fn record_update(&self) {
        self.updates_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dispatched command.
    pub fn record_command(&self) {
        self.commands_handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a handler error.
    pub fn record_handler_error(&self) {
        self.handler_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a translation lookup and whether the cache answered it.
    pub fn record_translation(&self, cache_hit: bool) {
        self.translations_requested.fetch_add(1, Ordering::Relaxed);
        if cache_hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed translator call.
    pub fn record_translator_failure(&self) {
        self.translator_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a translation triggered by auto-mode.
    pub fn record_auto_translation(&self) {
        self.auto_translations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            updates_received: self.updates_received.load(Ordering::Relaxed),
            commands_handled: self.commands_handled.load(Ordering::Relaxed),
            handler_errors: self.handler_errors.load(Ordering::Relaxed),
            translations_requested: self.translations_requested.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            translator_failures: self.translator_failures.load(Ordering::Relaxed),
            auto_translations: self.auto_translations.load(Ordering::Relaxed),
            cache_hit_rate: self.cache_hit_rate(),
        }
    }

    fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub updates_received: u64,
    pub commands_handled: u64,
    pub handler_errors: u64,
    pub translations_requested: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub translator_failures: u64,
    pub auto_translations: u64,
    /// Hits over lookups, 0.0 when nothing was looked up yet.
    pub cache_hit_rate: f64,
}
