//! Error types for dichbot.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === User Errors ===
    /// A translation command was invoked without text. Carries the usage hint.
    #[error("Missing input: {0}")]
    MissingInput(String),

    // === Translator Errors ===
    /// Non-success status, transport error or timeout from the translator.
    #[error("Translator unavailable: {0}")]
    TranslatorUnavailable(String),

    /// The translator answered but produced no usable candidate text.
    #[error("Translator returned no usable candidate")]
    EmptyResponse,

    // === Server Errors ===
    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "MISSING_INPUT",
            Self::TranslatorUnavailable(_) => "TRANSLATOR_UNAVAILABLE",
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::Messaging(_) => "MESSAGING_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error is a translator failure.
    #[must_use]
    pub const fn is_translation_failure(&self) -> bool {
        matches!(self, Self::TranslatorUnavailable(_) | Self::EmptyResponse)
    }
}

// === From implementations ===

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
