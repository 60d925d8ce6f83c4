//! Application configuration.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram Bot API configuration.
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Gemini translator configuration.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Telegram Bot API configuration.
#[derive(Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by `@BotFather`.
    #[serde(default)]
    pub token: String,
    /// Base URL of the Bot API.
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    /// Long polling timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

/// Gemini `generateContent` configuration.
#[derive(Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: String,
    /// Base URL including the API version.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum output tokens per request.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_temperature() -> f64 {
    0.3
}

const fn default_max_output_tokens() -> u32 {
    1000
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_telegram_api_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &redact(&self.token))
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` in the working directory (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `DICHBOT_ENV`)
    /// 4. Environment variables with `DICHBOT__` prefix
    /// 5. `TELEGRAM_TOKEN` and `GEMINI_API_KEY`
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("DICHBOT_ENV").unwrap_or_else(|_| "development".to_string());
        tracing::debug!(env = %env, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DICHBOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("telegram.token", std::env::var(TELEGRAM_TOKEN_ENV).ok())?
            .set_override_option("gemini.api_key", std::env::var(GEMINI_API_KEY_ENV).ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        config.try_deserialize()
    }

    /// Reject configurations the bot cannot start with.
    pub fn validate(&self) -> AppResult<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(AppError::Config(format!("{TELEGRAM_TOKEN_ENV} is not set")));
        }
        if self.gemini.api_key.trim().is_empty() {
            return Err(AppError::Config(format!("{GEMINI_API_KEY_ENV} is not set")));
        }
        Url::parse(&self.telegram.api_url)
            .map_err(|e| AppError::Config(format!("invalid telegram.api_url: {e}")))?;
        Url::parse(&self.gemini.base_url)
            .map_err(|e| AppError::Config(format!("invalid gemini.base_url: {e}")))?;
        if self.gemini.timeout_secs == 0 {
            return Err(AppError::Config("gemini.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
