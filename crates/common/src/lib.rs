//! Common utilities and shared types for dichbot.
//!
//! This crate provides foundational components used across all dichbot crates:
//!
//! - **Configuration**: Bot and translator settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Metrics**: Process-wide counters via [`Metrics`]
//!
//! # Example
//!
//! ```no_run
//! use dichbot_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!     println!("Using model {}", config.gemini.model);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;

pub use config::{Config, GeminiConfig, TelegramConfig};
pub use error::{AppError, AppResult};
pub use metrics::{Metrics, MetricsSnapshot, get_metrics};
