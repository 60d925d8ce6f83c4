//! dichbot entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dichbot_bot::{Bot, run_polling};
use dichbot_common::{Config, get_metrics};
use dichbot_core::{GeminiTranslator, SettingsStore, TranslationService};
use dichbot_telegram::TelegramClient;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dichbot=info".into()),
        )
        .init();

    info!("Starting dichbot...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = format!("{e:#}"), "Cannot start");
            std::process::exit(1);
        }
    };

    let poll_timeout = Duration::from_secs(config.telegram.poll_timeout_secs);
    let client = TelegramClient::new(&config.telegram.api_url, &config.telegram.token, poll_timeout)
        .context("failed to build Telegram client")?;

    let metrics = get_metrics().clone();
    let translator = Arc::new(GeminiTranslator::new(config.gemini));
    let translation = TranslationService::new(translator, metrics.clone());
    info!(engine = translation.engine_name(), "Translation engine ready");

    let mut bot = Bot::new(
        translation.clone(),
        SettingsStore::new(),
        Arc::new(client.clone()),
        metrics,
    );
    match client.get_me().await {
        Ok(me) => {
            info!(id = me.id, username = ?me.username, "Connected to Telegram");
            if let Some(username) = me.username {
                bot = bot.with_username(username);
            }
        }
        Err(e) => warn!(error = %e, "Could not identify the bot, accepting any /cmd@name"),
    }

    run_polling(client, Arc::new(bot), poll_timeout, shutdown_signal()).await;

    translation.close().await;
    info!("Translator client closed, bye");
    Ok(())
}
