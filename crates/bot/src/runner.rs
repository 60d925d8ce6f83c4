//! Long-polling loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dichbot_telegram::TelegramClient;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::bot::Bot;

/// Pause after a failed `getUpdates` call.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll for updates until `shutdown` resolves.
///
/// Each update is handled on its own task. On shutdown no new updates are
/// fetched and the in-flight tasks are awaited before returning.
pub async fn run_polling<F>(
    client: TelegramClient,
    bot: Arc<Bot>,
    poll_timeout: Duration,
    shutdown: F,
) where
    F: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;
    let mut tasks = JoinSet::new();

    info!(timeout_secs = poll_timeout.as_secs(), "Polling for updates");

    loop {
        while let Some(finished) = tasks.try_join_next() {
            if let Err(e) = finished {
                error!(error = %e, "Update task aborted");
            }
        }

        tokio::select! {
            biased;
            () = &mut shutdown => break,
            result = client.get_updates(offset, poll_timeout) => match result {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let bot = bot.clone();
                        tasks.spawn(async move { bot.handle_update(update).await });
                    }
                }
                Err(e) => {
                    error!(error = %e, retry_in_secs = RETRY_DELAY.as_secs(), "Polling failed");
                    tokio::select! {
                        biased;
                        () = &mut shutdown => break,
                        () = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            },
        }
    }

    info!(in_flight = tasks.len(), "Polling stopped, finishing in-flight updates");
    while let Some(finished) = tasks.join_next().await {
        if let Err(e) = finished {
            error!(error = %e, "Update task aborted");
        }
    }
}
