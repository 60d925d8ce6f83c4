//! Per-user settings, kept in memory for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::language::TargetLanguage;

/// Opaque user identifier assigned by the messaging platform.
pub type UserId = i64;

/// Settings of a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserSettings {
    /// Translate every qualifying message, not only explicit commands.
    pub auto_translate: bool,
    /// Preferred target language. Shown in the settings panel.
    pub preferred_target: TargetLanguage,
}

/// In-memory settings table keyed by user id.
///
/// Records are created lazily with default values and never removed.
/// Reading an unknown user yields the defaults without creating a record.
#[derive(Clone, Default)]
pub struct SettingsStore {
    users: Arc<RwLock<HashMap<UserId, UserSettings>>>,
}

impl SettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings of `user`, or the defaults if the user has none yet.
    pub async fn get(&self, user: UserId) -> UserSettings {
        self.users
            .read()
            .await
            .get(&user)
            .copied()
            .unwrap_or_default()
    }

    /// Reset `user` to default settings, creating the record if needed.
    pub async fn reset(&self, user: UserId) -> UserSettings {
        let settings = UserSettings::default();
        self.users.write().await.insert(user, settings);
        settings
    }

    /// Enable or disable auto-translate for `user`.
    pub async fn set_auto_translate(&self, user: UserId, enabled: bool) {
        self.users
            .write()
            .await
            .entry(user)
            .or_default()
            .auto_translate = enabled;
    }

    /// Flip auto-translate for `user` and return the new value.
    pub async fn toggle_auto_translate(&self, user: UserId) -> bool {
        let mut users = self.users.write().await;
        let settings = users.entry(user).or_default();
        settings.auto_translate = !settings.auto_translate;
        settings.auto_translate
    }

    /// Whether auto-translate is enabled for `user`.
    pub async fn is_auto_translate(&self, user: UserId) -> bool {
        self.get(user).await.auto_translate
    }

    /// Number of users with a settings record.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no user has a settings record yet.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
