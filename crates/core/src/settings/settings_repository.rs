//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::Settings;

/// Repository trait for per-user settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Stored settings for a user, if any were ever saved.
    fn get_settings(&self, user_id: &str) -> Result<Option<Settings>>;

    /// Upserts on `user_id`.
    async fn save_settings(&self, settings: &Settings) -> Result<Settings>;
}
