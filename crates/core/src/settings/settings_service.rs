use super::SettingsRepositoryTrait;
use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Settings for a user; an empty record when none is stored.
    fn get_settings(&self, user_id: &str) -> Result<Settings>;

    async fn update_settings(&self, user_id: &str, update: &SettingsUpdate) -> Result<Settings>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self, user_id: &str) -> Result<Settings> {
        Ok(self
            .settings_repository
            .get_settings(user_id)?
            .unwrap_or_else(|| Settings {
                user_id: user_id.to_string(),
                ..Default::default()
            }))
    }

    async fn update_settings(&self, user_id: &str, update: &SettingsUpdate) -> Result<Settings> {
        update.validate()?;
        let mut settings = self.get_settings(user_id)?;
        settings.apply(update);
        debug!("Updating settings for user {}", user_id);
        self.settings_repository.save_settings(&settings).await
    }
}
