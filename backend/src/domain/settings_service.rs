//! User preferences shown on the settings page.

use shared::UserSettings;
use std::sync::Arc;
use tracing::info;

use crate::storage::{Connection, SettingsStorage};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Full name cannot be empty")]
    EmptyFullName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("Theme cannot be empty")]
    EmptyTheme,
    #[error("Currency cannot be empty")]
    EmptyCurrency,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    settings_repository: C::SettingsRepository,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            settings_repository: connection.create_settings_repository(),
        }
    }

    pub async fn get_settings(&self) -> Result<UserSettings, SettingsError> {
        Ok(self.settings_repository.get_settings().await?)
    }

    /// Validate and store a full replacement of the settings.
    /// Text fields are trimmed before saving.
    pub async fn update_settings(&self, mut settings: UserSettings) -> Result<UserSettings, SettingsError> {
        settings.profile.full_name = settings.profile.full_name.trim().to_string();
        settings.profile.email = settings.profile.email.trim().to_string();
        settings.appearance.theme = settings.appearance.theme.trim().to_string();
        settings.appearance.currency = settings.appearance.currency.trim().to_string();

        if settings.profile.full_name.is_empty() {
            return Err(SettingsError::EmptyFullName);
        }
        if !is_plausible_email(&settings.profile.email) {
            return Err(SettingsError::InvalidEmail(settings.profile.email));
        }
        if settings.appearance.theme.is_empty() {
            return Err(SettingsError::EmptyTheme);
        }
        if settings.appearance.currency.is_empty() {
            return Err(SettingsError::EmptyCurrency);
        }

        self.settings_repository.save_settings(&settings).await?;
        info!("Updated settings for {}", settings.profile.full_name);
        Ok(settings)
    }
}

/// Something before and after a single '@', with a dot in the domain part
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
