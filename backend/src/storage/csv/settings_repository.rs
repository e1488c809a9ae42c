//! # Settings Repository
//!
//! Keeps the user's preferences in `settings.yaml` at the root of the data
//! directory:
//!
//! ```yaml
//! profile:
//!   fullName: John Doe
//!   email: john.doe@example.com
//! notifications:
//!   email: true
//!   budget: true
//!   weekly: false
//! appearance:
//!   theme: Light
//!   currency: USD ($)
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::UserSettings;
use std::fs;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::storage::traits::SettingsStorage;

#[derive(Clone)]
pub struct YamlSettingsRepository {
    connection: CsvConnection,
}

impl YamlSettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SettingsStorage for YamlSettingsRepository {
    async fn get_settings(&self) -> Result<UserSettings> {
        let file_path = self.connection.settings_file_path();
        if !file_path.exists() {
            debug!("No settings file at {}, using defaults", file_path.display());
            return Ok(UserSettings::default());
        }

        let contents = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        let settings = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;
        Ok(settings)
    }

    async fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let yaml = serde_yaml::to_string(settings)?;
        self.connection
            .write_atomically(&self.connection.settings_file_path(), yaml.as_bytes())?;
        info!("Saved settings to {}", self.connection.settings_file_path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = YamlSettingsRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        assert_eq!(repo.get_settings().await.unwrap(), UserSettings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = YamlSettingsRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        let mut settings = UserSettings::default();
        settings.profile.full_name = "Jane Roe".to_string();
        settings.notifications.weekly = true;
        settings.appearance.theme = "Dark".to_string();
        repo.save_settings(&settings).await.unwrap();

        assert_eq!(repo.get_settings().await.unwrap(), settings);
        let raw = fs::read_to_string(temp_dir.path().join("settings.yaml")).unwrap();
        assert!(raw.contains("fullName: Jane Roe"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("settings.yaml"), "profile: [not, a, map").unwrap();
        let repo = YamlSettingsRepository::new(CsvConnection::new(temp_dir.path()).unwrap());

        assert!(repo.get_settings().await.is_err());
    }
}
