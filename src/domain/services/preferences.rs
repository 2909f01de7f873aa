#[cfg(test)]
#[path = "preferences_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Preferences;

pub struct PreferencesStore {
    pub file_path: path::PathBuf,
}

impl Default for PreferencesStore {
    fn default() -> PreferencesStore {
        return PreferencesStore::new(path::PathBuf::from(Config::get(
            ConfigKey::PreferencesFile,
        )));
    }
}

impl PreferencesStore {
    pub fn new(file_path: path::PathBuf) -> PreferencesStore {
        return PreferencesStore { file_path };
    }

    async fn read(&self) -> Result<Preferences> {
        if !self.file_path.exists() {
            return Ok(Preferences::default());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        let preferences: Preferences = serde_yaml::from_str(&payload)?;

        return Ok(preferences);
    }

    /// Missing or unreadable preferences fall back to the defaults.
    pub async fn load(&self) -> Preferences {
        match self.read().await {
            Ok(preferences) => return preferences,
            Err(err) => {
                tracing::warn!(error = ?err, file = ?self.file_path, "failed to read preferences");
                return Preferences::default();
            }
        }
    }

    pub async fn save(&self, preferences: &Preferences) -> Result<()> {
        let payload = serde_yaml::to_string(preferences)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }
}
