//! Configuration management for feed-cli.

use anyhow::{Context, Result};
use feed_client::{DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI settings stored locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// WordPress API root the fetch command talks to.
    pub base_url: String,
    /// Posts requested per remote page.
    pub per_page: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CliConfig {
    /// Load settings from a directory, using defaults when no settings
    /// file exists yet.
    pub async fn load_or_default(data_dir: &Path) -> Result<Self> {
        let path = settings_path(data_dir);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).context("Invalid settings file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).context("Failed to read settings file"),
        }
    }

    /// Save settings to a directory.
    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        let path = settings_path(data_dir);
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, contents)
            .await
            .context("Failed to save settings")?;
        Ok(())
    }
}

/// Path of the settings file inside the data directory.
fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Path of the SQLite post cache inside the data directory.
pub fn cache_path(data_dir: &Path) -> PathBuf {
    data_dir.join("posts.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_settings_fall_back_to_defaults() {
        let dir = tempdir().unwrap();

        let settings = CliConfig::load_or_default(dir.path()).await.unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
    }

    #[tokio::test]
    async fn settings_roundtrip() {
        let dir = tempdir().unwrap();

        let settings = CliConfig {
            base_url: "https://example.org/wp-json".to_string(),
            per_page: 25,
        };
        settings.save(dir.path()).await.unwrap();

        let loaded = CliConfig::load_or_default(dir.path()).await.unwrap();
        assert_eq!(loaded.base_url, "https://example.org/wp-json");
        assert_eq!(loaded.per_page, 25);
    }

    #[tokio::test]
    async fn corrupt_settings_file_errors() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.json"), "not json")
            .await
            .unwrap();

        let result = CliConfig::load_or_default(dir.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn cache_lives_inside_the_data_dir() {
        let path = cache_path(Path::new("/tmp/feed"));
        assert_eq!(path, Path::new("/tmp/feed/posts.db"));
    }
}
