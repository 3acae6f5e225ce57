//! Configuration infrastructure
//!
//! Site access settings and logging settings, persisted as JSON in the user
//! configuration directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the content site is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Mirror to talk to; every relative path is joined onto it
    pub base_url: String,

    pub user_agent: String,

    pub timeout_seconds: u64,

    pub max_requests_per_second: u32,

    /// Extra attempts after a network failure
    pub retry_count: u32,

    /// Base delay of the linear retry backoff
    pub retry_delay_ms: u64,

    /// Page size reported for listing pages
    pub page_size: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            retry_count: defaults::RETRY_ATTEMPTS,
            retry_delay_ms: defaults::RETRY_DELAY_MS,
            page_size: defaults::PAGE_SIZE,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory of the rolling log files; the platform data dir when unset
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            module_filters: HashMap::new(),
        }
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);
        Ok(config_dir)
    }

    /// Get application data directory
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get user data directory")?
            .join(defaults::APP_DIR_NAME);
        Ok(data_dir)
    }

    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Manager for an explicit file location
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// An unparsable file is kept aside as `*.json.corrupted` and replaced by
    /// defaults.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .context("Failed to read configuration file")?;

        match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => {
                info!("Loaded configuration from: {:?}", self.config_path);
                Ok(config)
            }
            Err(parse_error) => {
                warn!("Configuration file is not valid: {}", parse_error);
                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(e) = fs::copy(&self.config_path, &backup_path).await {
                    warn!("Failed to create backup of corrupted config: {}", e);
                } else {
                    info!("Backed up corrupted config to: {:?}", backup_path);
                }

                let default_config = AppConfig::default();
                self.save_config(&default_config)
                    .await
                    .context("Failed to save default configuration")?;
                warn!("Reset to default configuration");
                Ok(default_config)
            }
        }
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Update site settings in place
    pub async fn update_site_config<F>(&self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut SiteConfig),
    {
        let mut config = self.load_config().await?;
        updater(&mut config.site);
        self.save_config(&config).await
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Endpoint paths, relative to [`SiteConfig::base_url`]
pub mod site {
    pub const SEARCH: &str = "search/";
    pub const QUICK_CONTENT: &str = "engine/ajax/quick_content.php";
    pub const PERSON_INFO: &str = "ajax/person_info/";
    pub const CDN_SERIES: &str = "ajax/get_cdn_series/";
    pub const COMMENTS: &str = "ajax/get_comments/";
    pub const COMMENT_LIKE: &str = "engine/ajax/comments_like.php";
    pub const COMMENT_LIKES: &str = "ajax/comments_likes/";
    pub const LOGIN: &str = "ajax/login/";
    pub const CONTINUE_WATCHING: &str = "continue/";

    /// Default translator the player falls back to
    pub const DEFAULT_TRANSLATOR_ID: u64 = 110;

    /// `user/{id}/`
    pub fn user_profile(user_id: &str) -> String {
        format!("user/{user_id}/")
    }

    /// Listing path of `section` (`films/`, a genre path, ...) at `page`
    pub fn listing_page(section: &str, page: u32) -> String {
        let section = section.trim_start_matches('/');
        let section = if section.is_empty() || section.ends_with('/') {
            section.to_string()
        } else {
            format!("{section}/")
        };
        if page > 1 {
            format!("{section}page/{page}/")
        } else {
            section
        }
    }
}

/// Default configuration values
pub mod defaults {
    pub const APP_DIR_NAME: &str = "rezka-scraper";
    pub const CONFIG_FILE_NAME: &str = "config.json";

    pub const BASE_URL: &str = "https://rezka.ag/";
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
    pub const MAX_REQUESTS_PER_SECOND: u32 = 5;
    pub const RETRY_ATTEMPTS: u32 = 2;
    pub const RETRY_DELAY_MS: u64 = 1000;
    pub const MAX_REDIRECTS: usize = 5;

    /// Cards per listing page on the site
    pub const PAGE_SIZE: u32 = 36;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_listing_paths() {
        assert_eq!(site::listing_page("films", 1), "films/");
        assert_eq!(site::listing_page("/films/drama/", 3), "films/drama/page/3/");
        assert_eq!(site::listing_page("", 2), "page/2/");
        assert_eq!(site::user_profile("42"), "user/42/");
    }

    #[tokio::test]
    async fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested").join("config.json"));

        let config = manager.load_config().await.unwrap();
        assert_eq!(config.site, SiteConfig::default());
        assert!(manager.config_path().exists());
    }

    #[tokio::test]
    async fn test_round_trip_and_update() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.json"));

        manager
            .update_site_config(|site| site.base_url = "https://hdrezka.me/".to_string())
            .await
            .unwrap();
        let config = manager.load_config().await.unwrap();
        assert_eq!(config.site.base_url, "https://hdrezka.me/");
        assert_eq!(config.site.page_size, defaults::PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_corrupted_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let manager = ConfigManager::with_path(&path);
        let config = manager.load_config().await.unwrap();
        assert_eq!(config.site.base_url, defaults::BASE_URL);
        assert!(dir.path().join("config.json.corrupted").exists());
    }

    #[test]
    fn test_partial_file_fills_missing_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "site": { "retry_count": 0 } }"#).unwrap();
        assert_eq!(config.site.retry_count, 0);
        assert_eq!(config.site.base_url, defaults::BASE_URL);
        assert_eq!(config.logging.level, "info");
    }
}
