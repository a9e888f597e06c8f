use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::credentials::CredentialStore;

/// Environment variable that overrides every other API key source
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Value written by `config init`; treated as "not configured"
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Name of the local storage slot holding the watchlist
    #[serde(default = "default_watchlist_key")]
    pub watchlist_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Number of cast members shown on the detail view
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_watchlist_key() -> String {
    "watchlist".to_string()
}

fn default_cast_limit() -> usize {
    3
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: default_language(),
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            watchlist_key: default_watchlist_key(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cast_limit: default_cast_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    ConfigFile,
    Credentials,
}

impl ApiKeySource {
    pub fn describe(self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment (TMDB_API_KEY)",
            ApiKeySource::ConfigFile => "config.toml",
            ApiKeySource::Credentials => "credentials.toml",
        }
    }
}

fn usable_key(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
        .map(str::to_string)
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.language.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.language cannot be empty"));
        }

        for (name, url) in [
            ("tmdb.api_base_url", &self.tmdb.api_base_url),
            ("tmdb.image_base_url", &self.tmdb.image_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        let key = &self.storage.watchlist_key;
        if key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.watchlist_key cannot be empty"));
        }
        // The key names a file inside the storage directory
        if key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(anyhow::anyhow!(
                "storage.watchlist_key must be a plain file name, got '{}'",
                key
            ));
        }

        if self.display.cast_limit == 0 {
            return Err(anyhow::anyhow!("display.cast_limit must be at least 1"));
        }

        Ok(())
    }

    /// Resolve the API key: environment first, then config file, then credentials
    pub fn resolve_api_key(&self, credentials: &CredentialStore) -> Option<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok(), credentials)
    }

    pub fn resolve_api_key_with(&self, env_key: Option<String>, credentials: &CredentialStore) -> Option<String> {
        self.locate_api_key_with(env_key, credentials).map(|(key, _)| key)
    }

    /// Like `resolve_api_key`, also reporting which source won
    pub fn locate_api_key(&self, credentials: &CredentialStore) -> Option<(String, ApiKeySource)> {
        self.locate_api_key_with(std::env::var(API_KEY_ENV).ok(), credentials)
    }

    pub fn locate_api_key_with(
        &self,
        env_key: Option<String>,
        credentials: &CredentialStore,
    ) -> Option<(String, ApiKeySource)> {
        usable_key(env_key.as_deref())
            .map(|k| (k, ApiKeySource::Environment))
            .or_else(|| usable_key(self.tmdb.api_key.as_deref()).map(|k| (k, ApiKeySource::ConfigFile)))
            .or_else(|| {
                usable_key(credentials.get_tmdb_api_key().map(String::as_str))
                    .map(|k| (k, ApiKeySource::Credentials))
            })
    }
}
