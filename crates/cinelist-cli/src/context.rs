use anyhow::Result;
use cinelist_config::{Config, CredentialStore, PathManager};
use cinelist_core::{FileStorage, WatchlistStore};
use cinelist_models::GenreTable;
use cinelist_sources::TmdbClient;

/// Everything a command needs, built once at startup and passed by reference
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
    pub genres: GenreTable,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        Self::load_from(PathManager::default())
    }

    pub fn load_from(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", config_file.display(), e))?;
        config.validate()?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| anyhow::anyhow!("Failed to load credentials from {}: {}", paths.credentials_file().display(), e))?;

        Ok(Self {
            paths,
            config,
            credentials,
            genres: GenreTable::tmdb(),
        })
    }

    pub fn api_key(&self) -> Option<String> {
        self.config.resolve_api_key(&self.credentials)
    }

    pub fn metadata_client(&self) -> TmdbClient {
        TmdbClient::new(&self.config.tmdb, self.api_key())
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.paths.storage_dir())
    }

    pub fn open_watchlist(&self) -> WatchlistStore<FileStorage> {
        WatchlistStore::open(self.storage(), self.config.storage.watchlist_key.clone())
    }

    pub fn image_base(&self) -> &str {
        &self.config.tmdb.image_base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelist_models::MovieRecord;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::load_from(PathManager::rooted_at(dir.path())).unwrap();

        assert_eq!(ctx.config.storage.watchlist_key, "watchlist");
        assert!(ctx.open_watchlist().is_empty());
    }

    #[test]
    fn test_watchlist_persists_across_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::load_from(PathManager::rooted_at(dir.path())).unwrap();

        let mut store = ctx.open_watchlist();
        assert!(store.add(MovieRecord::new(550u64, "Fight Club")).is_saved());

        let again = AppContext::load_from(PathManager::rooted_at(dir.path())).unwrap();
        assert_eq!(again.open_watchlist().len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[display]\ncast_limit = 0\n").unwrap();
        assert!(AppContext::load_from(PathManager::rooted_at(dir.path())).is_err());
    }
}
