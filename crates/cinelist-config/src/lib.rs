pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiKeySource, Config, DisplayConfig, StorageConfig, TmdbConfig, API_KEY_ENV, PLACEHOLDER_API_KEY};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
