use async_trait::async_trait;
use cinelist_config::{TmdbConfig, PLACEHOLDER_API_KEY};
use cinelist_models::{Credits, MovieDetails, PopularPage, VideoList};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::MetadataSource;

/// Create the shared HTTP client
pub fn create_tmdb_client() -> Client {
    Client::builder()
        .user_agent(concat!("cinelist/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: Option<String>,
    language: String,
    api_base_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, api_key: Option<String>) -> Self {
        Self {
            client: Arc::new(create_tmdb_client()),
            api_key: api_key.filter(|k| !k.trim().is_empty() && k != PLACEHOLDER_API_KEY),
            language: config.language.clone(),
            api_base_url: config.api_base_url.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Checked before any request is built
    fn api_key(&self) -> Result<&str, SourceError> {
        self.api_key.as_deref().ok_or(SourceError::MissingApiKey)
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn popular(&self, page: u32) -> Result<PopularPage, SourceError> {
        let api_key = self.api_key()?;
        let page = api::get_popular(&self.client, &self.api_base_url, api_key, &self.language, page).await?;
        info!("Fetched popular movies page {} ({} results)", page.page, page.results.len());
        Ok(page)
    }

    async fn movie(&self, id: u64) -> Result<Option<MovieDetails>, SourceError> {
        let api_key = self.api_key()?;
        api::get_movie(&self.client, &self.api_base_url, api_key, &self.language, id).await
    }

    async fn credits(&self, id: u64) -> Result<Credits, SourceError> {
        let api_key = self.api_key()?;
        api::get_credits(&self.client, &self.api_base_url, api_key, id).await
    }

    async fn videos(&self, id: u64) -> Result<VideoList, SourceError> {
        let api_key = self.api_key()?;
        api::get_videos(&self.client, &self.api_base_url, api_key, &self.language, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelist_models::{CastMember, CrewMember, Video};

    fn unroutable_config() -> TmdbConfig {
        // Nothing listens here; a request would fail with Http, not MissingApiKey
        TmdbConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..TmdbConfig::default()
        }
    }

    #[test]
    fn test_placeholder_key_counts_as_missing() {
        assert!(!TmdbClient::new(&TmdbConfig::default(), None).has_api_key());
        assert!(!TmdbClient::new(&TmdbConfig::default(), Some("  ".to_string())).has_api_key());
        assert!(!TmdbClient::new(&TmdbConfig::default(), Some(PLACEHOLDER_API_KEY.to_string())).has_api_key());
        assert!(TmdbClient::new(&TmdbConfig::default(), Some("k".to_string())).has_api_key());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = TmdbClient::new(&unroutable_config(), None);

        assert!(client.popular(1).await.unwrap_err().is_missing_api_key());
        assert!(client.movie(550).await.unwrap_err().is_missing_api_key());
        assert!(client.credits(550).await.unwrap_err().is_missing_api_key());
        assert!(client.videos(550).await.unwrap_err().is_missing_api_key());
        assert!(client.overview(550, 3).await.unwrap_err().is_missing_api_key());
    }

    /// In-memory service used to exercise the default `overview` composition
    struct FakeSource {
        details: Option<MovieDetails>,
    }

    #[async_trait]
    impl MetadataSource for FakeSource {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn popular(&self, page: u32) -> Result<PopularPage, SourceError> {
            Ok(PopularPage {
                page,
                results: vec![],
                total_pages: 1,
                total_results: 0,
            })
        }

        async fn movie(&self, _id: u64) -> Result<Option<MovieDetails>, SourceError> {
            Ok(self.details.clone())
        }

        async fn credits(&self, _id: u64) -> Result<Credits, SourceError> {
            Ok(Credits {
                cast: (1..=5)
                    .map(|i| CastMember {
                        id: i,
                        name: format!("Actor {}", i),
                        character: None,
                        profile_path: None,
                    })
                    .collect(),
                crew: vec![CrewMember {
                    id: 99,
                    name: "David Fincher".to_string(),
                    job: "Director".to_string(),
                }],
            })
        }

        async fn videos(&self, _id: u64) -> Result<VideoList, SourceError> {
            Ok(VideoList {
                results: vec![Video {
                    key: "SUXWAEX2jlg".to_string(),
                    name: None,
                    site: "YouTube".to_string(),
                    kind: "Trailer".to_string(),
                    official: false,
                }],
            })
        }
    }

    #[tokio::test]
    async fn test_overview_composition() {
        let details: MovieDetails = serde_json::from_str(r#"{"id": 550, "title": "Fight Club"}"#).unwrap();
        let source = FakeSource { details: Some(details) };

        let overview = source.overview(550, 3).await.unwrap().unwrap();
        assert_eq!(overview.cast.len(), 3);
        assert_eq!(overview.director.as_deref(), Some("David Fincher"));
        assert_eq!(overview.trailer_key.as_deref(), Some("SUXWAEX2jlg"));
    }

    #[tokio::test]
    async fn test_overview_not_found() {
        let source = FakeSource { details: None };
        assert!(source.overview(1, 3).await.unwrap().is_none());
    }
}
