use cinelist_models::{Credits, MovieDetails, PopularPage, VideoList};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::SourceError;

/// Join the API base and an endpoint path without doubling slashes
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// GET an endpoint and decode the body. A 404 is `Ok(None)`.
///
/// `path` doubles as the endpoint label in errors, so the API key never
/// ends up in logs or messages.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    path: &str,
    params: &[(&str, String)],
) -> Result<Option<T>, SourceError> {
    let url = endpoint_url(base_url, path);
    debug!("GET {}", path);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .query(params)
        .send()
        .await
        .map_err(|e| SourceError::Http {
            endpoint: path.to_string(),
            source: e.without_url(),
        })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        debug!("{} returned 404", path);
        return Ok(None);
    }

    let body = response.text().await.map_err(|e| SourceError::Http {
        endpoint: path.to_string(),
        source: e.without_url(),
    })?;

    if !status.is_success() {
        warn!("{} returned {}", path, status);
        return Err(SourceError::Status {
            endpoint: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|source| SourceError::Decode {
            endpoint: path.to_string(),
            source,
        })
}

fn require<T>(path: &str, value: Option<T>) -> Result<T, SourceError> {
    value.ok_or_else(|| SourceError::Status {
        endpoint: path.to_string(),
        status: StatusCode::NOT_FOUND.as_u16(),
        body: String::new(),
    })
}

fn base_params(api_key: &str, language: &str) -> Vec<(&'static str, String)> {
    vec![
        ("api_key", api_key.to_string()),
        ("language", language.to_string()),
    ]
}

/// Fetch one page of popular movies
pub async fn get_popular(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    page: u32,
) -> Result<PopularPage, SourceError> {
    let path = "/movie/popular";
    let mut params = base_params(api_key, language);
    params.push(("page", page.to_string()));
    require(path, get_json(client, base_url, path, &params).await?)
}

/// Fetch movie details; `None` for an unknown id
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    id: u64,
) -> Result<Option<MovieDetails>, SourceError> {
    let path = format!("/movie/{}", id);
    get_json(client, base_url, &path, &base_params(api_key, language)).await
}

/// Fetch cast and crew
pub async fn get_credits(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: u64,
) -> Result<Credits, SourceError> {
    let path = format!("/movie/{}/credits", id);
    let params = vec![("api_key", api_key.to_string())];
    require(&path, get_json(client, base_url, &path, &params).await?)
}

/// Fetch trailers and other videos
pub async fn get_videos(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    id: u64,
) -> Result<VideoList, SourceError> {
    let path = format!("/movie/{}/videos", id);
    require(&path, get_json(client, base_url, &path, &base_params(api_key, language)).await?)
}
