use thiserror::Error;

/// What the user was trying to load when a request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Listing,
    Details,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("TMDB API key is not configured")]
    MissingApiKey,

    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn is_missing_api_key(&self) -> bool {
        matches!(self, SourceError::MissingApiKey)
    }

    /// Message shown to the user instead of the raw error
    pub fn user_message(&self, kind: FetchKind) -> &'static str {
        match (self, kind) {
            (SourceError::MissingApiKey, _) => {
                "TMDB API key is missing. Set TMDB_API_KEY or run 'cinelist config api-key'."
            }
            (_, FetchKind::Listing) => "Failed to fetch movies. Please check your API key.",
            (_, FetchKind::Details) => "Failed to fetch movie details",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let status = SourceError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 401,
            body: "Invalid API key".to_string(),
        };
        assert_eq!(
            status.user_message(FetchKind::Listing),
            "Failed to fetch movies. Please check your API key."
        );
        assert_eq!(status.user_message(FetchKind::Details), "Failed to fetch movie details");
        assert!(SourceError::MissingApiKey
            .user_message(FetchKind::Details)
            .contains("TMDB_API_KEY"));
        assert!(SourceError::MissingApiKey.is_missing_api_key());
        assert!(!status.is_missing_api_key());
    }
}
