use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::movie_id::MovieId;

/// A single title as returned by the metadata service.
///
/// Records are treated as opaque: fields the application does not read are
/// kept in `extra` so a stored record serializes back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Ordered; only the first entry drives genre display and filtering
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Average rating, 0.0 to 10.0
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    /// ISO date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieRecord {
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            poster_path: None,
            genre_ids: Vec::new(),
            vote_average: 0.0,
            popularity: 0.0,
            release_date: None,
            extra: Map::new(),
        }
    }

    pub fn with_genres(mut self, genre_ids: Vec<u32>) -> Self {
        self.genre_ids = genre_ids;
        self
    }

    pub fn with_rating(mut self, vote_average: f64) -> Self {
        self.vote_average = vote_average;
        self
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    pub fn first_genre_id(&self) -> Option<u32> {
        self.genre_ids.first().copied()
    }

    /// Title for rendering; `"N/A"` when the service omitted it
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("N/A")
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.year())
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.vote_average)
    }

    pub fn popularity_rounded(&self) -> i64 {
        self.popularity.round() as i64
    }

    pub fn poster_url(&self, image_base: &str, size: &str) -> Option<String> {
        self.poster_path.as_deref().map(|path| {
            format!(
                "{}/{}/{}",
                image_base.trim_end_matches('/'),
                size,
                path.trim_start_matches('/')
            )
        })
    }
}
