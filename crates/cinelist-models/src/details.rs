use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::movie::MovieRecord;
use crate::movie_id::MovieId;

/// One page of the popular-movies listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularPage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieRecord>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreRef {
    pub id: u32,
    pub name: String,
}

/// Full detail payload for a single movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
}

impl MovieDetails {
    /// Listing-shaped record for this movie, so it can be saved to a watchlist
    pub fn to_record(&self) -> MovieRecord {
        MovieRecord {
            id: MovieId::Number(self.id),
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
            vote_average: self.vote_average,
            popularity: self.popularity,
            release_date: self.release_date.clone().filter(|d| !d.is_empty()),
            extra: Map::new(),
        }
    }

    pub fn overview_text(&self) -> &str {
        self.overview
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or("No overview available for this movie.")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// First crew member credited as director
    pub fn director(&self) -> Option<&str> {
        self.crew
            .iter()
            .find(|c| c.job == "Director")
            .map(|c| c.name.as_str())
    }

    pub fn top_cast(&self, limit: usize) -> Vec<CastMember> {
        self.cast.iter().take(limit).cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// Official YouTube trailer if there is one, otherwise any YouTube trailer
    pub fn trailer(&self) -> Option<&Video> {
        self.results
            .iter()
            .find(|v| v.is_youtube_trailer() && v.official)
            .or_else(|| self.results.iter().find(|v| v.is_youtube_trailer()))
    }
}

/// Everything the detail view shows for one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieOverview {
    pub details: MovieDetails,
    pub cast: Vec<CastMember>,
    pub director: Option<String>,
    pub trailer_key: Option<String>,
}

impl MovieOverview {
    pub fn assemble(details: MovieDetails, credits: &Credits, videos: &VideoList, cast_limit: usize) -> Self {
        Self {
            cast: credits.top_cast(cast_limit),
            director: credits.director().map(str::to_string),
            trailer_key: videos.trailer().map(|v| v.key.clone()),
            details,
        }
    }

    pub fn director_label(&self) -> &str {
        self.director.as_deref().unwrap_or("Director not available")
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer_key
            .as_ref()
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, kind: &str, site: &str, official: bool) -> Video {
        Video {
            key: key.to_string(),
            name: None,
            site: site.to_string(),
            kind: kind.to_string(),
            official,
        }
    }

    #[test]
    fn test_trailer_prefers_official() {
        let videos = VideoList {
            results: vec![
                video("teaser", "Teaser", "YouTube", true),
                video("fan", "Trailer", "YouTube", false),
                video("vimeo", "Trailer", "Vimeo", true),
                video("official", "Trailer", "YouTube", true),
            ],
        };
        assert_eq!(videos.trailer().map(|v| v.key.as_str()), Some("official"));
    }

    #[test]
    fn test_trailer_falls_back_to_unofficial() {
        let videos = VideoList {
            results: vec![
                video("clip", "Clip", "YouTube", true),
                video("fan", "Trailer", "YouTube", false),
            ],
        };
        assert_eq!(videos.trailer().map(|v| v.key.as_str()), Some("fan"));
        assert!(VideoList { results: vec![] }.trailer().is_none());
    }

    #[test]
    fn test_video_type_field_name() {
        let json = r#"{"results":[{"key":"abc","site":"YouTube","type":"Trailer","official":true}]}"#;
        let videos: VideoList = serde_json::from_str(json).unwrap();
        assert_eq!(videos.results[0].kind, "Trailer");
    }

    #[test]
    fn test_overview_assembly() {
        let credits: Credits = serde_json::from_str(
            r#"{
                "cast": [
                    {"id": 1, "name": "A", "character": "a"},
                    {"id": 2, "name": "B"},
                    {"id": 3, "name": "C"},
                    {"id": 4, "name": "D"}
                ],
                "crew": [
                    {"id": 9, "name": "Writer", "job": "Screenplay"},
                    {"id": 10, "name": "Denis Villeneuve", "job": "Director"}
                ]
            }"#,
        )
        .unwrap();
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 438631, "title": "Dune", "genres": [{"id": 878, "name": "Science Fiction"}, {"id": 12, "name": "Adventure"}], "vote_average": 7.8, "vote_count": 9000, "overview": ""}"#,
        )
        .unwrap();

        let overview = MovieOverview::assemble(details, &credits, &VideoList { results: vec![] }, 3);
        assert_eq!(overview.cast.len(), 3);
        assert_eq!(overview.director_label(), "Denis Villeneuve");
        assert_eq!(overview.trailer_url(), None);
        assert_eq!(overview.details.overview_text(), "No overview available for this movie.");

        let record = overview.details.to_record();
        assert_eq!(record.id, MovieId::Number(438631));
        assert_eq!(record.genre_ids, vec![878, 12]);
        assert_eq!(record.release_date, None);
    }

    #[test]
    fn test_missing_director() {
        let credits = Credits { cast: vec![], crew: vec![] };
        assert_eq!(credits.director(), None);
    }
}
