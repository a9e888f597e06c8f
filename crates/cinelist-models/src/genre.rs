use std::collections::HashMap;

/// Sentinel shown first in every genre list; selecting it disables the filter.
pub const ALL_GENRES: &str = "All Genres";

/// Display name for records without a (known) first genre id.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Static lookup from genre identifier to display name
#[derive(Debug, Clone)]
pub struct GenreTable {
    names: HashMap<u32, String>,
}

impl GenreTable {
    /// The movie genre list published by TMDB
    pub fn tmdb() -> Self {
        Self::from_pairs([
            (28, "Action"),
            (12, "Adventure"),
            (16, "Animation"),
            (35, "Comedy"),
            (80, "Crime"),
            (99, "Documentary"),
            (18, "Drama"),
            (10751, "Family"),
            (14, "Fantasy"),
            (36, "History"),
            (27, "Horror"),
            (10402, "Music"),
            (9648, "Mystery"),
            (10749, "Romance"),
            (878, "Science Fiction"),
            (10770, "TV Movie"),
            (53, "Thriller"),
            (10752, "War"),
            (37, "Western"),
        ])
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            names: pairs.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Display name for an optional genre id, falling back to [`UNKNOWN_GENRE`]
    pub fn name_or_unknown(&self, id: Option<u32>) -> &str {
        id.and_then(|id| self.get(id)).unwrap_or(UNKNOWN_GENRE)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for GenreTable {
    fn default() -> Self {
        Self::tmdb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_table() {
        let table = GenreTable::tmdb();
        assert_eq!(table.len(), 19);
        assert_eq!(table.get(878), Some("Science Fiction"));
        assert_eq!(table.get(1), None);
    }

    #[test]
    fn test_unknown_fallback() {
        let table = GenreTable::from_pairs([(1, "Action")]);
        assert_eq!(table.name_or_unknown(Some(1)), "Action");
        assert_eq!(table.name_or_unknown(Some(2)), UNKNOWN_GENRE);
        assert_eq!(table.name_or_unknown(None), UNKNOWN_GENRE);
    }
}
