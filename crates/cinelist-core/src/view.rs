//! Derived projections of the watchlist for display.
//!
//! Nothing here owns state: every function is recomputed from the current
//! list, the genre selection and the search text.

use cinelist_models::{GenreTable, MovieRecord, ALL_GENRES};
use serde::Serialize;
use std::collections::HashSet;

/// Display genre of a record: its first genre id mapped through the table
pub fn genre_name<'a>(movie: &MovieRecord, genres: &'a GenreTable) -> &'a str {
    genres.name_or_unknown(movie.first_genre_id())
}

/// `"All Genres"` followed by each distinct genre name, in order of first appearance
pub fn genre_options(movies: &[MovieRecord], genres: &GenreTable) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL_GENRES.to_string()];
    for movie in movies {
        let name = genre_name(movie, genres);
        if seen.insert(name) {
            options.push(name.to_string());
        }
    }
    options
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Named(String),
}

impl GenreFilter {
    pub fn parse(selection: &str) -> Self {
        if selection == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Named(selection.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GenreFilter::All => ALL_GENRES,
            GenreFilter::Named(name) => name,
        }
    }

    fn accepts(&self, movie: &MovieRecord, genres: &GenreTable) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Named(name) => genre_name(movie, genres) == name,
        }
    }
}

impl From<Option<&str>> for GenreFilter {
    fn from(selection: Option<&str>) -> Self {
        selection.map(GenreFilter::parse).unwrap_or_default()
    }
}

/// Genre selection plus title search, applied in that order
#[derive(Debug, Clone, Default)]
pub struct WatchlistQuery {
    pub genre: GenreFilter,
    pub search: String,
}

impl WatchlistQuery {
    pub fn new(genre: GenreFilter, search: impl Into<String>) -> Self {
        Self {
            genre,
            search: search.into(),
        }
    }

    /// Case-insensitive substring match. A record without a title never
    /// matches a non-empty query.
    fn matches_search(&self, movie: &MovieRecord, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        movie
            .title
            .as_deref()
            .map(|title| title.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    /// Records passing both filters, in watchlist order
    pub fn apply<'a>(&self, movies: &'a [MovieRecord], genres: &GenreTable) -> Vec<&'a MovieRecord> {
        let needle = self.search.to_lowercase();
        movies
            .iter()
            .filter(|m| self.genre.accepts(m, genres))
            .filter(|m| self.matches_search(m, &needle))
            .collect()
    }
}

/// Totals shown beneath the watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WatchlistSummary {
    pub total: usize,
    pub genres: usize,
}

impl WatchlistSummary {
    pub fn of(movies: &[MovieRecord], genres: &GenreTable) -> Self {
        Self {
            total: movies.len(),
            genres: genre_options(movies, genres).len() - 1,
        }
    }
}
