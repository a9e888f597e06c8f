//! The authoritative watchlist and its mirror in durable storage.
//!
//! Every mutation builds the next list, writes a full snapshot to storage,
//! and only then installs the list in memory and notifies subscribers. A
//! failed write is reported back to the caller and logged, but the in-memory
//! update still happens.

use cinelist_models::{MovieId, MovieRecord};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::storage::DurableStorage;

#[cfg(test)]
mod tests;

/// Outcome of writing a snapshot after a mutation
#[must_use]
#[derive(Debug)]
pub enum Persistence {
    Saved,
    Failed(StorageError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }

    pub fn error(&self) -> Option<&StorageError> {
        match self {
            Persistence::Saved => None,
            Persistence::Failed(e) => Some(e),
        }
    }
}

/// Numeric rating order; `0.0` and `-0.0` compare equal
fn by_rating(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    a.vote_average
        .partial_cmp(&b.vote_average)
        .unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[MovieRecord])>;

pub struct WatchlistStore<S: DurableStorage> {
    storage: S,
    key: String,
    movies: Vec<MovieRecord>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: DurableStorage> WatchlistStore<S> {
    /// Build the store and load whatever the storage slot holds.
    ///
    /// A missing, unreadable or undecodable slot yields an empty watchlist.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let movies = Self::load(&storage, &key);
        Self {
            storage,
            key,
            movies,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    fn load(storage: &S, key: &str) -> Vec<MovieRecord> {
        let content = match storage.read(key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!("No stored watchlist under '{}', starting empty", key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read stored watchlist: {}. Starting empty.", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<MovieRecord>>(&content) {
            Ok(movies) => {
                info!("Loaded watchlist '{}' ({} movies)", key, movies.len());
                movies
            }
            Err(e) => {
                warn!("Stored watchlist '{}' is not readable ({}), starting empty", key, e);
                Vec::new()
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, movie: &MovieRecord) -> bool {
        self.contains_id(&movie.id)
    }

    pub fn contains_id(&self, id: &MovieId) -> bool {
        self.movies.iter().any(|m| m.id.matches(id))
    }

    /// Append a movie. No duplicate check: adding a saved movie again stores it twice.
    pub fn add(&mut self, movie: MovieRecord) -> Persistence {
        debug!("Adding {} ({}) to watchlist", movie.id, movie.display_title());
        let mut next = self.movies.clone();
        next.push(movie);
        self.commit(next)
    }

    /// Drop every entry whose id matches the movie's id
    pub fn remove(&mut self, movie: &MovieRecord) -> Persistence {
        self.remove_id(&movie.id)
    }

    pub fn remove_id(&mut self, id: &MovieId) -> Persistence {
        let next: Vec<MovieRecord> = self
            .movies
            .iter()
            .filter(|m| !m.id.matches(id))
            .cloned()
            .collect();
        debug!("Removing {} from watchlist ({} entries matched)", id, self.movies.len() - next.len());
        self.commit(next)
    }

    /// Install a complete new list, e.g. a reordered copy
    pub fn replace(&mut self, movies: Vec<MovieRecord>) -> Persistence {
        self.commit(movies)
    }

    /// Order by rating, lowest first. Equal ratings keep their relative order.
    pub fn sort_ascending(&mut self) -> Persistence {
        let mut sorted = self.movies.clone();
        sorted.sort_by(|a, b| by_rating(a, b));
        self.replace(sorted)
    }

    /// Order by rating, highest first. Equal ratings keep their relative order.
    pub fn sort_descending(&mut self) -> Persistence {
        let mut sorted = self.movies.clone();
        sorted.sort_by(|a, b| by_rating(b, a));
        self.replace(sorted)
    }

    /// Register an observer called with the committed list after every mutation
    pub fn subscribe(&mut self, callback: impl FnMut(&[MovieRecord]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, movies: &[MovieRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(movies).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.storage.write(&self.key, &json)
    }

    fn commit(&mut self, next: Vec<MovieRecord>) -> Persistence {
        let outcome = match self.persist(&next) {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                warn!("Watchlist change kept in memory only, storage write failed: {}", e);
                Persistence::Failed(e)
            }
        };

        self.movies = next;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.movies);
        }
        outcome
    }
}
