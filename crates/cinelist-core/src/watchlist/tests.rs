use super::*;
use crate::storage::{FileStorage, MemoryStorage};
use std::cell::RefCell;
use std::rc::Rc;

const KEY: &str = "watchlist";

fn movie(id: u64, title: &str, rating: f64) -> MovieRecord {
    MovieRecord::new(id, title).with_rating(rating)
}

fn ids(movies: &[MovieRecord]) -> Vec<String> {
    movies.iter().map(|m| m.id.to_string()).collect()
}

fn ratings(movies: &[MovieRecord]) -> Vec<f64> {
    movies.iter().map(|m| m.vote_average).collect()
}

fn stored(store: &WatchlistStore<MemoryStorage>) -> Vec<MovieRecord> {
    let content = store.storage().read(KEY).unwrap().expect("slot written");
    serde_json::from_str(&content).unwrap()
}

/// Storage that records every write into a shared event log
struct LoggingStorage {
    inner: MemoryStorage,
    events: Rc<RefCell<Vec<String>>>,
}

impl DurableStorage for LoggingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.write(key, value)?;
        self.events.borrow_mut().push(format!("write {}", value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

#[test]
fn test_open_without_stored_slot_is_empty() {
    let store = WatchlistStore::open(MemoryStorage::new(), KEY);
    assert!(store.is_empty());
    assert_eq!(store.key(), KEY);
}

#[test]
fn test_open_with_stored_slot() {
    let mut storage = MemoryStorage::new();
    storage
        .write(KEY, r#"[{"id":1,"title":"Dune","genre_ids":[878],"vote_average":7.8,"popularity":10.0}]"#)
        .unwrap();

    let store = WatchlistStore::open(storage, KEY);
    assert_eq!(store.len(), 1);
    assert_eq!(store.movies()[0].id, MovieId::Number(1));
    assert_eq!(store.movies()[0].display_title(), "Dune");
}

#[test]
fn test_open_with_corrupt_slot_is_empty() {
    let mut storage = MemoryStorage::new();
    storage.write(KEY, "{not json").unwrap();
    let store = WatchlistStore::open(storage, KEY);
    assert!(store.is_empty());

    let mut storage = MemoryStorage::new();
    storage.write(KEY, r#"{"id":1}"#).unwrap();
    let store = WatchlistStore::open(storage, KEY);
    assert!(store.is_empty());
}

#[test]
fn test_memory_matches_storage_after_every_mutation() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);

    assert!(store.add(movie(1, "Dune", 7.2)).is_saved());
    assert_eq!(store.movies(), stored(&store).as_slice());

    assert!(store.add(movie(2, "Clue", 5.0)).is_saved());
    assert!(store.add(movie(3, "Heat", 9.1)).is_saved());
    assert_eq!(store.movies(), stored(&store).as_slice());

    assert!(store.remove(&movie(2, "Clue", 5.0)).is_saved());
    assert_eq!(store.movies(), stored(&store).as_slice());

    assert!(store.sort_descending().is_saved());
    assert_eq!(store.movies(), stored(&store).as_slice());
    assert_eq!(ids(store.movies()), vec!["3", "1"]);
}

#[test]
fn test_add_then_remove_restores_previous_contents() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    let _ = store.add(movie(1, "Dune", 7.2));
    let before = store.movies().to_vec();

    let _ = store.add(movie(2, "Clue", 5.0));
    let _ = store.remove(&movie(2, "Clue", 5.0));

    assert_eq!(store.movies(), before.as_slice());
    assert_eq!(stored(&store), before);
}

#[test]
fn test_add_permits_duplicates_and_remove_drops_all_matches() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    let _ = store.add(movie(1, "Dune", 7.2));
    let _ = store.add(movie(2, "Clue", 5.0));
    let _ = store.add(movie(1, "Dune", 7.2));
    assert_eq!(ids(store.movies()), vec!["1", "2", "1"]);

    let _ = store.remove(&movie(1, "Dune", 7.2));
    assert_eq!(ids(store.movies()), vec!["2"]);
    assert!(!store.contains(&movie(1, "Dune", 7.2)));
}

#[test]
fn test_remove_matches_numeric_string_ids() {
    let mut storage = MemoryStorage::new();
    storage.write(KEY, r#"[{"id":"550","title":"Fight Club"},{"id":13,"title":"Forrest Gump"}]"#).unwrap();
    let mut store = WatchlistStore::open(storage, KEY);

    assert!(store.contains_id(&MovieId::Number(550)));
    let _ = store.remove_id(&MovieId::Number(550));
    assert_eq!(ids(store.movies()), vec!["13"]);
}

#[test]
fn test_remove_matches_decimal_string_ids() {
    let mut storage = MemoryStorage::new();
    storage.write(KEY, r#"[{"id":"550.0","title":"Fight Club"},{"id":13,"title":"Forrest Gump"}]"#).unwrap();
    let mut store = WatchlistStore::open(storage, KEY);

    let _ = store.remove_id(&MovieId::Number(550));
    assert_eq!(ids(store.movies()), vec!["13"]);
    assert_eq!(ids(&stored(&store)), vec!["13"]);
}

#[test]
fn test_open_keeps_records_with_float_ids() {
    let mut storage = MemoryStorage::new();
    storage.write(KEY, r#"[{"id":13,"title":"Forrest Gump"},{"id":550.0,"title":"Fight Club"}]"#).unwrap();
    let store = WatchlistStore::open(storage, KEY);

    assert_eq!(store.len(), 2);
    assert!(store.contains_id(&MovieId::Number(550)));
}

#[test]
fn test_remove_of_missing_id_still_writes_snapshot() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    assert!(store.remove_id(&MovieId::Number(9)).is_saved());
    assert!(stored(&store).is_empty());
}

#[test]
fn test_sort_both_directions() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    let _ = store.add(movie(1, "A", 7.2));
    let _ = store.add(movie(2, "B", 5.0));
    let _ = store.add(movie(3, "C", 9.1));

    let _ = store.sort_ascending();
    assert_eq!(ratings(store.movies()), vec![5.0, 7.2, 9.1]);
    assert_eq!(ratings(&stored(&store)), vec![5.0, 7.2, 9.1]);

    let _ = store.sort_descending();
    assert_eq!(ratings(store.movies()), vec![9.1, 7.2, 5.0]);
    assert_eq!(ratings(&stored(&store)), vec![9.1, 7.2, 5.0]);
}

#[test]
fn test_sort_keeps_order_of_equal_ratings() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    let _ = store.add(movie(1, "A", 6.0));
    let _ = store.add(movie(2, "B", 8.0));
    let _ = store.add(movie(3, "C", 6.0));
    let _ = store.add(movie(4, "D", 8.0));

    let _ = store.sort_ascending();
    assert_eq!(ids(store.movies()), vec!["1", "3", "2", "4"]);

    let _ = store.sort_descending();
    assert_eq!(ids(store.movies()), vec!["2", "4", "1", "3"]);
}

#[test]
fn test_sort_treats_signed_zero_ratings_as_equal() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    let _ = store.add(movie(1, "A", 0.0));
    let _ = store.add(movie(2, "B", -0.0));
    let _ = store.add(movie(3, "C", 4.0));

    let _ = store.sort_ascending();
    assert_eq!(ids(store.movies()), vec!["1", "2", "3"]);

    let _ = store.sort_descending();
    assert_eq!(ids(store.movies()), vec!["3", "1", "2"]);
}

#[test]
fn test_replace_installs_list() {
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);
    let list = vec![movie(5, "E", 1.0), movie(4, "D", 2.0)];
    assert!(store.replace(list.clone()).is_saved());
    assert_eq!(store.movies(), list.as_slice());
    assert_eq!(stored(&store), list);
}

#[test]
fn test_storage_write_happens_before_subscribers_run() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let storage = LoggingStorage {
        inner: MemoryStorage::new(),
        events: Rc::clone(&events),
    };
    let mut store = WatchlistStore::open(storage, KEY);

    let log = Rc::clone(&events);
    store.subscribe(move |movies| log.borrow_mut().push(format!("notify {}", movies.len())));

    let _ = store.add(movie(1, "Dune", 7.2));
    let _ = store.remove_id(&MovieId::Number(1));

    let events = events.borrow();
    assert_eq!(events.len(), 4);
    assert!(events[0].starts_with("write [{"));
    assert_eq!(events[1], "notify 1");
    assert_eq!(events[2], "write []");
    assert_eq!(events[3], "notify 0");
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let calls = Rc::new(RefCell::new(0));
    let mut store = WatchlistStore::open(MemoryStorage::new(), KEY);

    let counter = Rc::clone(&calls);
    let id = store.subscribe(move |_| *counter.borrow_mut() += 1);
    let _ = store.add(movie(1, "Dune", 7.2));
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    let _ = store.add(movie(2, "Clue", 5.0));

    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_failed_write_still_updates_memory() {
    let mut store = WatchlistStore::open(MemoryStorage::with_quota(4), KEY);

    let outcome = store.add(movie(1, "Dune", 7.2));
    assert!(!outcome.is_saved());
    assert!(matches!(outcome.error(), Some(StorageError::QuotaExceeded { .. })));

    assert_eq!(store.len(), 1);
    assert_eq!(store.storage().read(KEY).unwrap(), None);
}

#[test]
fn test_reload_from_file_reflects_last_add() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = WatchlistStore::open(FileStorage::new(dir.path()), KEY);
    let _ = store.add(movie(1, "Dune", 7.2));
    let _ = store.add(movie(2, "Clue", 5.0));
    let expected = store.movies().to_vec();
    drop(store);

    let reopened = WatchlistStore::open(FileStorage::new(dir.path()), KEY);
    assert_eq!(reopened.movies(), expected.as_slice());
}
