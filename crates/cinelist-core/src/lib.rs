pub mod error;
pub mod pagination;
pub mod storage;
pub mod view;
pub mod watchlist;

pub use error::StorageError;
pub use pagination::PageCursor;
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
pub use view::{genre_name, genre_options, GenreFilter, WatchlistQuery, WatchlistSummary};
pub use watchlist::{Persistence, SubscriptionId, WatchlistStore};
