pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::{FetchKind, SourceError};
pub use tmdb::TmdbClient;
pub use traits::MetadataSource;
