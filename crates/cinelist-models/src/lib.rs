pub mod details;
pub mod genre;
pub mod movie;
pub mod movie_id;

pub use details::{CastMember, Credits, CrewMember, GenreRef, MovieDetails, MovieOverview, PopularPage, Video, VideoList};
pub use genre::{GenreTable, ALL_GENRES, UNKNOWN_GENRE};
pub use movie::MovieRecord;
pub use movie_id::MovieId;
