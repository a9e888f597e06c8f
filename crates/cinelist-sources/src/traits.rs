use async_trait::async_trait;
use cinelist_models::{Credits, MovieDetails, MovieOverview, PopularPage, VideoList};
use tracing::debug;

use crate::error::SourceError;

/// Read-only access to a movie metadata service
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn popular(&self, page: u32) -> Result<PopularPage, SourceError>;

    /// `Ok(None)` when the service has no movie with this id
    async fn movie(&self, id: u64) -> Result<Option<MovieDetails>, SourceError>;

    async fn credits(&self, id: u64) -> Result<Credits, SourceError>;

    async fn videos(&self, id: u64) -> Result<VideoList, SourceError>;

    /// Details plus top cast, director and trailer for the detail view
    async fn overview(&self, id: u64, cast_limit: usize) -> Result<Option<MovieOverview>, SourceError> {
        let Some(details) = self.movie(id).await? else {
            debug!("{}: movie {} not found", self.source_name(), id);
            return Ok(None);
        };
        let (credits, videos) = futures::try_join!(self.credits(id), self.videos(id))?;
        Ok(Some(MovieOverview::assemble(details, &credits, &videos, cast_limit)))
    }
}
