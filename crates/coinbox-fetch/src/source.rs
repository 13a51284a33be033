//! Abstraction over where chunk samples come from.

use async_trait::async_trait;
use coinbox_types::{Instrument, RawSample};

use crate::{ChunkRequest, FetchError, HistoClient};

/// A source of hourly samples for planned chunks.
///
/// Implementations return each chunk newest first, the provider's order.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetches the samples of one chunk, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk cannot be fetched.
    async fn fetch_chunk(
        &self,
        instrument: &Instrument,
        chunk: &ChunkRequest,
    ) -> Result<Vec<RawSample>, FetchError>;
}

#[async_trait]
impl SeriesSource for HistoClient {
    async fn fetch_chunk(
        &self,
        instrument: &Instrument,
        chunk: &ChunkRequest,
    ) -> Result<Vec<RawSample>, FetchError> {
        self.download_chunk(instrument, chunk).await
    }
}
