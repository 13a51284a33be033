//! Paginated series download.

use coinbox_types::{HOUR_SECONDS, Instrument, RawSample};
use futures::stream::{self, StreamExt};

use crate::{ChunkRequest, FetchError, SeriesSource};

/// Fetches every planned chunk concurrently and stitches the results into one
/// ascending series.
///
/// Up to `concurrency` requests are in flight at once. Each response lands in
/// the slot of its chunk, so completion order does not affect the result.
///
/// # Errors
///
/// Returns the first chunk error. Remaining in-flight requests are dropped
/// and no partial series is returned.
pub async fn fetch_series<S>(
    source: &S,
    instrument: &Instrument,
    chunks: &[ChunkRequest],
    concurrency: usize,
) -> Result<Vec<RawSample>, FetchError>
where
    S: SeriesSource + ?Sized,
{
    let mut slots: Vec<Option<Vec<RawSample>>> = vec![None; chunks.len()];

    let mut responses = stream::iter(chunks.iter().enumerate())
        .map(|(index, chunk)| async move {
            source
                .fetch_chunk(instrument, chunk)
                .await
                .map(|samples| (index, samples))
        })
        .buffer_unordered(concurrency.max(1));

    while let Some(response) = responses.next().await {
        let (index, samples) = response.inspect_err(|e| {
            tracing::warn!(symbol = instrument.symbol(), error = %e, "chunk fetch failed");
        })?;
        tracing::debug!(
            symbol = instrument.symbol(),
            chunk = index,
            samples = samples.len(),
            "chunk fetched"
        );
        slots[index] = Some(samples);
    }

    let series = stitch_chunks(slots.into_iter().flatten().collect());
    if !is_contiguous(&series) {
        tracing::warn!(
            symbol = instrument.symbol(),
            samples = series.len(),
            "stitched series has gaps"
        );
    }
    Ok(series)
}

/// Turns newest-first chunks, given oldest chunk first, into one ascending
/// series.
///
/// Each chunk is reversed on its own and the chunks are then concatenated in
/// the given order.
#[must_use]
pub fn stitch_chunks(chunks: Vec<Vec<RawSample>>) -> Vec<RawSample> {
    let total = chunks.iter().map(Vec::len).sum();
    let mut series = Vec::with_capacity(total);
    for mut chunk in chunks {
        chunk.reverse();
        series.append(&mut chunk);
    }
    series
}

/// Returns true if timestamps increase by exactly one hour from each sample
/// to the next.
#[must_use]
pub fn is_contiguous(series: &[RawSample]) -> bool {
    series
        .windows(2)
        .all(|pair| pair[1].time - pair[0].time == HOUR_SECONDS)
}
