//! Benchmark utilities for coinbox.

use chrono::{DateTime, TimeZone, Utc};
use coinbox_lib::{ChunkRequest, HOUR_SECONDS, RawSample};

/// Start of the synthetic series: 2020-01-01T00:00:00Z.
pub const SERIES_START: i64 = 1_577_836_800;

/// Returns the UTC instant `hours` after [`SERIES_START`].
pub fn hours_after_start(hours: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(SERIES_START + hours * HOUR_SECONDS, 0).single()
}

/// Builds `days` whole days of ascending hourly samples starting at
/// [`SERIES_START`], with a deterministic zig-zag price.
pub fn synthetic_series(days: usize) -> Vec<RawSample> {
    (0..days * 24)
        .map(|i| {
            let wave = ((i * 7) % 23) as f64;
            let price = 7000.0 + wave * 3.5;
            RawSample::new(
                SERIES_START + i as i64 * HOUR_SECONDS,
                price,
                price + 12.0 - wave / 2.0,
                price - 9.0 - wave / 3.0,
                price + 1.0,
            )
        })
        .collect()
}

/// Answers planned chunks the way the provider does, newest first.
pub fn echo_chunks(chunks: &[ChunkRequest]) -> Vec<Vec<RawSample>> {
    chunks
        .iter()
        .map(|chunk| {
            let start = chunk.start().timestamp();
            (0..chunk.sample_limit as i64)
                .rev()
                .map(|i| RawSample::new(start + i * HOUR_SECONDS, 1.0, 1.0, 1.0, 1.0))
                .collect()
        })
        .collect()
}
