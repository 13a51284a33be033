//! Range request planning.
//!
//! The provider returns at most a fixed number of hourly samples per call, so
//! a long range is split into bounded chunks walking backward from its end.

use chrono::{DateTime, TimeDelta, Utc};
use coinbox_types::{PlanningError, TimeRange};

/// One bounded fetch: the `sample_limit` hours ending (exclusively) at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRequest {
    /// Number of hourly samples the chunk covers.
    pub sample_limit: usize,
    /// Exclusive end of the covered interval.
    pub end: DateTime<Utc>,
}

impl ChunkRequest {
    /// Creates a new chunk request.
    #[must_use]
    pub const fn new(sample_limit: usize, end: DateTime<Utc>) -> Self {
        Self { sample_limit, end }
    }

    /// Returns the inclusive start of the covered interval.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.end - TimeDelta::hours(self.sample_limit as i64)
    }

    /// Returns the unix timestamp of the last hour the chunk covers.
    #[must_use]
    pub fn last_hour_ts(&self) -> i64 {
        (self.end - TimeDelta::hours(1)).timestamp()
    }

    /// Returns true if the unix timestamp falls inside the covered interval.
    #[must_use]
    pub fn covers(&self, ts: i64) -> bool {
        ts >= self.start().timestamp() && ts < self.end.timestamp()
    }
}

/// Plans the chunk requests covering `[from, to)`.
///
/// # Errors
///
/// Returns an error if the range is empty, unaligned, or `hourly_limit` is zero.
pub fn plan(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    hourly_limit: usize,
) -> Result<Vec<ChunkRequest>, PlanningError> {
    plan_range(&TimeRange::new(from, to)?, hourly_limit)
}

/// Plans the chunk requests covering an already validated range.
///
/// Full chunks of `hourly_limit` hours are cut from the end of the range
/// until the remainder fits in one request. The result is ordered oldest
/// chunk first, so fetching and concatenating in order reconstructs the range.
///
/// # Errors
///
/// Returns an error if `hourly_limit` is zero.
pub fn plan_range(
    range: &TimeRange,
    hourly_limit: usize,
) -> Result<Vec<ChunkRequest>, PlanningError> {
    if hourly_limit == 0 {
        return Err(PlanningError::ZeroLimit);
    }

    let mut remaining = range.total_hours();
    let mut end = range.to();
    let mut chunks = Vec::with_capacity(remaining.div_ceil(hourly_limit));

    while remaining > hourly_limit {
        chunks.push(ChunkRequest::new(hourly_limit, end));
        end -= TimeDelta::hours(hourly_limit as i64);
        remaining -= hourly_limit;
    }
    chunks.push(ChunkRequest::new(remaining, end));
    chunks.reverse();

    tracing::debug!(
        range = %range,
        hourly_limit,
        chunks = chunks.len(),
        "planned range requests"
    );
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    /// Asserts that the chunks tile `[from, to)` in order with no gap or overlap.
    fn assert_tiles(chunks: &[ChunkRequest], from: DateTime<Utc>, to: DateTime<Utc>, limit: usize) {
        let mut cursor = from;
        for chunk in chunks {
            assert!(chunk.sample_limit > 0);
            assert!(chunk.sample_limit <= limit);
            assert_eq!(chunk.start(), cursor, "gap or overlap before {chunk:?}");
            cursor = chunk.end;
        }
        assert_eq!(cursor, to);
    }

    #[test]
    fn test_example_three_days() {
        let from = utc(2020, 1, 1, 0);
        let to = utc(2020, 1, 4, 0);
        let chunks = plan(from, to, 36).unwrap();

        assert_eq!(
            chunks,
            vec![
                ChunkRequest::new(36, utc(2020, 1, 2, 12)),
                ChunkRequest::new(36, to),
            ]
        );
    }

    #[test]
    fn test_single_chunk() {
        let from = utc(2020, 1, 1, 0);
        let to = utc(2020, 1, 2, 0);
        let chunks = plan(from, to, 2000).unwrap();

        assert_eq!(chunks, vec![ChunkRequest::new(24, to)]);
    }

    #[test]
    fn test_exact_limit_is_one_chunk() {
        let from = utc(2020, 1, 1, 0);
        let to = from + TimeDelta::hours(2000);
        assert_eq!(plan(from, to, 2000).unwrap().len(), 1);

        let to = from + TimeDelta::hours(2001);
        let chunks = plan(from, to, 2000).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].sample_limit, 1);
        assert_eq!(chunks[1].sample_limit, 2000);
    }

    #[test]
    fn test_tiling_property() {
        let from = utc(2019, 3, 30, 5);
        for hours in [1_i64, 2, 23, 24, 25, 71, 72, 73, 500, 4321] {
            for limit in [1_usize, 2, 7, 24, 36, 100, 2000] {
                let to = from + TimeDelta::hours(hours);
                let chunks = plan(from, to, limit).unwrap();
                assert_tiles(&chunks, from, to, limit);

                let total: usize = chunks.iter().map(|c| c.sample_limit).sum();
                assert_eq!(total, hours as usize);
            }
        }
    }

    #[test]
    fn test_invalid_input() {
        let from = utc(2020, 1, 1, 0);
        let to = utc(2020, 1, 2, 0);

        assert_eq!(plan(from, to, 0), Err(PlanningError::ZeroLimit));
        assert!(matches!(
            plan(to, from, 24),
            Err(PlanningError::InvalidRange { .. })
        ));
        assert!(matches!(
            plan(from, from, 24),
            Err(PlanningError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_chunk_window() {
        let chunk = ChunkRequest::new(3, utc(2020, 1, 1, 3));

        assert_eq!(chunk.start(), utc(2020, 1, 1, 0));
        assert_eq!(chunk.last_hour_ts(), utc(2020, 1, 1, 2).timestamp());
        assert!(chunk.covers(utc(2020, 1, 1, 0).timestamp()));
        assert!(!chunk.covers(utc(2020, 1, 1, 3).timestamp()));
    }
}
