//! Daily quantile summary.

use chrono::NaiveDate;
use coinbox_types::RawSample;
use serde::{Deserialize, Serialize};

/// Five-number summary of one calendar day's hourly samples.
///
/// The quantiles are taken over the pooled `high` and `low` values of the
/// day's samples; `open` and `close` do not contribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Calendar day the samples belong to.
    pub day: NaiveDate,
    /// Number of hourly samples in the bucket.
    pub sample_count: usize,
    /// Smallest pooled value.
    pub min: f64,
    /// 25th percentile.
    pub lower_quartile: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub upper_quartile: f64,
    /// Largest pooled value.
    pub max: f64,
}

impl DayBucket {
    /// Summarizes a non-empty run of samples belonging to `day`.
    ///
    /// Returns `None` if `samples` is empty.
    #[must_use]
    pub fn summarize(day: NaiveDate, samples: &[RawSample]) -> Option<Self> {
        let mut pool: Vec<f64> = samples.iter().flat_map(|s| [s.high, s.low]).collect();
        pool.sort_by(f64::total_cmp);

        Some(Self {
            day,
            sample_count: samples.len(),
            min: *pool.first()?,
            lower_quartile: quantile_sorted(&pool, 0.25)?,
            median: quantile_sorted(&pool, 0.5)?,
            upper_quartile: quantile_sorted(&pool, 0.75)?,
            max: *pool.last()?,
        })
    }
}

/// Returns the `p`-quantile of ascending `sorted` values by linear
/// interpolation between closest ranks.
///
/// Returns `None` if `sorted` is empty or `p` is outside `[0, 1]`.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let position = (sorted.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
