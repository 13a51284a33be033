//! Day-over-day trend classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DayBucket;

/// Direction of a bucket's median relative to the previous bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Median rose.
    Up,
    /// Median fell or stayed level.
    Down,
}

impl Direction {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend of one bucket against its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSegment {
    /// Index of the bucket in the aggregated sequence. Never zero.
    pub bucket_index: usize,
    /// Direction of the median move into this bucket.
    pub direction: Direction,
}

/// Classifies every bucket after the first by comparing its median with the
/// previous one. Equal medians count as [`Direction::Down`].
#[must_use]
pub fn classify(buckets: &[DayBucket]) -> Vec<TrendSegment> {
    buckets
        .windows(2)
        .enumerate()
        .map(|(i, pair)| TrendSegment {
            bucket_index: i + 1,
            direction: if pair[1].median > pair[0].median {
                Direction::Up
            } else {
                Direction::Down
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bucket(median: f64) -> DayBucket {
        DayBucket {
            day: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            sample_count: 24,
            min: median - 1.0,
            lower_quartile: median,
            median,
            upper_quartile: median,
            max: median + 1.0,
        }
    }

    #[test]
    fn test_classify_medians() {
        let buckets: Vec<_> = [10.0, 12.0, 8.0, 8.0].into_iter().map(bucket).collect();
        let directions: Vec<_> = classify(&buckets).iter().map(|t| t.direction).collect();
        assert_eq!(directions, vec![Direction::Up, Direction::Down, Direction::Down]);
    }

    #[test]
    fn test_classify_indices_skip_first() {
        let buckets: Vec<_> = [1.0, 2.0, 3.0].into_iter().map(bucket).collect();
        let indices: Vec<_> = classify(&buckets).iter().map(|t| t.bucket_index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_classify_short_input() {
        assert!(classify(&[]).is_empty());
        assert!(classify(&[bucket(5.0)]).is_empty());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.as_str(), "down");
    }
}
