//! Flat output records.

use chrono::{DateTime, NaiveDate, Utc};
use coinbox_aggregate::{DayBucket, Direction, TrendSegment};
use coinbox_types::RawSample;
use serde::Serialize;

/// One hourly sample with a calendar timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesRow {
    /// Start of the hour.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

/// One box of a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxPlotRow {
    /// Calendar day.
    pub day: NaiveDate,
    /// Hourly samples behind the box.
    pub sample_count: usize,
    /// Lower whisker.
    pub min: f64,
    /// Bottom of the box.
    pub lower_quartile: f64,
    /// Median line.
    pub median: f64,
    /// Top of the box.
    pub upper_quartile: f64,
    /// Upper whisker.
    pub max: f64,
    /// Move against the previous day, absent for the first box.
    pub trend: Option<Direction>,
}

/// Converts samples into rows, skipping timestamps chrono cannot represent.
#[must_use]
pub fn series_rows(samples: &[RawSample]) -> Vec<SeriesRow> {
    samples
        .iter()
        .filter_map(|s| {
            s.timestamp().map(|timestamp| SeriesRow {
                timestamp,
                open: s.open,
                high: s.high,
                low: s.low,
                close: s.close,
            })
        })
        .collect()
}

/// Joins buckets with the trend segment pointing at each of them.
///
/// `trend` is expected in classifier order, where segment `i` points at
/// bucket `i + 1`.
#[must_use]
pub fn box_plot_rows(buckets: &[DayBucket], trend: &[TrendSegment]) -> Vec<BoxPlotRow> {
    buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| BoxPlotRow {
            day: bucket.day,
            sample_count: bucket.sample_count,
            min: bucket.min,
            lower_quartile: bucket.lower_quartile,
            median: bucket.median,
            upper_quartile: bucket.upper_quartile,
            max: bucket.max,
            trend: index
                .checked_sub(1)
                .and_then(|i| trend.get(i))
                .filter(|segment| segment.bucket_index == index)
                .map(|segment| segment.direction),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use coinbox_aggregate::classify;

    pub(crate) fn samples() -> Vec<RawSample> {
        vec![
            RawSample::new(1_577_836_800, 7000.0, 7010.5, 6990.0, 7005.0),
            RawSample::new(1_577_840_400, 7005.0, 7020.0, 7001.0, 7018.25),
        ]
    }

    pub(crate) fn buckets() -> Vec<DayBucket> {
        [(1, 10.0), (2, 12.0), (3, 8.0)]
            .into_iter()
            .map(|(d, median)| DayBucket {
                day: NaiveDate::from_ymd_opt(2020, 1, d).unwrap(),
                sample_count: 24,
                min: median - 2.0,
                lower_quartile: median - 1.0,
                median,
                upper_quartile: median + 1.0,
                max: median + 2.0,
            })
            .collect()
    }

    pub(crate) fn rows() -> Vec<BoxPlotRow> {
        let buckets = buckets();
        box_plot_rows(&buckets, &classify(&buckets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinbox_aggregate::classify;

    #[test]
    fn test_box_plot_rows_attach_trend() {
        let rows = fixtures::rows();
        let trend: Vec<_> = rows.iter().map(|r| r.trend).collect();
        assert_eq!(trend, vec![None, Some(Direction::Up), Some(Direction::Down)]);
    }

    #[test]
    fn test_box_plot_rows_index_trend_by_position() {
        let buckets = fixtures::buckets();
        let trend = classify(&buckets);

        let rows = box_plot_rows(&buckets, &trend[1..]);
        let directions: Vec<_> = rows.iter().map(|r| r.trend).collect();
        assert_eq!(directions, vec![None, None, None]);

        let rows = box_plot_rows(&buckets, &[]);
        assert!(rows.iter().all(|r| r.trend.is_none()));
    }

    #[test]
    fn test_series_rows_timestamps() {
        let rows = series_rows(&fixtures::samples());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp.to_rfc3339(), "2020-01-01T00:00:00+00:00");
        assert!((rows[1].close - 7018.25).abs() < f64::EPSILON);
    }
}
