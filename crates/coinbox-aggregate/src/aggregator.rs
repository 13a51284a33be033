//! Day bucket partitioning and consistency checks.

use chrono::{NaiveDate, TimeZone};
use coinbox_types::RawSample;
use thiserror::Error;

use crate::{BucketLayout, DayBucket};

/// A series that does not partition cleanly into calendar days.
///
/// Raised when the samples handed to [`aggregate`] do not match the layout,
/// typically because the provider returned fewer samples than planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyFault {
    /// A bucket holds samples from more than one calendar day.
    #[error("bucket {bucket} mixes days: expected {expected}, found {found} at {time}")]
    MixedDays {
        /// Index of the offending bucket.
        bucket: usize,
        /// Day of the bucket's first sample.
        expected: NaiveDate,
        /// Day of the disagreeing sample.
        found: NaiveDate,
        /// Timestamp of the disagreeing sample.
        time: i64,
    },

    /// An interior bucket does not hold a full day of samples.
    #[error("interior bucket {bucket} has {actual} samples, expected {expected}")]
    InteriorSize {
        /// Index of the offending bucket.
        bucket: usize,
        /// Nominal interior size.
        expected: usize,
        /// Samples actually in the bucket.
        actual: usize,
    },

    /// A sample timestamp has no representation in the reference zone.
    #[error("timestamp {0} cannot be placed in the reference zone")]
    InvalidTimestamp(i64),

    /// The layout's interior size is zero.
    #[error("interior bucket size must be positive")]
    InvalidLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    First,
    Interior,
    Last,
}

/// Partitions an ascending hourly series into day buckets and summarizes
/// each one.
///
/// The first `layout.first_size` samples form the first bucket and the last
/// `layout.last_size` samples the last one; the samples between them are cut
/// into interior buckets of `layout.interior_size`. Empty boundary buckets are
/// skipped, so a series shorter than the layout yields fewer buckets.
///
/// # Errors
///
/// Returns [`ConsistencyFault`] if a bucket spans two days in `tz`, if an
/// interior bucket is short, or if the layout is unusable. No buckets are
/// returned in that case.
pub fn aggregate<Tz: TimeZone>(
    samples: &[RawSample],
    tz: &Tz,
    layout: &BucketLayout,
) -> Result<Vec<DayBucket>, ConsistencyFault> {
    if layout.interior_size == 0 {
        return Err(ConsistencyFault::InvalidLayout);
    }

    let first_len = layout.first_size.min(samples.len());
    let (first, rest) = samples.split_at(first_len);
    let last_len = layout.last_size.min(rest.len());
    let (interior, last) = rest.split_at(rest.len() - last_len);

    let groups = std::iter::once((Role::First, first))
        .chain(interior.chunks(layout.interior_size).map(|c| (Role::Interior, c)))
        .chain(std::iter::once((Role::Last, last)))
        .filter(|(_, chunk)| !chunk.is_empty());

    let mut buckets = Vec::new();
    for (index, (role, chunk)) in groups.enumerate() {
        if role == Role::Interior && chunk.len() != layout.interior_size {
            return Err(ConsistencyFault::InteriorSize {
                bucket: index,
                expected: layout.interior_size,
                actual: chunk.len(),
            });
        }

        let day = common_day(index, chunk, tz)?;
        if let Some(bucket) = DayBucket::summarize(day, chunk) {
            buckets.push(bucket);
        }
    }

    tracing::debug!(
        samples = samples.len(),
        buckets = buckets.len(),
        "aggregated series into day buckets"
    );
    Ok(buckets)
}

/// Returns the day every sample of `chunk` falls on in `tz`.
fn common_day<Tz: TimeZone>(
    index: usize,
    chunk: &[RawSample],
    tz: &Tz,
) -> Result<NaiveDate, ConsistencyFault> {
    let day_of = |sample: &RawSample| {
        tz.timestamp_opt(sample.time, 0)
            .single()
            .map(|dt| dt.date_naive())
            .ok_or(ConsistencyFault::InvalidTimestamp(sample.time))
    };

    let Some(head) = chunk.first() else {
        return Err(ConsistencyFault::InvalidLayout);
    };
    let expected = day_of(head)?;

    for sample in &chunk[1..] {
        let found = day_of(sample)?;
        if found != expected {
            return Err(ConsistencyFault::MixedDays {
                bucket: index,
                expected,
                found,
                time: sample.time,
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2020-01-01T00:00:00Z
    const JAN_1: i64 = 1_577_836_800;

    /// Hourly samples whose high and low bracket a value that grows with the
    /// hour index.
    fn hourly(start: i64, count: usize) -> Vec<RawSample> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64;
                RawSample::new(start + i as i64 * 3600, base, base + 2.0, base - 1.0, base)
            })
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_aggregate_partitions_days() {
        // 21:00 on Jan 1 to 21:00 on Jan 4: 3 + 2 * 24 + 22 samples.
        let samples = hourly(JAN_1 + 21 * 3600, 73);
        let buckets = aggregate(&samples, &Utc, &BucketLayout::default()).unwrap();

        assert_eq!(buckets.len(), 4);
        let sizes: Vec<_> = buckets.iter().map(|b| b.sample_count).collect();
        assert_eq!(sizes, vec![3, 24, 24, 22]);
        let days: Vec<_> = buckets.iter().map(|b| b.day).collect();
        assert_eq!(
            days,
            vec![date(2020, 1, 1), date(2020, 1, 2), date(2020, 1, 3), date(2020, 1, 4)]
        );

        for bucket in &buckets {
            assert!(bucket.min <= bucket.lower_quartile);
            assert!(bucket.lower_quartile <= bucket.median);
            assert!(bucket.median <= bucket.upper_quartile);
            assert!(bucket.upper_quartile <= bucket.max);
        }
    }

    #[test]
    fn test_aggregate_uses_high_low_pool() {
        let samples = hourly(JAN_1 + 21 * 3600, 73);
        let buckets = aggregate(&samples, &Utc, &BucketLayout::default()).unwrap();

        // First bucket pools highs 102..=104 and lows 99..=101.
        let first = &buckets[0];
        assert!((first.min - 99.0).abs() < f64::EPSILON);
        assert!((first.max - 104.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_conserves_samples() {
        let samples = hourly(JAN_1 + 21 * 3600, 73);
        let buckets = aggregate(&samples, &Utc, &BucketLayout::default()).unwrap();
        let total: usize = buckets.iter().map(|b| b.sample_count).sum();
        assert_eq!(total, samples.len());
    }

    #[test]
    fn test_aggregate_shortened_interior_faults() {
        let mut samples = hourly(JAN_1 + 21 * 3600, 73);
        // Drop 12:00 on Jan 3 from the second interior day.
        samples.remove(3 + 24 + 12);

        let err = aggregate(&samples, &Utc, &BucketLayout::default()).unwrap_err();
        assert_eq!(
            err,
            ConsistencyFault::InteriorSize {
                bucket: 2,
                expected: 24,
                actual: 23,
            }
        );
    }

    #[test]
    fn test_aggregate_mixed_days_faults() {
        // Starting at 22:00 puts midnight of Jan 2 into the first bucket.
        let samples = hourly(JAN_1 + 22 * 3600, 73);
        let err = aggregate(&samples, &Utc, &BucketLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            ConsistencyFault::MixedDays { bucket: 0, expected, found, .. }
                if expected == date(2020, 1, 1) && found == date(2020, 1, 2)
        ));
    }

    #[test]
    fn test_aggregate_respects_zone() {
        // 22:00 UTC on Dec 31 is midnight on Jan 1 at UTC+2.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let samples = hourly(JAN_1 - 2 * 3600, 72);
        let layout = BucketLayout::new(24, 24, 24);
        let buckets = aggregate(&samples, &tz, &layout).unwrap();

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].day, date(2020, 1, 1));
        assert!(aggregate(&samples, &Utc, &layout).is_err());
    }

    #[test]
    fn test_aggregate_fitted_layout() {
        let samples = hourly(JAN_1 + 5 * 3600, 60);
        let layout = BucketLayout::fitted(&samples, &Utc, 24);
        let buckets = aggregate(&samples, &Utc, &layout).unwrap();

        let sizes: Vec<_> = buckets.iter().map(|b| b.sample_count).collect();
        assert_eq!(sizes, vec![19, 24, 17]);
    }

    #[test]
    fn test_aggregate_short_series() {
        let samples = hourly(JAN_1 + 21 * 3600, 2);
        let buckets = aggregate(&samples, &Utc, &BucketLayout::default()).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].sample_count, 2);
    }

    #[test]
    fn test_aggregate_empty() {
        let buckets = aggregate(&[], &Utc, &BucketLayout::default()).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_aggregate_zero_interior_size() {
        let layout = BucketLayout::new(3, 0, 22);
        assert_eq!(
            aggregate(&[], &Utc, &layout),
            Err(ConsistencyFault::InvalidLayout)
        );
    }
}
