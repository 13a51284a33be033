//! Day bucket sizing.

use chrono::{NaiveDate, TimeZone};
use coinbox_types::RawSample;
use serde::{Deserialize, Serialize};

/// Nominal sample counts of the day buckets a series is split into.
///
/// The first and last buckets absorb the partial days at either end of the
/// range; every bucket in between holds exactly `interior_size` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLayout {
    /// Samples in the leading partial day.
    pub first_size: usize,
    /// Samples in each full day.
    pub interior_size: usize,
    /// Samples in the trailing partial day.
    pub last_size: usize,
}

impl Default for BucketLayout {
    fn default() -> Self {
        Self {
            first_size: 3,
            interior_size: 24,
            last_size: 22,
        }
    }
}

impl BucketLayout {
    /// Creates a layout with explicit sizes.
    #[must_use]
    pub const fn new(first_size: usize, interior_size: usize, last_size: usize) -> Self {
        Self {
            first_size,
            interior_size,
            last_size,
        }
    }

    /// Derives the boundary sizes from how `samples` actually align to
    /// calendar days in `tz`.
    ///
    /// The first size is the run of leading samples sharing the first
    /// sample's day, the last size the run of trailing samples sharing the
    /// last sample's day. A series within a single day yields a first bucket
    /// only.
    #[must_use]
    pub fn fitted<Tz: TimeZone>(samples: &[RawSample], tz: &Tz, interior_size: usize) -> Self {
        let first_size = leading_run(samples.iter(), tz);
        let remaining = samples.len() - first_size;
        let last_size = leading_run(samples[first_size..].iter().rev(), tz).min(remaining);

        Self {
            first_size,
            interior_size,
            last_size,
        }
    }
}

fn day_of<Tz: TimeZone>(sample: &RawSample, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_opt(sample.time, 0)
        .single()
        .map(|dt| dt.date_naive())
}

/// Counts the samples at the front of `samples` sharing the first one's day.
fn leading_run<'a, Tz: TimeZone>(
    mut samples: impl Iterator<Item = &'a RawSample>,
    tz: &Tz,
) -> usize {
    let Some(day) = samples.next().and_then(|first| day_of(first, tz)) else {
        return 0;
    };
    1 + samples.take_while(|s| day_of(s, tz) == Some(day)).count()
}
