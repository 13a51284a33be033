//! Hour-aligned time range and hour iteration.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};

use crate::PlanningError;

/// A half-open `[from, to)` range of whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new range, validating that both bounds are hour-aligned and
    /// that `from < to`.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is not on a whole hour or the range is empty.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, PlanningError> {
        for bound in [from, to] {
            if !is_hour_aligned(bound) {
                return Err(PlanningError::Unaligned(bound));
            }
        }
        if from >= to {
            return Err(PlanningError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Creates the range covering the calendar days `[from, to)` in the given
    /// time zone, from local midnight of `from` to local midnight of `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if a local midnight does not exist in `tz`, if it does
    /// not land on a whole UTC hour, or if `from >= to`.
    pub fn from_dates<Tz: TimeZone>(
        from: NaiveDate,
        to: NaiveDate,
        tz: &Tz,
    ) -> Result<Self, PlanningError> {
        Self::new(local_midnight(from, tz)?, local_midnight(to, tz)?)
    }

    /// Returns the inclusive start.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the exclusive end.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Returns the number of hourly samples in the range.
    #[must_use]
    pub fn total_hours(&self) -> usize {
        (self.to - self.from).num_hours() as usize
    }

    /// Returns an iterator over the start of every hour in the range.
    pub fn hours(&self) -> HourIterator {
        HourIterator {
            current: self.from,
            end: self.to,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.from.format("%Y-%m-%dT%H:%MZ"),
            self.to.format("%Y-%m-%dT%H:%MZ")
        )
    }
}

fn is_hour_aligned(instant: DateTime<Utc>) -> bool {
    instant.minute() == 0 && instant.second() == 0 && instant.nanosecond() == 0
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>, PlanningError> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(PlanningError::NonexistentMidnight(date))
}

/// Iterator over the start of every hour in a [`TimeRange`].
#[derive(Debug, Clone)]
pub struct HourIterator {
    current: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Iterator for HourIterator {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }

        let result = self.current;
        self.current += TimeDelta::hours(1);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current >= self.end {
            return (0, Some(0));
        }
        let hours = (self.end - self.current).num_hours() as usize;
        (hours, Some(hours))
    }
}

impl ExactSizeIterator for HourIterator {}
