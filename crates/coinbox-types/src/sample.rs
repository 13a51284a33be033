//! Hourly OHLC sample representation.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Number of seconds between two consecutive hourly samples.
pub const HOUR_SECONDS: i64 = 3600;

/// One hourly OHLC observation.
///
/// Field names follow the provider's wire format, so a sample deserializes
/// directly from an element of the histohour `Data.Data` array. Extra provider
/// fields (volumes, conversion info) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Unix timestamp in seconds of the start of the hour.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price during the hour.
    pub high: f64,
    /// Lowest price during the hour.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

impl RawSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns the sample timestamp as a UTC datetime.
    ///
    /// Returns `None` if the timestamp is out of chrono's representable range.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time, 0).single()
    }

    /// Returns true if the timestamp falls on a whole hour.
    #[must_use]
    pub const fn is_hour_aligned(&self) -> bool {
        self.time.rem_euclid(HOUR_SECONDS) == 0
    }
}
