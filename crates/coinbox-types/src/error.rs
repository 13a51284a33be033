//! Error types shared across coinbox crates.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Invalid input to the range request planner.
///
/// These are rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// The range is empty or inverted.
    #[error("Invalid range: {from} >= {to}")]
    InvalidRange {
        /// Range start.
        from: DateTime<Utc>,
        /// Range end.
        to: DateTime<Utc>,
    },

    /// A range bound does not fall on a whole hour.
    #[error("Timestamp {0} is not aligned to an hour boundary")]
    Unaligned(DateTime<Utc>),

    /// Local midnight of the date does not exist in the reference time zone.
    #[error("Midnight of {0} does not exist in the reference time zone")]
    NonexistentMidnight(NaiveDate),

    /// The per-request sample limit is zero.
    #[error("Hourly limit must be positive")]
    ZeroLimit,
}
