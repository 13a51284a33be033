//! Daily quantile aggregation for coinbox.
//!
//! This crate turns an ascending hourly series into box-plot input:
//!
//! - [`BucketLayout`] - Nominal sizes of the first, interior and last day buckets
//! - [`aggregate`] - Partitions a series into days and summarizes each one
//! - [`DayBucket`] - Five-number summary of one day's high/low pool
//! - [`classify`] - Up/down signal between consecutive day medians

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/coinbox-rs/coinbox/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bucket;
mod layout;
mod trend;

pub use aggregator::{ConsistencyFault, aggregate};
pub use bucket::{DayBucket, quantile_sorted};
pub use layout::BucketLayout;
pub use trend::{Direction, TrendSegment, classify};
