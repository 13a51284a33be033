//! Core types for the coinbox OHLC chart pipeline.
//!
//! This crate provides the fundamental data structures used throughout coinbox:
//!
//! - [`RawSample`] - A single hourly OHLC observation from the provider
//! - [`Instrument`] - A tradeable cryptocurrency from the provider catalog
//! - [`TimeRange`] - An hour-aligned half-open `[from, to)` range
//! - [`GraphType`] - The chart kind a render cycle produces

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/coinbox-rs/coinbox/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod graph_type;
mod instrument;
mod sample;
mod time_range;

pub use error::PlanningError;
pub use graph_type::{GraphType, GraphTypeParseError};
pub use instrument::Instrument;
pub use sample::{HOUR_SECONDS, RawSample};
pub use time_range::{HourIterator, TimeRange};
