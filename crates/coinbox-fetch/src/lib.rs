//! Range planning and paginated OHLC fetching for coinbox.
//!
//! This crate provides the retrieval half of the chart pipeline:
//!
//! - [`plan`] - Splits a long range into provider-sized chunk requests
//! - [`url::histohour_url`] - Constructs provider history URLs
//! - [`HistoClient`] - HTTP client for the catalog and history endpoints
//! - [`SeriesSource`] - Seam between the fetcher and where chunks come from
//! - [`fetch_series`] - Concurrent chunk download stitched into one series

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/coinbox-rs/coinbox/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod plan;
mod series;
mod source;
pub mod url;

pub use client::{ClientConfig, FetchError, HistoClient};
pub use plan::{ChunkRequest, plan, plan_range};
pub use series::{fetch_series, is_contiguous, stitch_chunks};
pub use source::SeriesSource;
