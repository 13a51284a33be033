//! Output formatters for coinbox chart data.
//!
//! This crate writes the two chart payloads in a form a drawing tool can
//! consume:
//!
//! - [`SeriesRow`] - One hourly OHLC sample, for line charts
//! - [`BoxPlotRow`] - One day's five-number summary and trend, for box plots
//! - [`CsvFormatter`] - CSV or TSV output
//! - [`JsonFormatter`] - JSON array or NDJSON output

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/coinbox-rs/coinbox/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod rows;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
pub use rows::{BoxPlotRow, SeriesRow, box_plot_rows, series_rows};
