//! Historical cryptocurrency box plots from a windowed hourly history API.
//!
//! This is a facade crate that re-exports functionality from the coinbox
//! workspace crates and adds the [`ChartPipeline`] tying them together.
//!
//! # Quick Start
//!
//! ```ignore
//! use coinbox_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HistoClient::with_defaults()?;
//!     let catalog = client.fetch_catalog().await?;
//!
//!     let now = chrono::Local::now();
//!     let query = [
//!         ("from", "2020-01-01"),
//!         ("to", "2020-02-01"),
//!         ("coin", "1182"),
//!         ("graphtype", "boxplot"),
//!     ];
//!     let Some(config) = ChartConfig::from_query(query, &catalog, yesterday(&now)) else {
//!         return Ok(());
//!     };
//!
//!     let chart = ChartPipeline::default().render(&client, &config).await?;
//!     chart.write(&CsvFormatter::new(), std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/coinbox-rs/coinbox/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod pipeline;
mod retry;

pub use pipeline::{Chart, ChartPipeline, LayoutStrategy, PipelineConfig, PipelineError};
pub use retry::RetryPolicy;

// Re-export core types
pub use coinbox_types::*;

// Re-export the catalog and query validation
pub use coinbox_catalog::{CatalogError, ChartConfig, InstrumentCatalog, QueryRejection, yesterday};

// Re-export fetch functionality
pub use coinbox_fetch::{
    ChunkRequest, ClientConfig, FetchError, HistoClient, SeriesSource, fetch_series,
    is_contiguous, plan, plan_range, stitch_chunks,
};

// Re-export aggregation
pub use coinbox_aggregate::{
    BucketLayout, ConsistencyFault, DayBucket, Direction, TrendSegment, aggregate, classify,
    quantile_sorted,
};

// Re-export formatters
pub use coinbox_format::{
    BoxPlotRow, CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat,
    SeriesRow, box_plot_rows, series_rows,
};

/// Prelude module for convenient imports.
///
/// ```
/// use coinbox_lib::prelude::*;
/// ```
pub mod prelude {
    pub use coinbox_types::{GraphType, Instrument, PlanningError, RawSample, TimeRange};

    pub use coinbox_catalog::{ChartConfig, InstrumentCatalog, yesterday};

    pub use coinbox_fetch::{ClientConfig, FetchError, HistoClient, SeriesSource};

    pub use coinbox_aggregate::{BucketLayout, DayBucket, Direction, TrendSegment};

    pub use coinbox_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    pub use crate::{Chart, ChartPipeline, LayoutStrategy, PipelineConfig, PipelineError, RetryPolicy};
}
