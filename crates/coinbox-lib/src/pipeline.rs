//! One chart render cycle: plan, fetch, aggregate, classify.

use chrono::{FixedOffset, Offset, Utc};
use coinbox_aggregate::{
    BucketLayout, ConsistencyFault, DayBucket, TrendSegment, aggregate, classify,
};
use coinbox_catalog::ChartConfig;
use coinbox_fetch::{FetchError, SeriesSource, fetch_series, plan_range};
use coinbox_format::{FormatError, Formatter, box_plot_rows, series_rows};
use coinbox_types::{GraphType, PlanningError, RawSample};
use std::io::Write;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a render cycle.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The requested range cannot be planned.
    #[error(transparent)]
    Planning(#[from] PlanningError),

    /// A chunk could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The fetched series does not partition into days.
    #[error(transparent)]
    Consistency(#[from] ConsistencyFault),
}

impl PipelineError {
    /// Returns true if repeating the render cycle may succeed.
    ///
    /// Only fetch failures are transient; planning errors and consistency
    /// faults reproduce on every attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}

/// How day bucket sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Use the given sizes as-is.
    Fixed(BucketLayout),
    /// Derive the boundary sizes from the fetched series.
    Fitted {
        /// Samples per full day.
        interior_size: usize,
    },
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        Self::Fitted { interior_size: 24 }
    }
}

/// Settings for [`ChartPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum samples per chunk request.
    pub hourly_limit: usize,
    /// Maximum concurrent chunk requests.
    pub concurrency: usize,
    /// Reference zone calendar days are taken in.
    pub utc_offset: FixedOffset,
    /// Day bucket sizing.
    pub layout: LayoutStrategy,
    /// Limit on the whole fetch stage.
    pub timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hourly_limit: 2000,
            concurrency: 8,
            utc_offset: Utc.fix(),
            layout: LayoutStrategy::default(),
            timeout: None,
        }
    }
}

/// Output of one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// Daily quantile boxes with their trend colors.
    BoxPlot {
        /// One bucket per calendar day, oldest first.
        buckets: Vec<DayBucket>,
        /// Direction of every bucket after the first.
        trend: Vec<TrendSegment>,
    },
    /// The ascending hourly series.
    Line {
        /// Hourly samples, oldest first.
        samples: Vec<RawSample>,
    },
}

impl Chart {
    /// Returns the chart kind.
    #[must_use]
    pub const fn graph_type(&self) -> GraphType {
        match self {
            Self::BoxPlot { .. } => GraphType::BoxPlot,
            Self::Line { .. } => GraphType::LineChart,
        }
    }

    /// Writes the chart rows with `formatter`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<F: Formatter, W: Write + Send>(
        &self,
        formatter: &F,
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::BoxPlot { buckets, trend } => {
                formatter.write_box_plot(&box_plot_rows(buckets, trend), writer)
            }
            Self::Line { samples } => formatter.write_series(&series_rows(samples), writer),
        }
    }
}

/// Renders validated chart configurations against a series source.
#[derive(Debug, Clone, Default)]
pub struct ChartPipeline {
    config: PipelineConfig,
}

impl ChartPipeline {
    /// Creates a pipeline with the given settings.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Returns the pipeline settings.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs one render cycle.
    ///
    /// Aggregation only runs once every chunk has arrived; a failed or timed
    /// out fetch yields no chart at all.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if planning, fetching or aggregation fails.
    /// Planning errors and consistency faults are logged at error level.
    pub async fn render<S>(&self, source: &S, chart: &ChartConfig) -> Result<Chart, PipelineError>
    where
        S: SeriesSource + ?Sized,
    {
        let tz = self.config.utc_offset;
        let chunks = chart
            .time_range(&tz)
            .and_then(|range| plan_range(&range, self.config.hourly_limit))
            .inspect_err(|e| tracing::error!(error = %e, "cannot plan chart range"))?;

        tracing::info!(
            coin = chart.instrument.symbol(),
            from = %chart.from,
            to = %chart.to,
            chunks = chunks.len(),
            "rendering chart"
        );

        let fetch = fetch_series(source, &chart.instrument, &chunks, self.config.concurrency);
        let samples = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| FetchError::Timeout(limit))??,
            None => fetch.await?,
        };

        if chart.graph_type == GraphType::LineChart {
            return Ok(Chart::Line { samples });
        }

        let layout = match self.config.layout {
            LayoutStrategy::Fixed(layout) => layout,
            LayoutStrategy::Fitted { interior_size } => {
                BucketLayout::fitted(&samples, &tz, interior_size)
            }
        };
        let buckets = aggregate(&samples, &tz, &layout).inspect_err(|e| {
            tracing::error!(error = %e, ?layout, "series failed consistency check");
        })?;
        for bucket in &buckets {
            tracing::debug!(
                day = %bucket.day,
                samples = bucket.sample_count,
                median = bucket.median,
                "day bucket"
            );
        }

        let trend = classify(&buckets);
        Ok(Chart::BoxPlot { buckets, trend })
    }
}
