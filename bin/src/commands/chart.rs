//! Chart command implementation.
//!
//! Validates the chart parameters the way a query string is validated, runs
//! one render cycle with retries, and writes the rows.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Months, Utc};
use clap::Args;
use coinbox_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use super::{client, load_catalog, resolve_coin};
use crate::display::{Layout, RowStyle, write_chart};

/// Date format of the range arguments.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Args)]
pub(crate) struct ChartArgs {
    /// Coin id or trading symbol (e.g., 1182, BTC)
    #[arg(short, long)]
    coin: String,

    /// First day (YYYY-MM-DD). Defaults to one month before the end.
    #[arg(long)]
    from: Option<String>,

    /// End day, exclusive (YYYY-MM-DD). Defaults to yesterday.
    #[arg(long)]
    to: Option<String>,

    /// Chart type (boxplot or linechart)
    #[arg(short, long, default_value = "boxplot")]
    graph_type: String,

    /// Output format (csv, tsv, json, ndjson)
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Omit the CSV/TSV header row
    #[arg(long)]
    no_header: bool,

    /// Indent JSON array output
    #[arg(long)]
    pretty: bool,

    /// Output file path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hours east of UTC that calendar days are taken in
    #[arg(
        long,
        default_value = "0",
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-23..=23)
    )]
    utc_offset: i32,

    /// Day bucket sizing
    #[arg(long, value_enum, default_value = "fitted")]
    layout: Layout,

    /// Maximum hourly samples per request
    #[arg(long, default_value = "2000")]
    limit: usize,

    /// Maximum concurrent requests
    #[arg(long, default_value = "8")]
    concurrency: usize,

    /// Retries after a failed download
    #[arg(long, default_value = "3")]
    retries: u32,

    /// Give up on the download after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
}

/// Render a chart and write its rows.
pub(crate) async fn chart(args: ChartArgs, api_key: Option<String>, quiet: bool) -> Result<()> {
    let tz = zone(args.utc_offset)?;
    let cutoff = yesterday(&Utc::now().with_timezone(&tz));

    let to = args
        .to
        .unwrap_or_else(|| cutoff.date().format(DATE_FORMAT).to_string());
    let from = match args.from {
        Some(from) => from,
        None => default_from(&to).unwrap_or_default(),
    };

    let client = client(api_key, args.concurrency)?;
    let catalog = load_catalog(&client).await?;
    let coin = resolve_coin(&catalog, &args.coin).map_or(args.coin.as_str(), Instrument::id);

    let query = [
        ("from", from.as_str()),
        ("to", to.as_str()),
        ("coin", coin),
        ("graphtype", args.graph_type.as_str()),
    ];
    let Some(config) = ChartConfig::from_query(query, &catalog, cutoff) else {
        println!(
            "Nothing to chart. Pick a known coin, a chart type ({}) and a date range ending before yesterday.",
            GraphType::all()
                .iter()
                .map(GraphType::as_str)
                .collect::<Vec<_>>()
                .join(" or ")
        );
        return Ok(());
    };

    let pipeline = ChartPipeline::new(PipelineConfig {
        hourly_limit: args.limit.min(client.config().max_limit),
        concurrency: args.concurrency,
        utc_offset: tz,
        layout: args.layout.strategy(),
        timeout: args.timeout.map(Duration::from_secs),
    });

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {msg}",
        )?);
        pb.set_message(format!(
            "{} {} -> {}",
            config.instrument.symbol(),
            config.from,
            config.to
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let policy = RetryPolicy::default().with_max_retries(args.retries);
    let (pipeline, client, config) = (&pipeline, &client, &config);
    let result = policy.run(move || pipeline.render(client, config)).await;

    let chart = match result {
        Ok(chart) => chart,
        Err(e) => {
            progress.abandon_with_message("Failed");
            return Err(e).context("Chart render failed");
        }
    };
    progress.finish_with_message(match &chart {
        Chart::BoxPlot { buckets, .. } => format!("Aggregated {} days", buckets.len()),
        Chart::Line { samples } => format!("Downloaded {} hours", samples.len()),
    });

    let style = RowStyle {
        format: args.format,
        header: !args.no_header,
        pretty: args.pretty,
    };
    write_chart(&chart, args.output.as_deref(), style)?;

    if !quiet && let Some(path) = &args.output {
        eprintln!("Wrote {} to {}", args.format, path.display());
    }
    Ok(())
}

/// Returns the fixed zone `hours` east of UTC.
fn zone(hours: i32) -> Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .with_context(|| format!("UTC offset out of range: {hours}"))
}

/// Returns the day one month before `to`, formatted like the arguments.
fn default_from(to: &str) -> Option<String> {
    let to = chrono::NaiveDate::parse_from_str(to, DATE_FORMAT).ok()?;
    let from = to.checked_sub_months(Months::new(1))?;
    Some(from.format(DATE_FORMAT).to_string())
}
