//! Display utilities and output formatting for the coinbox CLI.

use anyhow::Result;
use clap::ValueEnum;
use coinbox_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// How chart rows are written.
#[derive(Clone, Copy)]
pub(crate) struct RowStyle {
    pub(crate) format: OutputFormat,
    /// Header row for CSV and TSV.
    pub(crate) header: bool,
    /// Indented JSON arrays.
    pub(crate) pretty: bool,
}

/// Day bucket sizing selected on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Layout {
    /// Derive partial first and last days from the fetched series.
    Fitted,
    /// Use the fixed 3 / 24 / 22 sizes.
    Fixed,
}

impl Layout {
    pub(crate) const fn strategy(self) -> LayoutStrategy {
        match self {
            Self::Fitted => LayoutStrategy::Fitted { interior_size: 24 },
            Self::Fixed => LayoutStrategy::Fixed(BucketLayout::new(3, 24, 22)),
        }
    }
}

/// Write chart rows to a file, or stdout when no path is given.
pub(crate) fn write_chart(chart: &Chart, output: Option<&Path>, style: RowStyle) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_with(chart, &mut writer, style)?;
            writer.flush()?;
        }
        None => {
            let mut writer = BufWriter::new(std::io::stdout());
            write_with(chart, &mut writer, style)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_with<W: Write + Send>(chart: &Chart, writer: W, style: RowStyle) -> Result<()> {
    match style.format {
        OutputFormat::Csv => chart.write(&CsvFormatter::new().with_header(style.header), writer)?,
        OutputFormat::Tsv => chart.write(&CsvFormatter::tsv().with_header(style.header), writer)?,
        OutputFormat::Json => chart.write(&JsonFormatter::new().with_pretty(style.pretty), writer)?,
        OutputFormat::Ndjson => chart.write(&JsonFormatter::ndjson(), writer)?,
    }
    Ok(())
}

/// Print instruments as a table.
pub(crate) fn print_instruments<'a>(instruments: impl ExactSizeIterator<Item = &'a Instrument>) {
    let total = instruments.len();
    println!("{:<10} {:<12} {:<30}", "ID", "SYMBOL", "NAME");
    println!("{}", "-".repeat(54));

    for instrument in instruments {
        println!(
            "{:<10} {:<12} {:<30}",
            instrument.id(),
            instrument.symbol(),
            instrument.name()
        );
    }

    println!("\nTotal: {total} instruments");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_chart() -> Chart {
        Chart::Line {
            samples: vec![
                RawSample::new(1_577_836_800, 1.0, 2.0, 0.5, 1.5),
                RawSample::new(1_577_840_400, 1.5, 3.0, 1.0, 2.5),
            ],
        }
    }

    fn render(style: RowStyle) -> String {
        let mut output = Vec::new();
        write_with(&line_chart(), &mut output, style).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_with_dispatches_on_format() {
        let style = |format| RowStyle {
            format,
            header: true,
            pretty: false,
        };

        assert!(render(style(OutputFormat::Csv)).starts_with("timestamp,open,high,low,close\n"));
        assert!(render(style(OutputFormat::Tsv)).starts_with("timestamp\topen\thigh"));
        assert!(render(style(OutputFormat::Json)).starts_with("[{"));
        assert_eq!(render(style(OutputFormat::Ndjson)).lines().count(), 2);
    }

    #[test]
    fn test_write_with_honors_header_and_pretty() {
        let csv = render(RowStyle {
            format: OutputFormat::Csv,
            header: false,
            pretty: false,
        });
        assert!(csv.starts_with("2020-01-01T00:00:00Z,1,2,0.5,1.5\n"));

        let json = render(RowStyle {
            format: OutputFormat::Json,
            header: true,
            pretty: true,
        });
        assert!(json.starts_with("[\n  {"));
    }
}
