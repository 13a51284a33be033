//! CSV output format.

use std::io::Write;

use crate::{BoxPlotRow, FormatError, Formatter, SeriesRow};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_series<W: Write + Send>(
        &self,
        rows: &[SeriesRow],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "timestamp{d}open{d}high{d}low{d}close")?;
        }

        for row in rows {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}",
                row.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
                row.open,
                row.high,
                row.low,
                row.close
            )?;
        }

        Ok(())
    }

    fn write_box_plot<W: Write + Send>(
        &self,
        rows: &[BoxPlotRow],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "day{d}sample_count{d}min{d}lower_quartile{d}median{d}upper_quartile{d}max{d}trend"
            )?;
        }

        for row in rows {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                row.day.format("%Y-%m-%d"),
                row.sample_count,
                row.min,
                row.lower_quartile,
                row.median,
                row.upper_quartile,
                row.max,
                row.trend.map_or("", |t| t.as_str())
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::fixtures;
    use crate::series_rows;
    use std::io::Cursor;

    #[test]
    fn test_csv_series() {
        let formatter = CsvFormatter::new();
        let rows = series_rows(&fixtures::samples());
        let mut output = Cursor::new(Vec::new());

        formatter.write_series(&rows, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("timestamp,open,high,low,close"));
        assert!(result.contains("2020-01-01T00:00:00Z,7000,7010.5,6990,7005"));
    }

    #[test]
    fn test_csv_box_plot() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_box_plot(&fixtures::rows(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "2020-01-01,24,8,9,10,11,12,");
        assert_eq!(lines[2], "2020-01-02,24,10,11,12,13,14,up");
        assert!(lines[3].ends_with(",down"));
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter.write_box_plot(&fixtures::rows(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("sample_count"));
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let rows = series_rows(&fixtures::samples());
        let mut output = Cursor::new(Vec::new());

        formatter.write_series(&rows, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("timestamp\topen\thigh"));
    }
}
