//! Chart configuration parsed from query parameters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use coinbox_types::{GraphType, Instrument, PlanningError, TimeRange};
use thiserror::Error;

use crate::InstrumentCatalog;

/// Date format of the `from` and `to` parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the "yesterday" cutoff for `now`: the same wall-clock time one day
/// earlier, in `now`'s time zone.
///
/// Recompute this for every validation rather than caching it.
#[must_use]
pub fn yesterday<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    now.naive_local() - TimeDelta::days(1)
}

/// Reason a set of query parameters does not form a chart configuration.
///
/// Rejections are expected user input noise: callers fall back to an empty
/// state rather than reporting them as failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryRejection {
    /// A required parameter is absent.
    #[error("missing parameter '{0}'")]
    Missing(&'static str),

    /// A parameter was given more than once.
    #[error("parameter '{0}' given more than once")]
    Repeated(&'static str),

    /// A date parameter does not parse.
    #[error("parameter '{name}' is not a valid date: {value}")]
    InvalidDate {
        /// Parameter name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// `from` is not before `to`.
    #[error("range start {from} is not before end {to}")]
    EmptyRange {
        /// Parsed start.
        from: NaiveDate,
        /// Parsed end.
        to: NaiveDate,
    },

    /// A date is not strictly before yesterday.
    #[error("date {0} is not before yesterday")]
    TooRecent(NaiveDate),

    /// The coin id does not resolve against the catalog.
    #[error("unknown coin '{0}'")]
    UnknownCoin(String),

    /// The graph type is not recognized.
    #[error("unknown graph type '{0}'")]
    UnknownGraphType(String),
}

/// A validated chart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// First calendar day of the chart (inclusive).
    pub from: NaiveDate,
    /// Last calendar day boundary of the chart (exclusive).
    pub to: NaiveDate,
    /// Instrument to chart.
    pub instrument: Instrument,
    /// Kind of chart.
    pub graph_type: GraphType,
}

#[derive(Default)]
struct RawQuery<'a> {
    from: Option<&'a str>,
    to: Option<&'a str>,
    coin: Option<&'a str>,
    graph_type: Option<&'a str>,
}

impl ChartConfig {
    /// Validates query parameters into a configuration.
    ///
    /// Returns `None` for any invalid combination; the reason is logged at
    /// debug level.
    pub fn from_query<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
        catalog: &InstrumentCatalog,
        yesterday: NaiveDateTime,
    ) -> Option<Self> {
        match Self::validate(pairs, catalog, yesterday) {
            Ok(config) => Some(config),
            Err(rejection) => {
                tracing::debug!(%rejection, "query rejected");
                None
            }
        }
    }

    /// Validates query parameters into a configuration, reporting why they
    /// were rejected.
    ///
    /// Unknown parameter names are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first rule the parameters violate.
    pub fn validate<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
        catalog: &InstrumentCatalog,
        yesterday: NaiveDateTime,
    ) -> Result<Self, QueryRejection> {
        let mut raw = RawQuery::default();
        for (key, value) in pairs {
            let (slot, name) = match key {
                "from" => (&mut raw.from, "from"),
                "to" => (&mut raw.to, "to"),
                "coin" => (&mut raw.coin, "coin"),
                "graphtype" => (&mut raw.graph_type, "graphtype"),
                _ => continue,
            };
            if slot.replace(value).is_some() {
                return Err(QueryRejection::Repeated(name));
            }
        }

        let from = parse_date("from", raw.from)?;
        let to = parse_date("to", raw.to)?;
        if from >= to {
            return Err(QueryRejection::EmptyRange { from, to });
        }
        for date in [from, to] {
            if date.and_time(NaiveTime::MIN) >= yesterday {
                return Err(QueryRejection::TooRecent(date));
            }
        }

        let coin = raw.coin.ok_or(QueryRejection::Missing("coin"))?;
        let instrument = catalog
            .get(coin)
            .cloned()
            .ok_or_else(|| QueryRejection::UnknownCoin(coin.to_string()))?;

        let graph_type = raw.graph_type.ok_or(QueryRejection::Missing("graphtype"))?;
        let graph_type = graph_type
            .parse()
            .map_err(|_| QueryRejection::UnknownGraphType(graph_type.to_string()))?;

        Ok(Self {
            from,
            to,
            instrument,
            graph_type,
        })
    }

    /// Returns the hour range covering `[from, to)` in the reference zone.
    ///
    /// # Errors
    ///
    /// Returns an error if a local midnight is missing or not hour-aligned.
    pub fn time_range<Tz: TimeZone>(&self, tz: &Tz) -> Result<TimeRange, PlanningError> {
        TimeRange::from_dates(self.from, self.to, tz)
    }

    /// Encodes the configuration back into query parameters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("graphtype", self.graph_type.to_string()),
            ("from", self.from.format(DATE_FORMAT).to_string()),
            ("to", self.to.format(DATE_FORMAT).to_string()),
            ("coin", self.instrument.id().to_string()),
        ]
    }
}

fn parse_date(name: &'static str, value: Option<&str>) -> Result<NaiveDate, QueryRejection> {
    let value = value.ok_or(QueryRejection::Missing(name))?;
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| QueryRejection::InvalidDate {
        name,
        value: value.to_string(),
    })
}
