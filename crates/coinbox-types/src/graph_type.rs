//! Chart kind definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of chart a render cycle produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    /// Daily quantile boxes over the hourly high/low pool.
    #[default]
    BoxPlot,
    /// Hourly close prices.
    LineChart,
}

impl GraphType {
    /// Returns the graph type as its query-string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BoxPlot => "boxplot",
            Self::LineChart => "linechart",
        }
    }

    /// Returns all graph types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::BoxPlot, Self::LineChart]
    }
}

impl std::fmt::Display for GraphType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GraphType {
    type Err = GraphTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boxplot" => Ok(Self::BoxPlot),
            "linechart" => Ok(Self::LineChart),
            _ => Err(GraphTypeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid graph type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTypeParseError(String);

impl std::fmt::Display for GraphTypeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid graph type '{}', expected one of: boxplot, linechart",
            self.0
        )
    }
}

impl std::error::Error for GraphTypeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_type_parse() {
        assert_eq!("boxplot".parse::<GraphType>().unwrap(), GraphType::BoxPlot);
        assert_eq!("linechart".parse::<GraphType>().unwrap(), GraphType::LineChart);
        assert!("BoxPlot".parse::<GraphType>().is_err());
        assert!("boxplots".parse::<GraphType>().is_err());
    }

    #[test]
    fn test_graph_type_roundtrip_str() {
        for graph_type in GraphType::all() {
            assert_eq!(graph_type.as_str().parse::<GraphType>().unwrap(), *graph_type);
        }
    }
}
