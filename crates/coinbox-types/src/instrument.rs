//! Tradeable instrument definitions.

use serde::{Deserialize, Serialize};

/// A tradeable cryptocurrency as listed by the provider catalog.
///
/// Identity is the provider's symbol id; two instruments with the same id are
/// the same instrument regardless of name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Provider-assigned unique identifier (e.g., "1182").
    id: String,
    /// Human-readable name with surrounding whitespace removed (e.g., "Bitcoin").
    name: String,
    /// Symbol used when requesting series data (e.g., "BTC").
    symbol: String,
}

impl Instrument {
    /// Creates a new instrument, trimming the display name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl AsRef<str>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().trim().to_string(),
            symbol: symbol.into(),
        }
    }

    /// Returns the instrument identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the trading symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the key the catalog sorts by: the lowercased display name with
    /// leading non-alphanumeric characters removed.
    #[must_use]
    pub fn sort_key(&self) -> String {
        self.name
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_creation() {
        let instrument = Instrument::new("1182", "  Bitcoin ", "BTC");

        assert_eq!(instrument.id(), "1182");
        assert_eq!(instrument.name(), "Bitcoin");
        assert_eq!(instrument.symbol(), "BTC");
        assert_eq!(instrument.to_string(), "Bitcoin (BTC)");
    }

    #[test]
    fn test_sort_key_skips_leading_punctuation() {
        let instrument = Instrument::new("1", "*Ethereum", "ETH");
        assert_eq!(instrument.sort_key(), "ethereum");
    }
}
