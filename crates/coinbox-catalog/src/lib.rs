//! Instrument catalog for coinbox.
//!
//! This crate normalizes the provider's coin list into a sorted, searchable
//! catalog and validates chart configurations against it.
//!
//! # Example
//!
//! ```
//! use coinbox_catalog::InstrumentCatalog;
//!
//! let json = r#"{"Response":"Success","Data":{
//!     "BTC":{"Id":"1182","Name":"BTC","CoinName":" Bitcoin "},
//!     "ETH":{"Id":"7605","Name":"ETH","CoinName":"Ethereum"}}}"#;
//! let catalog = InstrumentCatalog::from_json(json).unwrap();
//!
//! if let Some(instrument) = catalog.get("1182") {
//!     println!("{}: {}", instrument.name(), instrument.symbol());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/coinbox-rs/coinbox/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod query;

use std::collections::HashMap;

use coinbox_types::Instrument;
use serde::Deserialize;
use thiserror::Error;

pub use query::{ChartConfig, QueryRejection, yesterday};

/// Errors that can occur while loading the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The payload is not valid catalog JSON.
    #[error("Malformed catalog payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider reported an error instead of data.
    #[error("Provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Deserialize)]
struct CatalogPayload {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Data", default)]
    data: HashMap<String, CoinRecord>,
}

#[derive(Debug, Deserialize)]
struct CoinRecord {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CoinName")]
    coin_name: String,
}

/// Sorted catalog of tradeable instruments.
///
/// Built once per load and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
    by_id: HashMap<String, usize>,
}

impl InstrumentCatalog {
    /// Parses and normalizes the provider's coin list payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed or the provider reported
    /// an error.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let payload: CatalogPayload = serde_json::from_str(json)?;
        if payload.response.as_deref() == Some("Error") {
            return Err(CatalogError::Provider(
                payload.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let instruments = payload
            .data
            .into_values()
            .map(|record| Instrument::new(record.id, record.coin_name, record.name));
        Ok(Self::from_instruments(instruments))
    }

    /// Builds a catalog from instruments, sorting them by display name.
    ///
    /// When two instruments share an id the last one wins.
    pub fn from_instruments(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        let mut unique: HashMap<String, Instrument> = HashMap::new();
        for instrument in instruments {
            unique.insert(instrument.id().to_string(), instrument);
        }

        let mut instruments: Vec<Instrument> = unique.into_values().collect();
        instruments.sort_by_cached_key(|i| (i.sort_key(), i.id().to_string()));

        let by_id = instruments
            .iter()
            .enumerate()
            .map(|(index, i)| (i.id().to_string(), index))
            .collect();

        tracing::debug!(count = instruments.len(), "instrument catalog loaded");
        Self { instruments, by_id }
    }

    /// Looks up an instrument by its symbol id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.by_id.get(id).map(|&index| &self.instruments[index])
    }

    /// Looks up an instrument by trading symbol (case-insensitive).
    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|i| i.symbol().eq_ignore_ascii_case(symbol))
    }

    /// Returns all instruments in display order.
    pub fn all(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Returns the total number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Searches instruments by symbol or display name (case-insensitive),
    /// preserving display order.
    pub fn search(&self, pattern: &str) -> Vec<&Instrument> {
        let pattern = pattern.to_lowercase();
        self.instruments
            .iter()
            .filter(|i| format!("{} {}", i.symbol(), i.name()).to_lowercase().contains(&pattern))
            .collect()
    }
}
