//! CLI command implementations.

pub(crate) mod chart;
pub(crate) mod info;
pub(crate) mod list;

use anyhow::{Context, Result};
use coinbox_lib::prelude::*;

/// Builds a provider client.
pub(crate) fn client(api_key: Option<String>, concurrency: usize) -> Result<HistoClient> {
    let config = ClientConfig {
        api_key,
        concurrency,
        ..Default::default()
    };
    HistoClient::new(config).context("Failed to create HTTP client")
}

/// Downloads the instrument catalog.
pub(crate) async fn load_catalog(client: &HistoClient) -> Result<InstrumentCatalog> {
    let catalog = client
        .fetch_catalog()
        .await
        .context("Failed to load the coin list")?;
    tracing::info!(instruments = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Looks a coin up by catalog id, falling back to its trading symbol.
pub(crate) fn resolve_coin<'a>(catalog: &'a InstrumentCatalog, coin: &str) -> Option<&'a Instrument> {
    catalog.get(coin).or_else(|| catalog.by_symbol(coin))
}
