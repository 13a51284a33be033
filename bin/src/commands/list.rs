//! List command implementation.
//!
//! This module handles listing the provider's coins with optional filtering.

use anyhow::Result;

use super::{client, load_catalog};
use crate::display::print_instruments;

/// List available coins, optionally filtered by a search pattern.
pub(crate) async fn list_instruments(search: Option<&str>, api_key: Option<String>) -> Result<()> {
    let client = client(api_key, 1)?;
    let catalog = load_catalog(&client).await?;

    let instruments: Vec<_> = match search {
        Some(pattern) => catalog.search(pattern),
        None => catalog.all().collect(),
    };

    if instruments.is_empty() {
        println!("No instruments found.");
        return Ok(());
    }

    print_instruments(instruments.into_iter());
    Ok(())
}
