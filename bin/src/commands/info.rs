//! Info command implementation.

use anyhow::{Context, Result};
use chrono::{Local, Months};
use coinbox_lib::prelude::*;

use super::{client, load_catalog, resolve_coin};

/// Show details of one coin and a ready-made chart query for the last month.
pub(crate) async fn show_info(coin: &str, api_key: Option<String>) -> Result<()> {
    let client = client(api_key, 1)?;
    let catalog = load_catalog(&client).await?;
    let instrument = resolve_coin(&catalog, coin)
        .with_context(|| format!("Unknown coin: {coin}"))?;

    println!("Coin:   {}", instrument.name());
    println!("Symbol: {}", instrument.symbol());
    println!("ID:     {}", instrument.id());
    println!("Quote:  {}", client.config().quote_currency);

    let to = yesterday(&Local::now()).date();
    if let Some(from) = to.checked_sub_months(Months::new(1)) {
        let config = ChartConfig {
            from,
            to,
            instrument: instrument.clone(),
            graph_type: GraphType::BoxPlot,
        };
        let query: Vec<_> = config
            .to_query()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        println!("\nLast month: {}", query.join("&"));
    }

    Ok(())
}
