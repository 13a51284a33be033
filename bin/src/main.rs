//! coinbox CLI - Historical cryptocurrency box plots.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::chart::ChartArgs;

#[derive(Parser)]
#[command(name = "coinbox")]
#[command(about = "Historical cryptocurrency box plots and line charts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Provider API key
    #[arg(long, env = "COINBOX_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a box plot or line chart as rows
    Chart(ChartArgs),

    /// List available coins
    List {
        /// Search pattern matched against symbol and name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show coin details
    Info {
        /// Coin id or trading symbol
        coin: String,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Chart(args) => commands::chart::chart(args, cli.api_key, cli.quiet).await,
        Commands::List { search } => {
            commands::list::list_instruments(search.as_deref(), cli.api_key).await
        }
        Commands::Info { coin } => commands::info::show_info(&coin, cli.api_key).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chart() {
        let cli = Cli::try_parse_from([
            "coinbox",
            "chart",
            "--coin",
            "BTC",
            "--from",
            "2020-01-01",
            "--to",
            "2020-01-04",
            "--utc-offset",
            "-5",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Chart(_))));
    }

    #[test]
    fn test_parse_chart_rejects_bad_values() {
        let parse = |flag: &str, value: &str| {
            Cli::try_parse_from(["coinbox", "chart", "--coin", "BTC", flag, value])
        };

        assert!(parse("--utc-offset", "1000000").is_err());
        assert!(parse("--utc-offset", "-24").is_err());
        assert!(parse("--utc-offset", "14").is_ok());
        assert!(parse("--format", "parquet").is_err());
        assert!(parse("--format", "tsv").is_ok());
    }
}
