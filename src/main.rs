//! trendcast - next-day price estimate and trend classification
//!
//! # Usage
//! ```sh
//! trendcast predict AAPL --period 1mo
//! trendcast --source csv --csv-dir data/prices classify MSFT --period 1y
//! ```
//!
//! The result mapping is printed as JSON on stdout; logs go to stderr
//! (filter with `RUST_LOG`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use trendcast::application::prediction_service::PredictionService;
use trendcast::config::{Config, DataSource};
use trendcast::infrastructure::ProviderFactory;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Market data source (overrides DATA_SOURCE)
    #[arg(long)]
    source: Option<DataSource>,

    /// Directory holding `<SYMBOL>.csv` files (overrides CSV_DATA_DIR)
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the next close with a linear regression on daily returns
    Predict {
        symbol: String,
        /// Lookback window: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max
        #[arg(long, default_value = "1mo")]
        period: String,
    },
    /// Classify tomorrow's direction with a random forest on daily returns
    Classify {
        symbol: String,
        #[arg(long, default_value = "1y")]
        period: String,
    },
}

/// `RUST_LOG` when set, otherwise warnings and errors only.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the JSON result, so logs go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(log_filter())
        .with(stderr_layer)
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(source) = args.source {
        config.data_source.source = source;
    }
    if let Some(dir) = args.csv_dir {
        config.data_source.csv_data_dir = dir;
    }
    info!("trendcast {} ({:?})", env!("CARGO_PKG_VERSION"), config.data_source.source);

    let provider = ProviderFactory::create_provider(&config);
    let service = PredictionService::from_config(provider, &config.model);

    let output = match args.command {
        Command::Predict { symbol, period } => {
            serde_json::to_string_pretty(&service.next_day_prediction(&symbol, &period).await?)?
        }
        Command::Classify { symbol, period } => {
            serde_json::to_string_pretty(&service.classify_trend(&symbol, &period).await?)?
        }
    };
    println!("{}", output);

    Ok(())
}
