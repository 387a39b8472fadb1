//! bandbook - point-in-time order book liquidity across venues
//!
//! Fetches every enabled venue once, bands each book around its mid price and
//! prints the merged totals.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bandbook_cli::{render_json, settings, Args, OutputFormat, TextReport};
use bandbook_feed::LiquidityAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting bandbook v{}", env!("CARGO_PKG_VERSION"));

    let mut config = settings::load(args.config.as_deref())?;
    args.apply(&mut config);

    let aggregator = LiquidityAggregator::from_config(&config)?;
    let snapshot = aggregator.run().await;

    match args.format {
        OutputFormat::Text => {
            let report = TextReport::new(&snapshot).with_venue_detail(!args.no_venue_detail);
            print!("{}", report);
        }
        OutputFormat::Json => println!("{}", render_json(&snapshot)?),
    }

    Ok(())
}
