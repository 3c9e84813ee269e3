mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use cronscope_core::config::{load_dotenv, ScanConfig};

use crate::cli::CliArgs;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // .env first so ScanConfig::from_env sees it.
    load_dotenv();
    let args = CliArgs::parse();

    let mut config = ScanConfig::from_env();
    if let Some(years) = args.horizon_years {
        config = config.with_horizon_years(years);
    }
    if let Some(days) = args.lookback_days {
        config = config.with_lookback_days(days);
    }
    config.log_summary();

    debug!(command = ?args.command, "running command");
    let output = commands::run(&args.command, &config)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("failed to serialize output")?;
    println!("{rendered}");

    Ok(())
}
