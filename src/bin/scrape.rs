//! Run one batch scrape over the watchlist.
//!
//! Data directory comes from `PRICEWATCH_DATA_DIR` (platform data dir if
//! unset); log filter from `RUST_LOG` (default `info`). The batch report is
//! printed to stdout as JSON.

use std::process::ExitCode;

use pricewatch::{config, PriceWatch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("Batch scrape failed: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `false` if any product failed to fetch.
fn run() -> pricewatch::Result<bool> {
    let mut builder = PriceWatch::builder();
    if let Some(dir) = std::env::var_os(config::DATA_DIR_ENV) {
        builder = builder.data_dir(dir);
    }
    let pw = builder.build()?;
    tracing::info!("{}", pw);

    let report = pw.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.is_complete())
}
