// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renova - subscription expiry reporting for renewal follow-up.
//!
//! This is the binary entry point for the Renova CLI.

use std::time::Duration;

use clap::{Parser, Subcommand};
use renova_client::ReportClient;
use renova_config::RenovaConfig;
use renova_core::RenovaError;

mod columns;
mod expiring;
mod export;
mod filters;
mod report;
mod summary;

/// Renova - subscription expiry reporting for renewal follow-up.
#[derive(Parser, Debug)]
#[command(name = "renova", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse the subscription expiry report.
    Report(report::ReportArgs),
    /// Page through subscriptions expiring inside a 7/15/30-day window.
    Expiring(expiring::ExpiringArgs),
    /// Show the dashboard expiry summary counts.
    Summary(summary::SummaryArgs),
    /// Export the filtered report as a spreadsheet.
    Export(export::ExportArgs),
    /// List the exportable columns.
    Columns,
}

/// Build the backend client from the loaded configuration.
pub(crate) fn build_client(config: &RenovaConfig) -> Result<ReportClient, RenovaError> {
    ReportClient::new(
        config.api.base_url.clone(),
        config.api.api_key.as_deref(),
        Duration::from_secs(config.api.timeout_secs),
    )
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match renova_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            renova_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let result = match cli.command {
        Commands::Report(args) => report::run_report(&config, args).await,
        Commands::Expiring(args) => expiring::run_expiring(&config, args).await,
        Commands::Summary(args) => summary::run_summary(&config, args).await,
        Commands::Export(args) => export::run_export(&config, args).await,
        Commands::Columns => columns::run_columns(),
    };

    if let Err(err) = result {
        tracing::error!(%err, "command failed");
        eprintln!("renova: {err}");
        std::process::exit(1);
    }
}
