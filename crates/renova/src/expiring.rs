// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renova expiring` command implementation.
//!
//! The dashboard widget feed: subscriptions inside one day window (7, 15,
//! or 30 days), paged through the same table rendering as the full report.
//! The 7-day window includes already expired subscriptions.

use clap::Args;
use renova_client::ExpiryWindow;
use renova_config::RenovaConfig;
use renova_core::RenovaError;

use crate::report::output_page;

/// Flags for `renova expiring`.
#[derive(Args, Debug)]
pub struct ExpiringArgs {
    /// Day window: 7, 15, or 30.
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page (defaults to api.page_size from config).
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output the page as JSON for scripting.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub plain: bool,
}

/// Run the `renova expiring` command.
pub async fn run_expiring(config: &RenovaConfig, args: ExpiringArgs) -> Result<(), RenovaError> {
    let window = window_for(args.days)?;
    let limit = args.limit.unwrap_or(config.api.page_size);

    let client = crate::build_client(config)?;
    let page = client.fetch_expiring_soon(window, args.page, limit).await?;

    if !args.json {
        println!();
        println!("  Expiring within {}", window.label());
    }
    output_page(&page, args.json, args.plain)
}

fn window_for(days: u32) -> Result<ExpiryWindow, RenovaError> {
    ExpiryWindow::from_days(days).ok_or_else(|| {
        RenovaError::InvalidArgument(format!("day window must be 7, 15, or 30; got {days}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_day_flags_map_to_windows() {
        assert_eq!(window_for(7).unwrap(), ExpiryWindow::Days7);
        assert_eq!(window_for(15).unwrap(), ExpiryWindow::Days15);
        assert_eq!(window_for(30).unwrap(), ExpiryWindow::Days30);
    }

    #[test]
    fn unsupported_day_flag_fails_fast() {
        assert!(matches!(
            window_for(10),
            Err(RenovaError::InvalidArgument(_))
        ));
        assert!(window_for(0).is_err());
    }
}
