// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renova summary` command implementation.
//!
//! Shows the dashboard card counts: subscriptions expired or expiring
//! within 7 days, within 8-15 days, and within 16-30 days.

use std::io::IsTerminal;

use clap::Args;
use colored::Colorize;
use renova_client::ExpirySummary;
use renova_config::RenovaConfig;
use renova_core::RenovaError;

/// Flags for `renova summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Output the counts as JSON for scripting.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub plain: bool,
}

/// Run the `renova summary` command.
pub async fn run_summary(config: &RenovaConfig, args: SummaryArgs) -> Result<(), RenovaError> {
    let client = crate::build_client(config)?;
    let summary = client.fetch_summary().await?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary)
                .map_err(|e| RenovaError::Internal(format!("failed to serialize summary: {e}")))?
        );
        return Ok(());
    }

    let use_color = !args.plain && std::io::stdout().is_terminal();
    print_summary(&summary, use_color);
    Ok(())
}

fn print_summary(summary: &ExpirySummary, use_color: bool) {
    println!();
    println!("  Expiry summary");
    println!("  {}", "-".repeat(35));
    for (label, count) in card_lines(summary) {
        let count_str = count.to_string();
        if use_color {
            let colored_count = match label {
                "0-7 days" => count_str.red().bold().to_string(),
                "8-15 days" => count_str.yellow().to_string(),
                _ => count_str.blue().to_string(),
            };
            println!("    {label:<12} {colored_count}");
        } else {
            println!("    {label:<12} {count_str}");
        }
    }
    println!();
}

/// Card rows in display order. The 0-7 card includes already expired
/// subscriptions.
fn card_lines(summary: &ExpirySummary) -> [(&'static str, u64); 3] {
    [
        ("0-7 days", summary.expiring_7),
        ("8-15 days", summary.expiring_15),
        ("16-30 days", summary.expiring_30),
    ]
}
