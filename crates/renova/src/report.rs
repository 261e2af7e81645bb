// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renova report` command implementation.
//!
//! Fetches one page of the expiry report and renders it as a table with
//! per-row urgency coloring and a windowed pager line. `--json` emits the
//! page as structured JSON for scripting.

use std::io::IsTerminal;

use chrono::Utc;
use clap::Args;
use colored::Colorize;
use renova_client::ReportPage;
use renova_config::RenovaConfig;
use renova_core::{
    classify, page_window, ExpiryBucket, Pagination, RenovaError, SubscriptionRecord, SummaryCounts,
};
use serde::Serialize;

use crate::filters::FilterArgs;

/// Flags for `renova report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

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

/// Structured page output for `--json` mode.
#[derive(Debug, Serialize)]
struct PageOutput<'a> {
    records: &'a [SubscriptionRecord],
    pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryCounts>,
}

/// Run the `renova report` command.
pub async fn run_report(config: &RenovaConfig, args: ReportArgs) -> Result<(), RenovaError> {
    let limit = args.limit.unwrap_or(config.api.page_size);
    let query = args.filters.into_query(args.page, limit)?;

    let client = crate::build_client(config)?;
    let page = client.fetch_report(&query).await?;
    output_page(&page, args.json, args.plain)
}

/// Emit one report page: JSON for scripting, otherwise the colored table.
/// Shared with the `expiring` subcommand.
pub(crate) fn output_page(page: &ReportPage, json: bool, plain: bool) -> Result<(), RenovaError> {
    if json {
        let output = PageOutput {
            records: &page.records,
            pagination: page.pagination,
            summary: page.summary,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| RenovaError::Internal(format!("failed to serialize page: {e}")))?
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_page(page, use_color);
    Ok(())
}

fn print_page(page: &ReportPage, use_color: bool) {
    if page.records.is_empty() {
        println!("No subscriptions match the current filters.");
        return;
    }

    let now = Utc::now();
    println!();
    if let Some(counts) = page.summary {
        println!("  {}", summary_line(&counts));
        println!();
    }
    println!(
        "  {:<12} {:<20} {:<14} {:<12} {:>6}  {}",
        "Member", "Name", "Plan", "Expires", "Days", "Status"
    );
    println!("  {}", "-".repeat(78));

    for record in &page.records {
        let c = classify(record.expires_at, now);
        println!(
            "  {:<12} {:<20} {:<14} {:<12} {:>6}  {}",
            field(record.member_id.as_deref()),
            field(record.name.as_deref()),
            field(record.plan_name.as_deref()),
            record
                .expires_at
                .map(|d| d.date_naive().to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_days(c.days_remaining),
            bucket_tag(c.bucket, use_color),
        );
    }

    if let Some(p) = page.pagination {
        println!();
        println!("  {}", pager_line(&p));
    }
    println!();
}

fn field(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Count header from the backend's pre-aggregated bucket tallies.
fn summary_line(counts: &SummaryCounts) -> String {
    format!(
        "expired {} | 0-7 days {} | 8-15 days {} | 16-30 days {}",
        counts.expired, counts.expiring_7, counts.expiring_15, counts.expiring_30
    )
}

fn format_days(days: Option<i64>) -> String {
    days.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Render the bucket as a colored tag matching its urgency.
fn bucket_tag(bucket: ExpiryBucket, use_color: bool) -> String {
    let code = bucket.to_string();
    if !use_color {
        return code;
    }
    match bucket {
        ExpiryBucket::Expired => code.red().bold().to_string(),
        ExpiryBucket::Expiring7 => code.red().to_string(),
        ExpiryBucket::Expiring15 => code.yellow().to_string(),
        ExpiryBucket::Expiring30 => code.blue().to_string(),
        ExpiryBucket::NotExpiringSoon => code.green().to_string(),
        ExpiryBucket::Unknown => code.dimmed().to_string(),
    }
}

/// One-line pager: total count plus the windowed page numbers, with the
/// current page bracketed.
fn pager_line(p: &Pagination) -> String {
    let window = page_window(p.page, p.pages);
    let numbers: Vec<String> = window
        .iter()
        .map(|&n| {
            if n == p.page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    format!(
        "{} records, page {} of {}: {}",
        p.total,
        p.page,
        p.pages,
        numbers.join(" ")
    )
}
