// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renova export` command implementation.
//!
//! Exports the filtered report as a spreadsheet named
//! `subscription-expiry-report-YYYY-MM-DD.xlsx`. The payload is staged to
//! a temp file and renamed into place, so a failed export never leaves a
//! partial spreadsheet behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use clap::Args;
use renova_config::RenovaConfig;
use renova_core::{ColumnSelection, RenovaError};
use tracing::info;

use crate::filters::FilterArgs;

/// Flags for `renova export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Column keys to export, comma-separated (see `renova columns`).
    /// Defaults to the standard selection.
    #[arg(long = "columns", value_delimiter = ',', conflicts_with = "all_columns")]
    pub columns: Vec<String>,

    /// Export every available column.
    #[arg(long)]
    pub all_columns: bool,

    /// Directory to write the spreadsheet to (defaults to export.output_dir
    /// from config).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Run the `renova export` command.
pub async fn run_export(config: &RenovaConfig, args: ExportArgs) -> Result<(), RenovaError> {
    let selection = build_selection(&args)?;
    // Export covers the full filtered set; page and limit are carried for
    // wire-shape compatibility but do not bound the export.
    let query = args.filters.into_query(1, renova_core::DEFAULT_PAGE_SIZE)?;

    let client = crate::build_client(config)?;
    let bytes = client.export_report(&query, &selection).await?;

    let dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
    let path = dir.join(export_file_name(Utc::now().date_naive()));
    write_spreadsheet(&dir, &path, &bytes)?;

    info!(path = %path.display(), bytes = bytes.len(), "export written");
    println!("Exported {} columns to {}", selection.len(), path.display());
    Ok(())
}

fn build_selection(args: &ExportArgs) -> Result<ColumnSelection, RenovaError> {
    if args.all_columns {
        let mut selection = ColumnSelection::empty();
        selection.select_all();
        return Ok(selection);
    }
    if args.columns.is_empty() {
        return Ok(ColumnSelection::default());
    }
    ColumnSelection::from_keys(args.columns.iter().map(String::as_str))
}

/// Date-stamped export file name.
fn export_file_name(date: NaiveDate) -> String {
    format!("subscription-expiry-report-{date}.xlsx")
}

/// Stage the payload to a temp file in the target directory, then rename
/// into place.
fn write_spreadsheet(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), RenovaError> {
    let export_err = |message: String, source: std::io::Error| RenovaError::Export {
        message,
        source: Some(Box::new(source)),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        export_err(
            format!("cannot create file in {}: {e}", dir.display()),
            e,
        )
    })?;
    staged
        .write_all(bytes)
        .map_err(|e| export_err(format!("failed to write spreadsheet: {e}"), e))?;
    staged
        .persist(path)
        .map_err(|e| export_err(format!("failed to move spreadsheet into place: {e}"), e.error))?;
    Ok(())
}
