// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `renova columns` command implementation.
//!
//! Lists the exportable columns grouped the way the export dialog presents
//! them, marking which ones the default selection includes.

use renova_core::{ColumnGroup, ColumnSelection, RenovaError, CATALOG};

const GROUPS: [ColumnGroup; 3] = [
    ColumnGroup::Profile,
    ColumnGroup::Subscription,
    ColumnGroup::Location,
];

/// Run the `renova columns` command.
pub fn run_columns() -> Result<(), RenovaError> {
    let defaults = ColumnSelection::default();

    println!();
    for group in GROUPS {
        println!("  {}", group.title());
        for column in CATALOG.iter().filter(|c| c.group == group) {
            let marker = if defaults.contains(column.key) { "*" } else { " " };
            println!("   {marker} {:<14} {}", column.key, column.label);
        }
        println!();
    }
    println!("  * = included in the default export selection");
    println!();
    Ok(())
}
