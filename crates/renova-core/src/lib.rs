// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Renova subscription expiry reporting toolkit.
//!
//! Pure domain logic only: expiry classification, report aggregation and
//! pagination, the cascading location filter state machine, report query
//! value objects, and the export column catalog. No I/O lives here; the
//! HTTP client and the CLI build on top of this crate.

pub mod classify;
pub mod columns;
pub mod error;
pub mod location;
pub mod query;
pub mod report;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use classify::{classify, days_remaining, Classification};
pub use columns::{ColumnGroup, ColumnSelection, ExportColumn, CATALOG};
pub use error::RenovaError;
pub use location::{CascadingLocationFilter, LocationLevel, LocationSelection};
pub use query::{ReportQuery, DEFAULT_PAGE_SIZE};
pub use report::{aggregate, build_report, filter, page_window, paginate, ReportRow};
pub use types::{
    ExpiryBucket, LocationId, Pagination, PlanId, SubscriptionId, SubscriptionRecord,
    SummaryCounts,
};
