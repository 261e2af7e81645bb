// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the externally-owned subscription expiry backend.
//!
//! Provides [`ReportClient`] for the report, export, lookup, and dashboard
//! summary endpoints, plus the envelope normalization that funnels the
//! backend's several response shapes into one tagged result.

pub mod client;
pub mod envelope;
pub mod latest;
pub mod lookup;
pub mod types;

pub use client::ReportClient;
pub use envelope::{normalize_report, ReportPage};
pub use latest::{FetchTicket, Latest};
pub use types::{ExpirySummary, ExpiryWindow, LookupOption};
