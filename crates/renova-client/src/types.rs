// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire payload types for the report backend.
//!
//! The backend owns these shapes; the structs here tolerate the variance
//! actually observed on the wire (`totalCount` vs `total`, a `pages` field
//! that is sometimes absent) and convert into the core types.

use renova_core::{ColumnSelection, Pagination, RenovaError, ReportQuery};
use serde::{Deserialize, Serialize};

/// `meta` block of the standard response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination block as the backend sends it.
///
/// `pages` is recomputed from `total`/`limit` when the backend omits it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationPayload {
    #[serde(alias = "totalCount")]
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl PaginationPayload {
    pub fn into_pagination(self) -> Result<Pagination, RenovaError> {
        match self.pages {
            Some(pages) => Ok(Pagination {
                total: self.total,
                page: self.page,
                limit: self.limit,
                pages,
            }),
            None => Pagination::new(self.total, self.page, self.limit),
        }
    }
}

/// Body for the export endpoint: the filter plus the ordered column keys.
#[derive(Debug, Serialize)]
pub struct ExportPayload<'a> {
    pub filter: &'a ReportQuery,
    #[serde(rename = "exportArr")]
    pub columns: Vec<&'static str>,
}

impl<'a> ExportPayload<'a> {
    pub fn new(filter: &'a ReportQuery, selection: &ColumnSelection) -> Self {
        Self {
            filter,
            columns: selection.keys(),
        }
    }
}

/// Body for the lookup endpoints (`plan`/`country`/`state`/`city` filter).
#[derive(Debug, Serialize)]
pub struct LookupRequest {
    pub skip: u32,
    pub limit: u32,
    pub filter: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl LookupRequest {
    pub fn new(filter: serde_json::Value, search: Option<&str>) -> Self {
        Self {
            skip: 0,
            limit: 100,
            filter,
            search: search.map(str::to_owned),
        }
    }
}

/// One entry from a lookup endpoint, before projection.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Only the plan endpoint sends this; used to exclude the free plan.
    #[serde(rename = "planId", default)]
    pub plan_id: Option<String>,
}

/// A selectable option presented by a lookup, projected for callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOption {
    pub id: String,
    pub name: String,
}

impl From<LookupEntry> for LookupOption {
    fn from(entry: LookupEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
        }
    }
}

/// Day window the dashboard widget filters by.
///
/// Windows are exclusive ranges: the 0-7 window also includes already
/// expired subscriptions, the later windows do not overlap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryWindow {
    Days7,
    Days15,
    Days30,
}

impl ExpiryWindow {
    /// Map a day count (7, 15, or 30) to its window.
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(Self::Days7),
            15 => Some(Self::Days15),
            30 => Some(Self::Days30),
            _ => None,
        }
    }

    /// The bucket set this window queries for.
    pub fn statuses(self) -> &'static [renova_core::ExpiryBucket] {
        use renova_core::ExpiryBucket::{Expired, Expiring15, Expiring30, Expiring7};
        match self {
            Self::Days7 => &[Expired, Expiring7],
            Self::Days15 => &[Expiring15],
            Self::Days30 => &[Expiring30],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Days7 => "0-7 days",
            Self::Days15 => "8-15 days",
            Self::Days30 => "16-30 days",
        }
    }
}

/// Dashboard card counts.
///
/// The 0-7 day card merges `EXPIRED` with `EXPIRING_7` (the dashboard
/// treats an already-lapsed subscription as maximally urgent); the full
/// report keeps the two buckets distinct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpirySummary {
    /// Expired or expiring within 0-7 days.
    pub expiring_7: u64,
    /// Expiring within 8-15 days.
    pub expiring_15: u64,
    /// Expiring within 16-30 days.
    pub expiring_30: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use renova_core::ExpiryBucket;

    #[test]
    fn pagination_payload_accepts_both_total_spellings() {
        let p: PaginationPayload =
            serde_json::from_str(r#"{"totalCount": 23, "page": 1, "limit": 10}"#).unwrap();
        assert_eq!(p.total, 23);
        let p: PaginationPayload =
            serde_json::from_str(r#"{"total": 9, "page": 1, "limit": 10, "pages": 1}"#).unwrap();
        assert_eq!(p.total, 9);
    }

    #[test]
    fn missing_pages_is_recomputed() {
        let p: PaginationPayload =
            serde_json::from_str(r#"{"total": 23, "page": 2, "limit": 10}"#).unwrap();
        let pagination = p.into_pagination().unwrap();
        assert_eq!(pagination.pages, 3);
        assert_eq!(pagination.page, 2);
    }

    #[test]
    fn explicit_pages_is_trusted() {
        let p: PaginationPayload =
            serde_json::from_str(r#"{"total": 23, "page": 1, "limit": 10, "pages": 5}"#).unwrap();
        assert_eq!(p.into_pagination().unwrap().pages, 5);
    }

    #[test]
    fn export_payload_carries_filter_and_ordered_keys() {
        let query = ReportQuery {
            statuses: vec![ExpiryBucket::Expired],
            ..ReportQuery::default()
        };
        let selection = ColumnSelection::from_keys(["name", "memberId"]).unwrap();
        let payload = ExportPayload::new(&query, &selection);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["filter"]["expiryStatus"][0], "EXPIRED");
        assert_eq!(json["exportArr"][0], "memberId");
        assert_eq!(json["exportArr"][1], "name");
    }

    #[test]
    fn day_counts_map_to_windows() {
        assert_eq!(ExpiryWindow::from_days(7), Some(ExpiryWindow::Days7));
        assert_eq!(ExpiryWindow::from_days(15), Some(ExpiryWindow::Days15));
        assert_eq!(ExpiryWindow::from_days(30), Some(ExpiryWindow::Days30));
        assert_eq!(ExpiryWindow::from_days(10), None);
    }

    #[test]
    fn week_window_includes_expired() {
        assert!(ExpiryWindow::Days7.statuses().contains(&ExpiryBucket::Expired));
        assert!(!ExpiryWindow::Days15.statuses().contains(&ExpiryBucket::Expired));
    }

    #[test]
    fn lookup_request_omits_absent_search() {
        let req = LookupRequest::new(serde_json::json!({}), None);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("search").is_none());
        assert_eq!(json["skip"], 0);
        assert_eq!(json["limit"], 100);
    }
}
