// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report query value objects.
//!
//! A `ReportQuery` is constructed fresh per filter-apply action and treated
//! as immutable once submitted; page and page-size changes produce a new
//! value via the `with_*` constructors. Serialization matches the backend
//! contract: empty dimensions are omitted entirely, since an absent key
//! means "no constraint" while an empty array would be ambiguous.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RenovaError;
use crate::location::LocationSelection;
use crate::types::{ExpiryBucket, PlanId};

/// Default page size, matching the report table's initial state.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The full set of filter and pagination parameters for one report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Inclusive lower bound on the expiry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the expiry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Bucket filter; empty means all buckets.
    #[serde(
        rename = "expiryStatus",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub statuses: Vec<ExpiryBucket>,
    /// Plan filter; empty means all plans.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<PlanId>,
    /// Location filter, flattened to `country`/`state`/`city` keys.
    #[serde(flatten)]
    pub location: LocationSelection,
    /// Free-text search over name, email, and member id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Records per page.
    pub limit: u32,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            statuses: Vec::new(),
            plans: Vec::new(),
            location: LocationSelection::default(),
            search: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ReportQuery {
    /// A fresh query for the given page, superseding this one.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// A fresh query with a new page size, reset to the first page.
    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            ..self.clone()
        }
    }

    /// Check invariants before submission.
    ///
    /// Pages are 1-based and the page size must be positive; a reversed
    /// date range is a caller bug rather than an empty result.
    pub fn validate(&self) -> Result<(), RenovaError> {
        if self.page == 0 {
            return Err(RenovaError::InvalidArgument(
                "page numbers are 1-based; got 0".into(),
            ));
        }
        if self.limit == 0 {
            return Err(RenovaError::InvalidArgument(
                "page size must be at least 1".into(),
            ));
        }
        if let (Some(from), Some(to)) = (self.from, self.to)
            && to < from
        {
            return Err(RenovaError::InvalidArgument(format!(
                "date range is reversed: {from} > {to}"
            )));
        }
        Ok(())
    }

    /// True when no filter dimension constrains the result.
    pub fn is_unfiltered(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.statuses.is_empty()
            && self.plans.is_empty()
            && self.location.is_empty()
            && self.search.is_none()
    }
}
