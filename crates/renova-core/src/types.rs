// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Renova workspace.
//!
//! Wire names follow the backend's camelCase contract. The backend owns
//! `SubscriptionRecord`; the core never mutates one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::RenovaError;

/// Unique identifier for a subscription record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub String);

/// Unique identifier for a subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

/// Unique identifier for a country, state, or city lookup entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub String);

/// Urgency classification of a subscription's time-to-expiry.
///
/// Buckets are contiguous and non-overlapping over calendar days remaining:
/// every finite day count maps to exactly one bucket, and a missing expiry
/// timestamp maps to [`ExpiryBucket::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
pub enum ExpiryBucket {
    /// Days remaining < 0.
    #[strum(serialize = "EXPIRED")]
    #[serde(rename = "EXPIRED")]
    Expired,
    /// 0 to 7 days remaining (inclusive).
    #[strum(serialize = "EXPIRING_7")]
    #[serde(rename = "EXPIRING_7")]
    Expiring7,
    /// 8 to 15 days remaining.
    #[strum(serialize = "EXPIRING_15")]
    #[serde(rename = "EXPIRING_15")]
    Expiring15,
    /// 16 to 30 days remaining.
    #[strum(serialize = "EXPIRING_30")]
    #[serde(rename = "EXPIRING_30")]
    Expiring30,
    /// More than 30 days remaining.
    #[strum(serialize = "NOT_EXPIRING_SOON")]
    #[serde(rename = "NOT_EXPIRING_SOON")]
    NotExpiringSoon,
    /// No expiry timestamp on record.
    #[strum(serialize = "UNKNOWN")]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// One subscription row as returned by the report endpoint.
///
/// Everything except `expires_at` is opaque payload carried through for
/// rendering and export; the core only interprets the expiry timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    #[serde(alias = "_id")]
    pub id: SubscriptionId,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub plan_id: Option<PlanId>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub plan_price: Option<f64>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    /// Absent means "no data", not an error.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Backend-computed days remaining, when the backend sends one.
    #[serde(default)]
    pub days_remaining: Option<i64>,
    /// Backend-computed bucket, when the backend sends one.
    #[serde(default)]
    pub expiry_status: Option<ExpiryBucket>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub country: Option<LocationId>,
    #[serde(default)]
    pub state: Option<LocationId>,
    #[serde(default)]
    pub city: Option<LocationId>,
}

/// Per-bucket tallies for a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryCounts {
    pub expired: u64,
    #[serde(rename = "expiring7")]
    pub expiring_7: u64,
    #[serde(rename = "expiring15")]
    pub expiring_15: u64,
    #[serde(rename = "expiring30")]
    pub expiring_30: u64,
    pub not_expiring_soon: u64,
    pub unknown: u64,
}

impl SummaryCounts {
    /// Add one record to the tally for `bucket`.
    pub fn record(&mut self, bucket: ExpiryBucket) {
        match bucket {
            ExpiryBucket::Expired => self.expired += 1,
            ExpiryBucket::Expiring7 => self.expiring_7 += 1,
            ExpiryBucket::Expiring15 => self.expiring_15 += 1,
            ExpiryBucket::Expiring30 => self.expiring_30 += 1,
            ExpiryBucket::NotExpiringSoon => self.not_expiring_soon += 1,
            ExpiryBucket::Unknown => self.unknown += 1,
        }
    }

    /// Tally for a single bucket.
    pub fn get(&self, bucket: ExpiryBucket) -> u64 {
        match bucket {
            ExpiryBucket::Expired => self.expired,
            ExpiryBucket::Expiring7 => self.expiring_7,
            ExpiryBucket::Expiring15 => self.expiring_15,
            ExpiryBucket::Expiring30 => self.expiring_30,
            ExpiryBucket::NotExpiringSoon => self.not_expiring_soon,
            ExpiryBucket::Unknown => self.unknown,
        }
    }

    /// Sum over every bucket. Equals the size of the tallied record set.
    pub fn total(&self) -> u64 {
        self.expired
            + self.expiring_7
            + self.expiring_15
            + self.expiring_30
            + self.not_expiring_soon
            + self.unknown
    }
}

/// Pagination envelope as the backend reports it: an explicit
/// `total`/`pages` pair, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total matching records across all pages.
    #[serde(alias = "totalCount")]
    pub total: u64,
    /// 1-based page number as requested by the caller.
    pub page: u32,
    /// Records per page.
    pub limit: u32,
    /// `ceil(total / limit)`; `0` when `total` is `0`.
    pub pages: u32,
}

impl Pagination {
    /// Build a pagination envelope, deriving `pages` from `total` and `limit`.
    ///
    /// Fails fast on `limit == 0` rather than silently coercing.
    pub fn new(total: u64, page: u32, limit: u32) -> Result<Self, RenovaError> {
        if limit == 0 {
            return Err(RenovaError::InvalidArgument(
                "page size must be at least 1".into(),
            ));
        }
        let pages = u32::try_from(total.div_ceil(u64::from(limit)))
            .map_err(|_| RenovaError::InvalidArgument("total count overflows page count".into()))?;
        Ok(Self {
            total,
            page,
            limit,
            pages,
        })
    }
}
