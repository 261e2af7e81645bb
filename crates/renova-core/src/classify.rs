// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Days-remaining computation and bucket classification.
//!
//! Classification uses calendar-day granularity: the difference between the
//! UTC dates of `now` and the expiry timestamp, not fractional hours. A
//! subscription expiring later today therefore classifies as `0` days
//! remaining ("expires today"), distinct from one that expired yesterday.
//!
//! All functions here are pure; callers inject `now` so results are
//! deterministic and testable without a live clock.

use chrono::{DateTime, Utc};

use crate::types::ExpiryBucket;

/// Result of classifying one expiry timestamp against a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Calendar days until expiry; negative when already expired; `None`
    /// when the record carries no expiry timestamp.
    pub days_remaining: Option<i64>,
    pub bucket: ExpiryBucket,
}

/// Calendar days from `now` to `expires_at`, midnight-to-midnight in UTC.
pub fn days_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    expires_at
        .date_naive()
        .signed_duration_since(now.date_naive())
        .num_days()
}

/// Classify an optional expiry timestamp.
///
/// A missing timestamp is not an error: it maps to `(None, Unknown)`.
pub fn classify(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Classification {
    match expires_at {
        None => Classification {
            days_remaining: None,
            bucket: ExpiryBucket::Unknown,
        },
        Some(at) => {
            let days = days_remaining(at, now);
            Classification {
                days_remaining: Some(days),
                bucket: ExpiryBucket::from_days(days),
            }
        }
    }
}

impl ExpiryBucket {
    /// Map a days-remaining count to its bucket.
    ///
    /// The ranges are contiguous and non-overlapping, so every `i64` lands
    /// in exactly one bucket.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => ExpiryBucket::Expired,
            0..=7 => ExpiryBucket::Expiring7,
            8..=15 => ExpiryBucket::Expiring15,
            16..=30 => ExpiryBucket::Expiring30,
            _ => ExpiryBucket::NotExpiringSoon,
        }
    }
}
