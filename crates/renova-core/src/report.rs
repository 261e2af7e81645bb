// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report aggregation, filtering, and pagination over subscription records.
//!
//! These operate on an in-memory record set and mirror the backend's report
//! semantics: filters are a conjunction of independent predicates, and the
//! pagination envelope is an explicit `total`/`pages` pair rather than a
//! clamped page number. Everything here is pure; `now` is always injected.

use chrono::{DateTime, Utc};

use crate::classify::{classify, Classification};
use crate::error::RenovaError;
use crate::query::ReportQuery;
use crate::types::{Pagination, SubscriptionRecord, SummaryCounts};

/// Number of page buttons the pager shows at once.
const PAGE_WINDOW: u32 = 5;

/// One presentable report row: the record plus its classification.
#[derive(Debug, Clone)]
pub struct ReportRow<'a> {
    pub record: &'a SubscriptionRecord,
    pub days_remaining: Option<i64>,
    pub bucket: crate::types::ExpiryBucket,
}

/// Tally every record into exactly one bucket.
///
/// The sum of all bucket counts always equals `records.len()`.
pub fn aggregate(records: &[SubscriptionRecord], now: DateTime<Utc>) -> SummaryCounts {
    let mut counts = SummaryCounts::default();
    for record in records {
        counts.record(classify(record.expires_at, now).bucket);
    }
    counts
}

/// True when `record` satisfies every constrained dimension of `query`.
///
/// An empty set for a dimension means "no constraint on that dimension",
/// never "match none".
pub fn matches_query(record: &SubscriptionRecord, query: &ReportQuery, now: DateTime<Utc>) -> bool {
    let Classification { bucket, .. } = classify(record.expires_at, now);

    if !query.statuses.is_empty() && !query.statuses.contains(&bucket) {
        return false;
    }

    if !query.plans.is_empty() {
        match &record.plan_id {
            Some(plan) if query.plans.contains(plan) => {}
            _ => return false,
        }
    }

    let loc = &query.location;
    if !loc.countries.is_empty()
        && !record
            .country
            .as_ref()
            .is_some_and(|c| loc.countries.contains(c))
    {
        return false;
    }
    if !loc.states.is_empty()
        && !record
            .state
            .as_ref()
            .is_some_and(|s| loc.states.contains(s))
    {
        return false;
    }
    if !loc.cities.is_empty()
        && !record.city.as_ref().is_some_and(|c| loc.cities.contains(c))
    {
        return false;
    }

    if query.from.is_some() || query.to.is_some() {
        let Some(expiry) = record.expires_at.map(|at| at.date_naive()) else {
            return false;
        };
        if query.from.is_some_and(|from| expiry < from) {
            return false;
        }
        if query.to.is_some_and(|to| expiry > to) {
            return false;
        }
    }

    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        let hit = [
            record.name.as_deref(),
            record.email.as_deref(),
            record.member_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    true
}

/// Select the records matching `query`, in input order.
pub fn filter<'a>(
    records: &'a [SubscriptionRecord],
    query: &ReportQuery,
    now: DateTime<Utc>,
) -> Vec<&'a SubscriptionRecord> {
    records
        .iter()
        .filter(|record| matches_query(record, query, now))
        .collect()
}

/// Slice out one page of `items` with its pagination envelope.
///
/// `page` is 1-based. An out-of-range page yields an empty slice with the
/// requested page preserved in the envelope; callers see the mismatch
/// against `pages` instead of a silent wraparound. Zero `page` or `limit`
/// fails fast.
pub fn paginate<T>(items: &[T], page: u32, limit: u32) -> Result<(&[T], Pagination), RenovaError> {
    if page == 0 {
        return Err(RenovaError::InvalidArgument(
            "page numbers are 1-based; got 0".into(),
        ));
    }
    let pagination = Pagination::new(items.len() as u64, page, limit)?;

    let start = (page as usize - 1).saturating_mul(limit as usize);
    let slice = if start >= items.len() {
        &items[0..0]
    } else {
        let end = (start + limit as usize).min(items.len());
        &items[start..end]
    };
    Ok((slice, pagination))
}

/// Filter, classify, and paginate in one pass: the page of rows the
/// presentation layer renders, plus its pagination envelope.
pub fn build_report<'a>(
    records: &'a [SubscriptionRecord],
    query: &ReportQuery,
    now: DateTime<Utc>,
) -> Result<(Vec<ReportRow<'a>>, Pagination), RenovaError> {
    query.validate()?;
    let matched = filter(records, query, now);
    let (slice, pagination) = paginate(&matched, query.page, query.limit)?;
    let rows = slice
        .iter()
        .map(|record| {
            let c = classify(record.expires_at, now);
            ReportRow {
                record,
                days_remaining: c.days_remaining,
                bucket: c.bucket,
            }
        })
        .collect();
    Ok((rows, pagination))
}

/// The window of page numbers a pager shows around the current page.
///
/// All pages when there are five or fewer; anchored to the start near the
/// beginning, to the end near the end, and centered on the current page in
/// between.
pub fn page_window(current: u32, pages: u32) -> Vec<u32> {
    let count = pages.min(PAGE_WINDOW);
    (0..count)
        .map(|i| {
            if pages <= PAGE_WINDOW || current <= 3 {
                i + 1
            } else if current >= pages - 2 {
                pages - (PAGE_WINDOW - 1) + i
            } else {
                current - 2 + i
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationSelection;
    use crate::types::{ExpiryBucket, LocationId, PlanId, SubscriptionId};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap()
    }

    fn record(id: &str, days_from_now: Option<i64>) -> SubscriptionRecord {
        SubscriptionRecord {
            id: SubscriptionId(id.to_string()),
            member_id: Some(format!("REN{id}")),
            name: Some(format!("member {id}")),
            email: Some(format!("{id}@example.com")),
            phone: None,
            plan_id: Some(PlanId("plan-gold".into())),
            plan_name: Some("Gold".into()),
            plan_price: Some(4999.0),
            start_at: None,
            expires_at: days_from_now.map(|d| now() + Duration::days(d)),
            days_remaining: None,
            expiry_status: None,
            branch: None,
            country: Some(LocationId("in".into())),
            state: Some(LocationId("mh".into())),
            city: Some(LocationId("mumbai".into())),
        }
    }

    #[test]
    fn aggregate_covers_the_spec_scenario() {
        let days = [-2, 0, 3, 7, 8, 15, 16, 30, 40];
        let records: Vec<_> = days
            .iter()
            .enumerate()
            .map(|(i, d)| record(&i.to_string(), Some(*d)))
            .collect();

        let counts = aggregate(&records, now());
        assert_eq!(counts.expired, 1);
        assert_eq!(counts.expiring_7, 3);
        assert_eq!(counts.expiring_15, 2);
        assert_eq!(counts.expiring_30, 2);
        assert_eq!(counts.not_expiring_soon, 1);
        assert_eq!(counts.unknown, 0);
        assert_eq!(counts.total(), records.len() as u64);
    }

    #[test]
    fn aggregate_total_always_matches_input_len() {
        let records: Vec<_> = (0..17)
            .map(|i| record(&i.to_string(), if i % 5 == 0 { None } else { Some(i - 8) }))
            .collect();
        assert_eq!(aggregate(&records, now()).total(), 17);
    }

    #[test]
    fn status_filter_uses_derived_bucket() {
        let records = vec![record("a", Some(-3)), record("b", Some(5)), record("c", Some(20))];
        let q = ReportQuery {
            statuses: vec![ExpiryBucket::Expired, ExpiryBucket::Expiring7],
            ..ReportQuery::default()
        };
        let matched = filter(&records, &q, now());
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn filters_are_a_conjunction() {
        let mut other_plan = record("b", Some(5));
        other_plan.plan_id = Some(PlanId("plan-silver".into()));
        let records = vec![record("a", Some(5)), other_plan];

        let q = ReportQuery {
            statuses: vec![ExpiryBucket::Expiring7],
            plans: vec![PlanId("plan-gold".into())],
            ..ReportQuery::default()
        };
        let matched = filter(&records, &q, now());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.0, "a");
    }

    #[test]
    fn empty_dimension_means_no_constraint() {
        let records = vec![record("a", Some(5)), record("b", None)];
        let matched = filter(&records, &ReportQuery::default(), now());
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn location_filter_matches_each_level() {
        let mut elsewhere = record("b", Some(5));
        elsewhere.city = Some(LocationId("pune".into()));
        let records = vec![record("a", Some(5)), elsewhere];

        let q = ReportQuery {
            location: LocationSelection {
                countries: vec![LocationId("in".into())],
                states: vec![LocationId("mh".into())],
                cities: vec![LocationId("mumbai".into())],
            },
            ..ReportQuery::default()
        };
        let matched = filter(&records, &q, now());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.0, "a");
    }

    #[test]
    fn date_range_excludes_records_without_expiry() {
        let records = vec![record("a", Some(5)), record("b", None)];
        let q = ReportQuery {
            from: Some(now().date_naive()),
            to: Some((now() + Duration::days(30)).date_naive()),
            ..ReportQuery::default()
        };
        let matched = filter(&records, &q, now());
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = vec![record("alpha", Some(5)), record("beta", Some(5))];
        let q = ReportQuery {
            search: Some("RENALPHA".into()),
            ..ReportQuery::default()
        };
        assert_eq!(filter(&records, &q, now()).len(), 1);

        let q = ReportQuery {
            search: Some("beta@EXAMPLE".into()),
            ..ReportQuery::default()
        };
        assert_eq!(filter(&records, &q, now()).len(), 1);
    }

    #[test]
    fn paginate_23_records_by_10() {
        let items: Vec<u32> = (1..=23).collect();
        let (page1, p) = paginate(&items, 1, 10).unwrap();
        assert_eq!(p.pages, 3);
        assert_eq!(p.total, 23);
        assert_eq!(page1, (1..=10).collect::<Vec<_>>());

        let (page3, p) = paginate(&items, 3, 10).unwrap();
        assert_eq!(page3, (21..=23).collect::<Vec<_>>());
        assert_eq!(p.page, 3);
    }

    #[test]
    fn paginate_is_idempotent() {
        let items: Vec<u32> = (0..50).collect();
        let first = paginate(&items, 2, 7).unwrap();
        let second = paginate(&items, 2, 7).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn out_of_range_page_keeps_requested_page() {
        let items: Vec<u32> = (0..5).collect();
        let (slice, p) = paginate(&items, 9, 10).unwrap();
        assert!(slice.is_empty());
        assert_eq!(p.page, 9);
        assert_eq!(p.pages, 1);
    }

    #[test]
    fn paginate_rejects_zero_arguments() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, 10).is_err());
        assert!(paginate(&items, 1, 0).is_err());
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let items: [u32; 0] = [];
        let (slice, p) = paginate(&items, 1, 10).unwrap();
        assert!(slice.is_empty());
        assert_eq!(p.pages, 0);
        assert_eq!(p.total, 0);
    }

    #[test]
    fn build_report_classifies_the_page() {
        let records: Vec<_> = (0..12).map(|i| record(&i.to_string(), Some(i))).collect();
        let q = ReportQuery::default().with_page(2);
        let (rows, p) = build_report(&records, &q, now()).unwrap();
        assert_eq!(p.total, 12);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].days_remaining, Some(10));
        assert_eq!(rows[0].bucket, ExpiryBucket::Expiring15);
    }

    #[test]
    fn build_report_rejects_invalid_query() {
        let records = vec![record("a", Some(1))];
        assert!(build_report(&records, &ReportQuery::default().with_page(0), now()).is_err());
    }

    #[test]
    fn page_window_shows_all_when_few_pages() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(3, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(1, 0), Vec::<u32>::new());
    }

    #[test]
    fn page_window_anchors_and_centers() {
        assert_eq!(page_window(2, 9), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(5, 9), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(8, 9), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(9, 9), vec![5, 6, 7, 8, 9]);
    }
}
