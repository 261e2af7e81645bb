// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response-envelope normalization for the report endpoint.
//!
//! The backend answers in one of several success shapes depending on the
//! deployment: a `meta.code` envelope, a `success` flag envelope (boolean
//! or the string `"true"`), or a bare `data` array. All of them funnel
//! through [`normalize_report`] into one tagged result; a body matching
//! none of the known shapes surfaces as `UnexpectedShape` rather than a
//! crash or a silently empty page.

use renova_core::{Pagination, RenovaError, SubscriptionRecord, SummaryCounts};
use serde_json::Value;

use crate::types::{Meta, PaginationPayload};

/// Normalized report response: one page of records plus whatever envelope
/// extras the backend included.
#[derive(Debug, Clone)]
pub struct ReportPage {
    pub records: Vec<SubscriptionRecord>,
    pub pagination: Option<Pagination>,
    pub summary: Option<SummaryCounts>,
}

/// Normalize a raw report response body.
///
/// Success shapes are tried in order: `meta.code == 200`, `success ==
/// true`, bare `data`. A `meta.code` other than 200 is an API error
/// carrying the backend's message.
pub fn normalize_report(value: Value) -> Result<ReportPage, RenovaError> {
    if let Some(meta_value) = value.get("meta") {
        let meta: Meta = serde_json::from_value(meta_value.clone())
            .map_err(|e| RenovaError::UnexpectedShape(format!("malformed meta block: {e}")))?;
        if meta.code != 200 {
            return Err(RenovaError::Api {
                message: meta
                    .message
                    .unwrap_or_else(|| format!("backend returned code {}", meta.code)),
                source: None,
            });
        }
        return extract_page(&value);
    }

    match value.get("success") {
        Some(flag) if is_success_flag(flag) => return extract_page(&value),
        Some(_) => {
            // An explicit failure flag is a backend-reported error, not an
            // unrecognized shape.
            return Err(RenovaError::Api {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("backend reported failure")
                    .to_string(),
                source: None,
            });
        }
        None => {}
    }

    if value.get("data").is_some_and(Value::is_array) {
        return extract_page(&value);
    }

    // Prefer a backend-provided message if one is present at a known spot.
    let hint = value
        .get("message")
        .and_then(Value::as_str)
        .map(|m| format!(" ({m})"))
        .unwrap_or_default();
    Err(RenovaError::UnexpectedShape(format!(
        "no meta, success flag, or data array in response{hint}"
    )))
}

/// `success` may arrive as a boolean or as the string `"true"`.
fn is_success_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

fn extract_page(value: &Value) -> Result<ReportPage, RenovaError> {
    let records = match value.get("data") {
        None | Some(Value::Null) => Vec::new(),
        Some(data) => serde_json::from_value(data.clone())
            .map_err(|e| RenovaError::UnexpectedShape(format!("malformed data array: {e}")))?,
    };

    let pagination = match value.get("pagination") {
        None | Some(Value::Null) => None,
        Some(p) => {
            let payload: PaginationPayload = serde_json::from_value(p.clone())
                .map_err(|e| RenovaError::UnexpectedShape(format!("malformed pagination: {e}")))?;
            Some(payload.into_pagination()?)
        }
    };

    let summary = match value.get("summary") {
        None | Some(Value::Null) => None,
        Some(s) => serde_json::from_value(s.clone())
            .map_err(|e| RenovaError::UnexpectedShape(format!("malformed summary: {e}")))?,
    };

    Ok(ReportPage {
        records,
        pagination,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> Value {
        json!([
            {"_id": "sub-1", "name": "Asha", "expiresAt": "2026-09-04T00:00:00Z"},
            {"_id": "sub-2", "name": "Ravi"}
        ])
    }

    #[test]
    fn meta_envelope_normalizes() {
        let body = json!({
            "meta": {"code": 200, "message": "OK"},
            "data": sample_data(),
            "pagination": {"totalCount": 2, "page": 1, "limit": 10, "pages": 1},
            "summary": {"expiring7": 1, "expired": 0}
        });
        let page = normalize_report(body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.pagination.unwrap().total, 2);
        assert_eq!(page.summary.unwrap().expiring_7, 1);
    }

    #[test]
    fn meta_error_code_surfaces_backend_message() {
        let body = json!({"meta": {"code": 403, "message": "not allowed"}});
        let err = normalize_report(body).unwrap_err();
        assert!(matches!(err, RenovaError::Api { ref message, .. } if message == "not allowed"));
    }

    #[test]
    fn boolean_success_envelope_normalizes() {
        let body = json!({"success": true, "data": sample_data()});
        let page = normalize_report(body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(page.pagination.is_none());
    }

    #[test]
    fn string_success_envelope_normalizes() {
        let body = json!({"success": "true", "data": sample_data()});
        assert_eq!(normalize_report(body).unwrap().records.len(), 2);
    }

    #[test]
    fn false_success_is_not_a_bare_data_shape() {
        // `success: false` with a data array must not be mistaken for success.
        let body = json!({"success": false, "message": "denied", "data": []});
        let err = normalize_report(body).unwrap_err();
        assert!(matches!(err, RenovaError::Api { ref message, .. } if message == "denied"));
    }

    #[test]
    fn bare_data_array_normalizes() {
        let body = json!({"data": sample_data()});
        let page = normalize_report(body).unwrap();
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn unknown_shape_is_an_error_not_a_crash() {
        let err = normalize_report(json!({"rows": []})).unwrap_err();
        assert!(matches!(err, RenovaError::UnexpectedShape(_)));
    }

    #[test]
    fn success_with_missing_data_is_an_empty_page() {
        let body = json!({"success": true});
        let page = normalize_report(body).unwrap();
        assert!(page.records.is_empty());
    }

    #[test]
    fn malformed_records_surface_as_unexpected_shape() {
        let body = json!({"success": true, "data": [{"noId": 1}]});
        assert!(matches!(
            normalize_report(body),
            Err(RenovaError::UnexpectedShape(_))
        ));
    }
}
