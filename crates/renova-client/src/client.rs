// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the subscription expiry report backend.
//!
//! Wraps the report, export, and dashboard-summary endpoints. Transport
//! policy (retries, backoff) is deliberately left to the backend side of
//! the contract; this client reports failures as retrievable errors and
//! never corrupts previously fetched state.

use std::time::Duration;

use renova_core::{ColumnSelection, RenovaError, ReportQuery};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::envelope::{normalize_report, ReportPage};
use crate::types::{ExpirySummary, ExpiryWindow, ExportPayload};

/// Report endpoint, relative to the configured base URL.
pub(crate) const REPORT_PATH: &str = "/report/subscription-expiry";
/// Export endpoint.
pub(crate) const EXPORT_PATH: &str = "/report/subscription-expiry/export";

/// HTTP client for the expiry report backend.
#[derive(Debug, Clone)]
pub struct ReportClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReportClient {
    /// Create a client for the given backend base URL.
    ///
    /// The API key, when configured, is sent as an `x-api-key` header on
    /// every request.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, RenovaError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(key)
                    .map_err(|e| RenovaError::Config(format!("invalid API key header value: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RenovaError::Api {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body and parse the response body as JSON.
    ///
    /// Non-2xx responses become `Api` errors carrying the backend message
    /// when one can be extracted from the body.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RenovaError> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RenovaError::Api {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(%status, path, "report backend response received");

        let text = response.text().await.map_err(|e| RenovaError::Api {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(RenovaError::Api {
                message: backend_message(&text)
                    .unwrap_or_else(|| format!("backend returned {status}")),
                source: None,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            RenovaError::UnexpectedShape(format!("response body is not JSON: {e}"))
        })
    }

    /// Fetch one page of the expiry report.
    pub async fn fetch_report(&self, query: &ReportQuery) -> Result<ReportPage, RenovaError> {
        query.validate()?;
        debug!(page = query.page, limit = query.limit, "fetching expiry report");
        let body = self.post_json(REPORT_PATH, query).await?;
        normalize_report(body)
    }

    /// Fetch the dashboard widget feed: subscriptions inside one day window.
    pub async fn fetch_expiring_soon(
        &self,
        window: ExpiryWindow,
        page: u32,
        limit: u32,
    ) -> Result<ReportPage, RenovaError> {
        let query = ReportQuery {
            statuses: window.statuses().to_vec(),
            page,
            limit,
            ..ReportQuery::default()
        };
        self.fetch_report(&query).await
    }

    /// Fetch the dashboard summary counts.
    ///
    /// Issues three concurrent one-record queries, one per window, and
    /// reads the counts off the pagination envelopes; the backend already
    /// knows the totals, so no record payload is transferred beyond one
    /// row per window.
    pub async fn fetch_summary(&self) -> Result<ExpirySummary, RenovaError> {
        let count_query = |window: ExpiryWindow| ReportQuery {
            statuses: window.statuses().to_vec(),
            limit: 1,
            ..ReportQuery::default()
        };

        let week_query = count_query(ExpiryWindow::Days7);
        let half_month_query = count_query(ExpiryWindow::Days15);
        let month_query = count_query(ExpiryWindow::Days30);
        let (week, half_month, month) = futures::try_join!(
            self.fetch_report(&week_query),
            self.fetch_report(&half_month_query),
            self.fetch_report(&month_query),
        )?;

        let count = |page: &ReportPage| page.pagination.map_or(0, |p| p.total);
        Ok(ExpirySummary {
            expiring_7: count(&week),
            expiring_15: count(&half_month),
            expiring_30: count(&month),
        })
    }

    /// Export the filtered report as a spreadsheet.
    ///
    /// Returns the raw binary payload for the caller to write out. Export
    /// failures are transient: they never touch previously fetched report
    /// state.
    pub async fn export_report(
        &self,
        query: &ReportQuery,
        columns: &ColumnSelection,
    ) -> Result<bytes::Bytes, RenovaError> {
        if columns.is_empty() {
            return Err(RenovaError::InvalidArgument(
                "select at least one column to export".into(),
            ));
        }
        query.validate()?;

        let payload = ExportPayload::new(query, columns);
        let url = self.endpoint(EXPORT_PATH);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RenovaError::Export {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RenovaError::Export {
                message: backend_message(&text)
                    .unwrap_or_else(|| format!("backend returned {status}")),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| RenovaError::Export {
            message: format!("failed to read export payload: {e}"),
            source: Some(Box::new(e)),
        })?;
        if bytes.is_empty() {
            return Err(RenovaError::Export {
                message: "backend returned an empty export payload".into(),
                source: None,
            });
        }

        info!(bytes = bytes.len(), "export payload received");
        Ok(bytes)
    }
}

/// Pull a human-readable message out of an error body, if it is JSON with
/// a `meta.message` or top-level `message`.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/meta/message")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renova_core::ExpiryBucket;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ReportClient {
        ReportClient::new(base_url, Some("test-api-key"), Duration::from_secs(3)).unwrap()
    }

    fn report_body(total: u64) -> Value {
        json!({
            "meta": {"code": 200, "message": "OK"},
            "data": [{"_id": "sub-1", "name": "Asha", "expiresAt": "2026-09-04T00:00:00Z"}],
            "pagination": {"totalCount": total, "page": 1, "limit": 10, "pages": total.div_ceil(10)}
        })
    }

    #[tokio::test]
    async fn fetch_report_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REPORT_PATH))
            .and(header("x-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(report_body(23)))
            .mount(&server)
            .await;

        let page = test_client(&server.uri())
            .fetch_report(&ReportQuery::default())
            .await
            .unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.pagination.unwrap().total, 23);
    }

    #[tokio::test]
    async fn fetch_report_sends_wire_query_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REPORT_PATH))
            .and(body_partial_json(json!({
                "expiryStatus": ["EXPIRED", "EXPIRING_7"],
                "page": 2,
                "limit": 25
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(report_body(1)))
            .expect(1)
            .mount(&server)
            .await;

        let query = ReportQuery {
            statuses: vec![ExpiryBucket::Expired, ExpiryBucket::Expiring7],
            limit: 25,
            ..ReportQuery::default()
        }
        .with_page(2);
        test_client(&server.uri()).fetch_report(&query).await.unwrap();
    }

    #[tokio::test]
    async fn fetch_report_rejects_invalid_query_without_a_request() {
        let server = MockServer::start().await;
        // No mock mounted: a request would 404 and fail differently.
        let err = test_client(&server.uri())
            .fetch_report(&ReportQuery::default().with_page(0))
            .await
            .unwrap_err();
        assert!(matches!(err, RenovaError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn non_2xx_surfaces_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REPORT_PATH))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"meta": {"code": 500, "message": "boom"}})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .fetch_report(&ReportQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RenovaError::Api { ref message, .. } if message == "boom"));
    }

    #[tokio::test]
    async fn non_json_success_body_is_unexpected_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REPORT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .fetch_report(&ReportQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RenovaError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn summary_issues_three_window_queries() {
        let server = MockServer::start().await;

        let count_body = |total: u64| {
            json!({
                "meta": {"code": 200},
                "data": [],
                "pagination": {"totalCount": total, "page": 1, "limit": 1}
            })
        };
        for (statuses, total) in [
            (json!(["EXPIRED", "EXPIRING_7"]), 4u64),
            (json!(["EXPIRING_15"]), 7),
            (json!(["EXPIRING_30"]), 11),
        ] {
            Mock::given(method("POST"))
                .and(path(REPORT_PATH))
                .and(body_partial_json(json!({"expiryStatus": statuses, "limit": 1})))
                .respond_with(ResponseTemplate::new(200).set_body_json(count_body(total)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let summary = test_client(&server.uri()).fetch_summary().await.unwrap();
        assert_eq!(summary.expiring_7, 4);
        assert_eq!(summary.expiring_15, 7);
        assert_eq!(summary.expiring_30, 11);
    }

    #[tokio::test]
    async fn expiring_soon_merges_expired_into_the_week_window() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REPORT_PATH))
            .and(body_partial_json(json!({"expiryStatus": ["EXPIRED", "EXPIRING_7"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(report_body(2)))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server.uri())
            .fetch_expiring_soon(ExpiryWindow::Days7, 1, 10)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn export_returns_binary_payload() {
        let server = MockServer::start().await;
        let sheet = vec![0x50, 0x4b, 0x03, 0x04, 0x00]; // zip magic, as xlsx starts
        Mock::given(method("POST"))
            .and(path(EXPORT_PATH))
            .and(body_partial_json(json!({"exportArr": ["memberId", "name"]})))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(sheet.clone()))
            .mount(&server)
            .await;

        let columns = ColumnSelection::from_keys(["memberId", "name"]).unwrap();
        let bytes = test_client(&server.uri())
            .export_report(&ReportQuery::default(), &columns)
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), sheet.as_slice());
    }

    #[tokio::test]
    async fn export_rejects_empty_selection() {
        let server = MockServer::start().await;
        let err = test_client(&server.uri())
            .export_report(&ReportQuery::default(), &ColumnSelection::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, RenovaError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn export_failure_is_an_export_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EXPORT_PATH))
            .respond_with(
                ResponseTemplate::new(502).set_body_json(json!({"message": "gateway sad"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .export_report(&ReportQuery::default(), &ColumnSelection::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RenovaError::Export { ref message, .. } if message == "gateway sad"));
    }

    #[tokio::test]
    async fn empty_export_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(EXPORT_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .export_report(&ReportQuery::default(), &ColumnSelection::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RenovaError::Export { .. }));
    }
}
