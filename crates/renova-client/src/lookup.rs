// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup endpoints backing the filter pickers: plans, countries, states,
//! and cities.
//!
//! State and city lookups require a parent-id constraint; without one the
//! option list is defined as empty and no request is made, so the full
//! location hierarchy is never queried unconstrained.

use renova_core::{LocationId, RenovaError};
use serde_json::{json, Value};
use tracing::debug;

use crate::client::ReportClient;
use crate::types::{LookupEntry, LookupOption, LookupRequest};

pub(crate) const PLAN_FILTER_PATH: &str = "/master/plan/filter";
pub(crate) const COUNTRY_FILTER_PATH: &str = "/master/country/filter";
pub(crate) const STATE_FILTER_PATH: &str = "/master/state/filter";
pub(crate) const CITY_FILTER_PATH: &str = "/master/city/filter";

/// Backend status code for active plans.
const PLAN_STATUS_ACTIVE: u32 = 10;

/// The free plan is never offered as a filter choice.
const FREE_PLAN_ID: &str = "PLAN0";

impl ReportClient {
    /// Fetch the selectable paid plans, optionally narrowed by search text.
    pub async fn fetch_plans(&self, search: Option<&str>) -> Result<Vec<LookupOption>, RenovaError> {
        let request = LookupRequest::new(json!({"status": PLAN_STATUS_ACTIVE}), search);
        let entries = self.fetch_lookup(PLAN_FILTER_PATH, &request).await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.plan_id.as_deref() != Some(FREE_PLAN_ID))
            .map(LookupOption::from)
            .collect())
    }

    /// Fetch selectable countries.
    pub async fn fetch_countries(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<LookupOption>, RenovaError> {
        let request = LookupRequest::new(json!({}), search);
        let entries = self.fetch_lookup(COUNTRY_FILTER_PATH, &request).await?;
        Ok(entries.into_iter().map(LookupOption::from).collect())
    }

    /// Fetch states within the selected countries.
    ///
    /// With no countries selected the result is empty without a request.
    pub async fn fetch_states(
        &self,
        countries: &[LocationId],
        search: Option<&str>,
    ) -> Result<Vec<LookupOption>, RenovaError> {
        if countries.is_empty() {
            debug!("state lookup skipped: no country selected");
            return Ok(Vec::new());
        }
        let request = LookupRequest::new(json!({"country": countries}), search);
        let entries = self.fetch_lookup(STATE_FILTER_PATH, &request).await?;
        Ok(entries.into_iter().map(LookupOption::from).collect())
    }

    /// Fetch cities within the selected states.
    ///
    /// With no states selected the result is empty without a request.
    pub async fn fetch_cities(
        &self,
        states: &[LocationId],
        search: Option<&str>,
    ) -> Result<Vec<LookupOption>, RenovaError> {
        if states.is_empty() {
            debug!("city lookup skipped: no state selected");
            return Ok(Vec::new());
        }
        let request = LookupRequest::new(json!({"state": states}), search);
        let entries = self.fetch_lookup(CITY_FILTER_PATH, &request).await?;
        Ok(entries.into_iter().map(LookupOption::from).collect())
    }

    /// POST a lookup filter and unwrap the `meta.code == 200` envelope.
    async fn fetch_lookup(
        &self,
        path: &str,
        request: &LookupRequest,
    ) -> Result<Vec<LookupEntry>, RenovaError> {
        let body = self.post_json(path, request).await?;

        let code = body.pointer("/meta/code").and_then(Value::as_i64);
        match code {
            Some(200) => {}
            Some(other) => {
                return Err(RenovaError::Api {
                    message: body
                        .pointer("/meta/message")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                        .unwrap_or_else(|| format!("lookup returned code {other}")),
                    source: None,
                });
            }
            None => {
                return Err(RenovaError::UnexpectedShape(
                    "lookup response has no meta block".into(),
                ));
            }
        }

        match body.get("data") {
            Some(data) => serde_json::from_value(data.clone()).map_err(|e| {
                RenovaError::UnexpectedShape(format!("malformed lookup data: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }
}
