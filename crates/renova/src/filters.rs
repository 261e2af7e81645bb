// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared filter flags for the `report` and `export` subcommands.
//!
//! The location flags go through the cascading filter so the CLI enforces
//! the same country → state → city gating as the query model: states
//! without a country (or cities without a state) are rejected up front.

use chrono::NaiveDate;
use clap::Args;
use renova_core::{
    CascadingLocationFilter, ExpiryBucket, LocationId, PlanId, RenovaError, ReportQuery,
};

/// Filter flags common to report browsing and export.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Inclusive lower bound on the expiry date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Inclusive upper bound on the expiry date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Expiry buckets, comma-separated (EXPIRED, EXPIRING_7, EXPIRING_15,
    /// EXPIRING_30, NOT_EXPIRING_SOON).
    #[arg(long = "status", value_delimiter = ',')]
    pub statuses: Vec<ExpiryBucket>,

    /// Plan ids, comma-separated.
    #[arg(long = "plan", value_delimiter = ',')]
    pub plans: Vec<String>,

    /// Country ids, comma-separated.
    #[arg(long = "country", value_delimiter = ',')]
    pub countries: Vec<String>,

    /// State ids, comma-separated. Requires --country.
    #[arg(long = "state", value_delimiter = ',')]
    pub states: Vec<String>,

    /// City ids, comma-separated. Requires --state.
    #[arg(long = "city", value_delimiter = ',')]
    pub cities: Vec<String>,

    /// Free-text search over name, email, and member id.
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build a validated report query for the given page and page size.
    pub fn into_query(self, page: u32, limit: u32) -> Result<ReportQuery, RenovaError> {
        let mut location = CascadingLocationFilter::new();
        location.select_countries(to_ids(self.countries));
        location.select_states(to_ids(self.states))?;
        location.select_cities(to_ids(self.cities))?;

        let query = ReportQuery {
            from: self.from,
            to: self.to,
            statuses: self.statuses,
            plans: self.plans.into_iter().map(PlanId).collect(),
            location: location.into_selection(),
            search: self.search.filter(|s| !s.trim().is_empty()),
            page,
            limit,
        };
        query.validate()?;
        Ok(query)
    }
}

fn to_ids(values: Vec<String>) -> Vec<LocationId> {
    values.into_iter().map(LocationId).collect()
}
