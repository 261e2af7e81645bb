// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cascading country → state → city filter selection.
//!
//! States are only meaningful in the context of the selected countries, and
//! cities in the context of the selected states. Changing an upstream
//! selection clears everything downstream, so a submitted selection is
//! always referentially consistent: selected states imply selected
//! countries, selected cities imply selected states.

use serde::{Deserialize, Serialize};

use crate::error::RenovaError;
use crate::types::LocationId;

/// The three id sets a report query carries for location filtering.
///
/// Serializes to the backend's `country`/`state`/`city` keys; empty sets
/// are omitted from the wire payload (empty means "no constraint").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    #[serde(rename = "country", default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<LocationId>,
    #[serde(rename = "state", default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<LocationId>,
    #[serde(rename = "city", default, skip_serializing_if = "Vec::is_empty")]
    pub cities: Vec<LocationId>,
}

impl LocationSelection {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.states.is_empty() && self.cities.is_empty()
    }
}

/// Which level of the hierarchy currently gates downstream selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationLevel {
    /// Nothing selected; state and city pickers are inert.
    NoCountry,
    /// At least one country selected; states may be loaded and picked.
    CountrySelected,
    /// At least one state selected; cities may be loaded and picked.
    StateSelected,
}

/// State machine enforcing the cascade invariants on a [`LocationSelection`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadingLocationFilter {
    selection: LocationSelection,
}

impl CascadingLocationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the country selection.
    ///
    /// Any change to countries invalidates downstream context, so the state
    /// and city selections are cleared whether `ids` is empty or not.
    pub fn select_countries(&mut self, ids: Vec<LocationId>) {
        self.selection.countries = ids;
        self.selection.states.clear();
        self.selection.cities.clear();
    }

    /// Replace the state selection.
    ///
    /// Clears the city selection. A non-empty selection is only valid once
    /// at least one country is selected; the UI-equivalent control is
    /// disabled until then, so a non-empty request without countries is a
    /// caller bug and fails fast.
    pub fn select_states(&mut self, ids: Vec<LocationId>) -> Result<(), RenovaError> {
        if !ids.is_empty() && self.selection.countries.is_empty() {
            return Err(RenovaError::InvalidArgument(
                "cannot select states before selecting a country".into(),
            ));
        }
        self.selection.states = ids;
        self.selection.cities.clear();
        Ok(())
    }

    /// Replace the city selection. Does not affect countries or states.
    pub fn select_cities(&mut self, ids: Vec<LocationId>) -> Result<(), RenovaError> {
        if !ids.is_empty() && self.selection.states.is_empty() {
            return Err(RenovaError::InvalidArgument(
                "cannot select cities before selecting a state".into(),
            ));
        }
        self.selection.cities = ids;
        Ok(())
    }

    /// Clear the whole selection.
    pub fn clear(&mut self) {
        self.selection = LocationSelection::default();
    }

    pub fn level(&self) -> LocationLevel {
        if !self.selection.states.is_empty() {
            LocationLevel::StateSelected
        } else if !self.selection.countries.is_empty() {
            LocationLevel::CountrySelected
        } else {
            LocationLevel::NoCountry
        }
    }

    /// State options may only be fetched with a country context; without one
    /// the option list is defined as empty rather than an unconstrained
    /// query against the full hierarchy.
    pub fn can_load_states(&self) -> bool {
        !self.selection.countries.is_empty()
    }

    /// City options may only be fetched with a state context.
    pub fn can_load_cities(&self) -> bool {
        !self.selection.states.is_empty()
    }

    pub fn selection(&self) -> &LocationSelection {
        &self.selection
    }

    /// Consume the filter, yielding the selection for a report query.
    pub fn into_selection(self) -> LocationSelection {
        self.selection
    }
}
