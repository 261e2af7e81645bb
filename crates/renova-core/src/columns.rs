// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Export column catalog and selection.
//!
//! The export endpoint takes an ordered list of column keys drawn from a
//! fixed catalog of profile, subscription, and location fields. Selection
//! order follows catalog order so exports are deterministic regardless of
//! the order keys were toggled in.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::RenovaError;

/// Category an export column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ColumnGroup {
    Profile,
    Subscription,
    Location,
}

impl ColumnGroup {
    /// Human-readable heading for the group.
    pub fn title(self) -> &'static str {
        match self {
            ColumnGroup::Profile => "Profile Information",
            ColumnGroup::Subscription => "Subscription Details",
            ColumnGroup::Location => "Location Information",
        }
    }
}

/// One exportable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportColumn {
    /// Wire key sent to the export endpoint.
    pub key: &'static str,
    pub label: &'static str,
    pub group: ColumnGroup,
}

/// The fixed export column catalog, in export order.
pub const CATALOG: &[ExportColumn] = &[
    ExportColumn { key: "memberId", label: "Member ID", group: ColumnGroup::Profile },
    ExportColumn { key: "name", label: "Name", group: ColumnGroup::Profile },
    ExportColumn { key: "email", label: "Email", group: ColumnGroup::Profile },
    ExportColumn { key: "phone", label: "Phone", group: ColumnGroup::Profile },
    ExportColumn { key: "planName", label: "Plan Name", group: ColumnGroup::Subscription },
    ExportColumn { key: "planPrice", label: "Plan Price", group: ColumnGroup::Subscription },
    ExportColumn { key: "startAt", label: "Subscription Start", group: ColumnGroup::Subscription },
    ExportColumn { key: "expiresAt", label: "Expiry Date", group: ColumnGroup::Subscription },
    ExportColumn { key: "daysRemaining", label: "Days Remaining", group: ColumnGroup::Subscription },
    ExportColumn { key: "expiryStatus", label: "Expiry Status", group: ColumnGroup::Subscription },
    ExportColumn { key: "branch", label: "Branch", group: ColumnGroup::Location },
    ExportColumn { key: "country", label: "Country", group: ColumnGroup::Location },
    ExportColumn { key: "state", label: "State", group: ColumnGroup::Location },
    ExportColumn { key: "city", label: "City", group: ColumnGroup::Location },
];

/// Columns pre-selected when the export dialog opens.
const DEFAULT_KEYS: &[&str] = &[
    "memberId",
    "name",
    "email",
    "phone",
    "planName",
    "expiresAt",
    "daysRemaining",
    "expiryStatus",
];

fn catalog_index(key: &str) -> Option<usize> {
    CATALOG.iter().position(|c| c.key == key)
}

/// An ordered, duplicate-free set of selected export columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    // Catalog indices, kept sorted.
    selected: Vec<usize>,
}

impl Default for ColumnSelection {
    /// The default export selection.
    fn default() -> Self {
        let selected = DEFAULT_KEYS
            .iter()
            .filter_map(|key| catalog_index(key))
            .collect();
        Self { selected }
    }
}

impl ColumnSelection {
    /// An empty selection.
    pub fn empty() -> Self {
        Self {
            selected: Vec::new(),
        }
    }

    /// Build a selection from explicit keys; unknown keys fail fast.
    pub fn from_keys<'a, I>(keys: I) -> Result<Self, RenovaError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selection = Self::empty();
        for key in keys {
            let idx = catalog_index(key).ok_or_else(|| {
                RenovaError::InvalidArgument(format!("unknown export column `{key}`"))
            })?;
            if !selection.selected.contains(&idx) {
                selection.selected.push(idx);
            }
        }
        selection.selected.sort_unstable();
        Ok(selection)
    }

    /// Toggle one column in or out of the selection.
    pub fn toggle(&mut self, key: &str) -> Result<(), RenovaError> {
        let idx = catalog_index(key)
            .ok_or_else(|| RenovaError::InvalidArgument(format!("unknown export column `{key}`")))?;
        match self.selected.iter().position(|&i| i == idx) {
            Some(pos) => {
                self.selected.remove(pos);
            }
            None => {
                self.selected.push(idx);
                self.selected.sort_unstable();
            }
        }
        Ok(())
    }

    /// Select every catalog column.
    pub fn select_all(&mut self) {
        self.selected = (0..CATALOG.len()).collect();
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Toggle a whole group: select all of it unless it is already fully
    /// selected, in which case deselect all of it.
    pub fn toggle_group(&mut self, group: ColumnGroup) {
        if self.is_group_selected(group) {
            self.selected
                .retain(|&i| CATALOG[i].group != group);
        } else {
            for (i, column) in CATALOG.iter().enumerate() {
                if column.group == group && !self.selected.contains(&i) {
                    self.selected.push(i);
                }
            }
            self.selected.sort_unstable();
        }
    }

    /// True when every column of `group` is selected.
    pub fn is_group_selected(&self, group: ColumnGroup) -> bool {
        CATALOG
            .iter()
            .enumerate()
            .filter(|(_, c)| c.group == group)
            .all(|(i, _)| self.selected.contains(&i))
    }

    pub fn contains(&self, key: &str) -> bool {
        catalog_index(key).is_some_and(|idx| self.selected.contains(&idx))
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected wire keys in catalog order, as the export payload expects.
    pub fn keys(&self) -> Vec<&'static str> {
        self.selected.iter().map(|&i| CATALOG[i].key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn default_selection_matches_dialog_defaults() {
        let sel = ColumnSelection::default();
        assert_eq!(sel.len(), 8);
        assert!(sel.contains("memberId"));
        assert!(sel.contains("expiryStatus"));
        assert!(!sel.contains("planPrice"));
        assert!(!sel.contains("city"));
    }

    #[test]
    fn keys_come_out_in_catalog_order() {
        let sel = ColumnSelection::from_keys(["city", "name", "memberId"]).unwrap();
        assert_eq!(sel.keys(), vec!["memberId", "name", "city"]);
    }

    #[test]
    fn unknown_key_fails_fast() {
        assert!(matches!(
            ColumnSelection::from_keys(["name", "nope"]),
            Err(RenovaError::InvalidArgument(_))
        ));
        let mut sel = ColumnSelection::empty();
        assert!(sel.toggle("nope").is_err());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = ColumnSelection::empty();
        sel.toggle("email").unwrap();
        assert!(sel.contains("email"));
        sel.toggle("email").unwrap();
        assert!(!sel.contains("email"));
    }

    #[test]
    fn select_all_and_clear() {
        let mut sel = ColumnSelection::empty();
        sel.select_all();
        assert_eq!(sel.len(), CATALOG.len());
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn group_toggle_selects_then_deselects() {
        let mut sel = ColumnSelection::empty();
        sel.toggle_group(ColumnGroup::Location);
        assert!(sel.is_group_selected(ColumnGroup::Location));
        assert_eq!(sel.keys(), vec!["branch", "country", "state", "city"]);

        sel.toggle("name").unwrap();
        sel.toggle_group(ColumnGroup::Location);
        assert!(!sel.is_group_selected(ColumnGroup::Location));
        assert_eq!(sel.keys(), vec!["name"]);
    }

    #[test]
    fn partial_group_toggle_completes_the_group() {
        let mut sel = ColumnSelection::empty();
        sel.toggle("country").unwrap();
        assert!(!sel.is_group_selected(ColumnGroup::Location));
        sel.toggle_group(ColumnGroup::Location);
        assert!(sel.is_group_selected(ColumnGroup::Location));
    }
}
