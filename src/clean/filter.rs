//! Conjunctive string filters over a [`Table`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CleanResult;
use crate::types::{Cell, Table};

/// Per-column string filter conditions. All present conditions are ANDed, across columns
/// and across the two condition kinds.
///
/// Entries with an empty substring or an empty allowed-value list are inert: they match
/// everything and their column is not even required to exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring per column.
    #[serde(default)]
    pub contains: BTreeMap<String, String>,
    /// Exact allowed values per column.
    #[serde(default)]
    pub equals: BTreeMap<String, Vec<String>>,
}

impl FilterSpec {
    /// Returns `true` if no entry carries an active condition.
    pub fn is_inert(&self) -> bool {
        self.contains.values().all(|s| s.is_empty())
            && self.equals.values().all(|v| v.is_empty())
    }
}

/// Keep only rows satisfying every active condition in `spec`.
///
/// Row order is preserved; the output is always a subset of the input. Empty cells never
/// match either condition kind. An inert spec returns a clone of the input. Fails with
/// [`crate::error::CleanError::ColumnNotFound`] if a column carrying an active condition
/// is absent from the table.
pub fn apply_filters(table: &Table, spec: &FilterSpec) -> CleanResult<Table> {
    let mut contains: Vec<(usize, String)> = Vec::new();
    for (column, needle) in &spec.contains {
        if needle.is_empty() {
            continue;
        }
        contains.push((table.require_column(column)?, needle.to_lowercase()));
    }

    let mut equals: Vec<(usize, &[String])> = Vec::new();
    for (column, allowed) in &spec.equals {
        if allowed.is_empty() {
            continue;
        }
        equals.push((table.require_column(column)?, allowed.as_slice()));
    }

    if contains.is_empty() && equals.is_empty() {
        return Ok(table.clone());
    }

    Ok(table.filter_rows(|row| {
        let contains_ok = contains.iter().all(|(idx, needle)| {
            row[*idx]
                .display_text()
                .is_some_and(|s| s.to_lowercase().contains(needle.as_str()))
        });
        let equals_ok = equals.iter().all(|(idx, allowed)| {
            row[*idx]
                .display_text()
                .is_some_and(|v| allowed.contains(&v))
        });
        contains_ok && equals_ok
    }))
}
