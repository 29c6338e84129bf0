//! Stable multi-key priority sort.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CleanResult;
use crate::types::{Cell, Table};

/// One sort key.
///
/// Rows whose `column` value contains `priority` (case-insensitively) sort ahead of rows
/// that do not, regardless of direction; within each partition natural cell order applies
/// under `ascending`. Keys listed first take precedence; ties fall through to later keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    /// Resolved header name of the column to sort on.
    pub column: String,
    /// Boost substring. An empty string disables the boost, degrading this key to a plain
    /// natural sort — it does not mean "match everything".
    #[serde(default)]
    pub priority: String,
    /// Natural-order direction within each match partition.
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl SortKey {
    /// Ascending key with a boost substring.
    pub fn new(column: impl Into<String>, priority: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            priority: priority.into(),
            ascending: true,
        }
    }

    /// Flip the direction to descending.
    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }
}

struct ResolvedKey {
    idx: usize,
    ascending: bool,
}

/// Sort a table by `keys` in a single stable pass.
///
/// All keys feed one composite comparison per row pair — (match-flag, natural value) per
/// key, in key order — so ties at an earlier key are broken by later keys and full ties
/// preserve original row order. Sorting key-by-key in separate passes would not give the
/// same cross-key guarantees. Fails with
/// [`crate::error::CleanError::ColumnNotFound`] if any key references an absent column.
pub fn priority_sort(table: &Table, keys: &[SortKey]) -> CleanResult<Table> {
    if keys.is_empty() {
        return Ok(table.clone());
    }

    let mut resolved: Vec<ResolvedKey> = Vec::with_capacity(keys.len());
    for key in keys {
        resolved.push(ResolvedKey {
            idx: table.require_column(&key.column)?,
            ascending: key.ascending,
        });
    }

    // Precompute boost flags so the comparator stays allocation-free.
    let matches: Vec<Vec<bool>> = keys
        .iter()
        .zip(resolved.iter())
        .map(|(key, rk)| {
            if key.priority.is_empty() {
                return vec![false; table.rows.len()];
            }
            let needle = key.priority.to_lowercase();
            table
                .rows
                .iter()
                .map(|row| {
                    row[rk.idx]
                        .display_text()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
                })
                .collect()
        })
        .collect();

    let mut order: Vec<usize> = (0..table.rows.len()).collect();
    order.sort_by(|&a, &b| {
        for (k, key) in resolved.iter().enumerate() {
            // Boosted rows first, independent of direction.
            match (matches[k][a], matches[k][b]) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
            let ord = compare_cells(&table.rows[a][key.idx], &table.rows[b][key.idx], key.ascending);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        // Full tie: stable sort keeps input order.
        Ordering::Equal
    });

    let rows = order.iter().map(|&i| table.rows[i].clone()).collect();
    Ok(Table::new(table.columns.clone(), rows))
}

/// Natural cell order under one key. Empty cells sort last in both directions; numbers
/// order numerically and ahead of text; text compares lexicographically.
fn compare_cells(a: &Cell, b: &Cell, ascending: bool) -> Ordering {
    let ord = match (a, b) {
        (Cell::Empty, Cell::Empty) => return Ordering::Equal,
        (Cell::Empty, _) => return Ordering::Greater,
        (_, Cell::Empty) => return Ordering::Less,
        (Cell::Number(x), Cell::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Cell::Number(_), Cell::Text(_)) => Ordering::Less,
        (Cell::Text(_), Cell::Number(_)) => Ordering::Greater,
        (Cell::Text(x), Cell::Text(y)) => x.cmp(y),
    };
    if ascending { ord } else { ord.reverse() }
}
