//! Group-by summarization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CleanResult;
use crate::types::{Cell, Table};

/// Grouping parameters: key columns, the numeric column to sum, and passthrough columns
/// whose first non-empty value is carried into each group's output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Ordered key columns. Rows group by the tuple of their trimmed string values.
    pub key_columns: Vec<String>,
    /// Column whose values are summed per group.
    pub sum_column: String,
    /// Output name for the summed column. Defaults to `Sum_<sum_column>` so the aggregate
    /// stays distinguishable from the raw input column.
    #[serde(default)]
    pub sum_output: Option<String>,
    /// Non-aggregated columns retained as the first non-empty value per group.
    #[serde(default)]
    pub passthrough: Vec<String>,
}

impl GroupSpec {
    /// Grouping over `key_columns` summing `sum_column`, with no passthrough columns.
    pub fn new(key_columns: Vec<String>, sum_column: impl Into<String>) -> Self {
        Self {
            key_columns,
            sum_column: sum_column.into(),
            sum_output: None,
            passthrough: Vec::new(),
        }
    }

    /// Resolved output name of the summed column.
    pub fn sum_output_name(&self) -> String {
        self.sum_output
            .clone()
            .unwrap_or_else(|| format!("Sum_{}", self.sum_column))
    }
}

struct Group {
    key: Vec<Option<String>>,
    passthrough: Vec<Cell>,
    sum: f64,
}

/// Collapse a table to one row per distinct group key.
///
/// Grouping equality is on the tuple of *trimmed* string values of the key columns; a
/// missing value is a valid, distinct key component, never a reason to drop the row.
/// Output rows appear in the order their group key is first encountered, carrying the key
/// values (trimmed), the first non-empty passthrough values (in this table's row order),
/// and the per-group sum with missing values contributing zero. Key and passthrough lists
/// de-duplicate on resolved column name; passthrough entries repeating a key column are
/// dropped. Fails with [`crate::error::CleanError::ColumnNotFound`] if any referenced
/// column is absent.
pub fn group_sum(table: &Table, spec: &GroupSpec) -> CleanResult<Table> {
    let mut key_columns: Vec<&str> = Vec::with_capacity(spec.key_columns.len());
    let mut key_idxs: Vec<usize> = Vec::with_capacity(spec.key_columns.len());
    for name in &spec.key_columns {
        let idx = table.require_column(name)?;
        if key_columns.contains(&name.as_str()) {
            continue;
        }
        key_columns.push(name);
        key_idxs.push(idx);
    }

    let sum_idx = table.require_column(&spec.sum_column)?;

    let mut passthrough: Vec<(usize, &str)> = Vec::with_capacity(spec.passthrough.len());
    for name in &spec.passthrough {
        let idx = table.require_column(name)?;
        if key_columns.contains(&name.as_str()) {
            continue;
        }
        if passthrough.iter().any(|(_, n)| *n == name.as_str()) {
            continue;
        }
        passthrough.push((idx, name));
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<Vec<Option<String>>, usize> = HashMap::new();

    for row in &table.rows {
        let key: Vec<Option<String>> = key_idxs
            .iter()
            .map(|&i| row[i].display_text().map(|s| s.trim().to_string()))
            .collect();

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                index.insert(key.clone(), slot);
                groups.push(Group {
                    key,
                    passthrough: vec![Cell::Empty; passthrough.len()],
                    sum: 0.0,
                });
                slot
            }
        };

        let group = &mut groups[slot];
        if let Some(v) = row[sum_idx].as_number() {
            group.sum += v;
        }
        for (out_idx, (col_idx, _)) in passthrough.iter().enumerate() {
            if group.passthrough[out_idx].is_empty() && !row[*col_idx].is_empty() {
                group.passthrough[out_idx] = row[*col_idx].clone();
            }
        }
    }

    let mut columns: Vec<String> = key_columns.iter().map(|c| c.to_string()).collect();
    columns.extend(passthrough.iter().map(|(_, n)| n.to_string()));
    columns.push(spec.sum_output_name());

    let rows = groups
        .into_iter()
        .map(|g| {
            let mut row: Vec<Cell> = g
                .key
                .into_iter()
                .map(|k| match k {
                    Some(s) => Cell::Text(s),
                    None => Cell::Empty,
                })
                .collect();
            row.extend(g.passthrough);
            row.push(Cell::Number(g.sum));
            row
        })
        .collect();

    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::{group_sum, GroupSpec};
    use crate::error::CleanError;
    use crate::types::{Cell, Table};

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn spec(keys: &[&str], sum: &str, passthrough: &[&str]) -> GroupSpec {
        GroupSpec {
            key_columns: keys.iter().map(|s| s.to_string()).collect(),
            sum_column: sum.to_string(),
            sum_output: None,
            passthrough: passthrough.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample_table() -> Table {
        Table::new(
            vec![
                "Site".to_string(),
                "Shift".to_string(),
                "Tag".to_string(),
                "Hours".to_string(),
            ],
            vec![
                vec![text(" g1 "), text("h1"), Cell::Empty, Cell::Number(10.0)],
                vec![text("g1"), text("h1"), text("late"), Cell::Number(2.5)],
                vec![text("g2"), text("h2"), text("early"), Cell::Empty],
                vec![text("g2"), text("h2"), text("ignored"), Cell::Number(3.0)],
            ],
        )
    }

    #[test]
    fn groups_on_trimmed_keys_in_first_encounter_order() {
        let out = group_sum(&sample_table(), &spec(&["Site", "Shift"], "Hours", &["Tag"])).unwrap();
        assert_eq!(
            out.columns,
            vec![
                "Site".to_string(),
                "Shift".to_string(),
                "Tag".to_string(),
                "Sum_Hours".to_string()
            ]
        );
        assert_eq!(out.row_count(), 2);
        // " g1 " and "g1" collapse into one trimmed key.
        assert_eq!(out.rows[0][0], text("g1"));
        assert_eq!(out.rows[0][3], Cell::Number(12.5));
        assert_eq!(out.rows[1][0], text("g2"));
        assert_eq!(out.rows[1][3], Cell::Number(3.0));
    }

    #[test]
    fn passthrough_keeps_first_non_empty_value_in_row_order() {
        let out = group_sum(&sample_table(), &spec(&["Site"], "Hours", &["Tag"])).unwrap();
        // g1: first Tag is empty, so the second row's value wins.
        assert_eq!(out.rows[0][1], text("late"));
        // g2: the first non-empty value wins even though a later one exists.
        assert_eq!(out.rows[1][1], text("early"));
    }

    #[test]
    fn missing_key_values_form_a_distinct_group() {
        let t = Table::new(
            vec!["Site".to_string(), "Hours".to_string()],
            vec![
                vec![text("g1"), Cell::Number(1.0)],
                vec![Cell::Empty, Cell::Number(2.0)],
                vec![text(""), Cell::Number(4.0)],
                vec![Cell::Empty, Cell::Number(8.0)],
            ],
        );
        let out = group_sum(&t, &spec(&["Site"], "Hours", &[])).unwrap();
        // "g1", missing, and empty-string are three distinct keys.
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.rows[1][0], Cell::Empty);
        assert_eq!(out.rows[1][1], Cell::Number(10.0));
        assert_eq!(out.rows[2][0], text(""));
        assert_eq!(out.rows[2][1], Cell::Number(4.0));
    }

    #[test]
    fn output_sum_equals_input_sum_with_missing_as_zero() {
        let t = sample_table();
        let out = group_sum(&t, &spec(&["Site", "Shift"], "Hours", &[])).unwrap();
        let sum_idx = out.column_index("Sum_Hours").unwrap();
        let total: f64 = out.rows.iter().filter_map(|r| r[sum_idx].as_number()).sum();
        let input_total: f64 = t
            .rows
            .iter()
            .filter_map(|r| r[3].as_number())
            .sum();
        assert_eq!(total, input_total);
    }

    #[test]
    fn sum_output_name_is_overridable() {
        let mut s = spec(&["Site"], "Hours", &[]);
        s.sum_output = Some("TotalHours".to_string());
        let out = group_sum(&sample_table(), &s).unwrap();
        assert!(out.column_index("TotalHours").is_some());
        assert!(out.column_index("Sum_Hours").is_none());
    }

    #[test]
    fn duplicate_and_overlapping_column_references_deduplicate() {
        let s = spec(&["Site", "Site"], "Hours", &["Site", "Tag", "Tag"]);
        let out = group_sum(&sample_table(), &s).unwrap();
        assert_eq!(
            out.columns,
            vec!["Site".to_string(), "Tag".to_string(), "Sum_Hours".to_string()]
        );
    }

    #[test]
    fn missing_columns_fail() {
        let t = sample_table();
        for s in [
            spec(&["NoSuch"], "Hours", &[]),
            spec(&["Site"], "NoSuch", &[]),
            spec(&["Site"], "Hours", &["NoSuch"]),
        ] {
            let err = group_sum(&t, &s).unwrap_err();
            assert!(matches!(err, CleanError::ColumnNotFound { .. }));
        }
    }
}
