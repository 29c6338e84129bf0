//! Core table types for the cleaning pipeline.
//!
//! Raw spreadsheet input is a grid of text cells; after header resolution it becomes a
//! [`Table`]. Every pipeline stage consumes a `Table` and produces a fresh one — nothing
//! mutates a table in place, which keeps each stage independently testable against fixed
//! input/output fixtures.

use crate::error::{CleanError, CleanResult};

/// A single cell in a raw grid or a [`Table`].
///
/// Input arrives as text (or directly numeric from spreadsheet cells);
/// [`crate::clean::coerce_numeric`] introduces `Number` cells for the sum column.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing/empty cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Numeric cell.
    Number(f64),
}

impl Cell {
    /// Returns `true` for [`Cell::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Stringified cell value as used by filters and grouping. `None` for empty cells.
    ///
    /// Whole numbers render without a fractional part (`10`, not `10.0`), matching how
    /// spreadsheet UIs display them.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    Some((*v as i64).to_string())
                } else {
                    Some(v.to_string())
                }
            }
        }
    }

    /// Numeric value, if this is a [`Cell::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory table: ordered column names plus row-major cell storage.
///
/// Column names are unique within a table; every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table from column names and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row's length differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let expected_len = columns.len();
        for row in &rows {
            assert!(
                row.len() == expected_len,
                "row length {} does not match column count {}",
                row.len(),
                expected_len
            );
        }
        Self { columns, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`Table::column_index`], but fails with
    /// [`CleanError::ColumnNotFound`] for absent columns.
    pub fn require_column(&self, name: &str) -> CleanResult<usize> {
        self.column_index(name).ok_or_else(|| CleanError::ColumnNotFound {
            column: name.to_string(),
        })
    }

    /// Cell at `(row, column-name)`, if both exist. Mostly a test convenience.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original columns and row order.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Create a new table by applying `mapper` to every row.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the column count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Cell]) -> Vec<Cell>,
    {
        let expected_len = self.columns.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match column count {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}
