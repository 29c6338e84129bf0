//! Numeric coercion for the sum column.

use crate::error::CleanResult;
use crate::types::{Cell, Table};

/// Convert every value of `column` to a numeric cell, counting the failures.
///
/// Cells parse with standard decimal syntax (surrounding whitespace, optional sign,
/// decimal point, exponent); non-finite results are rejected. A non-empty cell that fails
/// to parse counts as one non-numeric occurrence and becomes [`Cell::Empty`]; an
/// already-empty cell stays empty without being counted. Parsing itself never fails the
/// operation — only a missing column does
/// ([`crate::error::CleanError::ColumnNotFound`]).
pub fn coerce_numeric(table: &Table, column: &str) -> CleanResult<(Table, usize)> {
    let idx = table.require_column(column)?;

    let mut non_numeric = 0usize;
    let coerced = table.map_rows(|row| {
        let mut out = row.to_vec();
        out[idx] = match &row[idx] {
            Cell::Empty => Cell::Empty,
            Cell::Number(v) => Cell::Number(*v),
            Cell::Text(s) if s.is_empty() => Cell::Empty,
            Cell::Text(s) => match parse_number(s) {
                Some(v) => Cell::Number(v),
                None => {
                    non_numeric += 1;
                    Cell::Empty
                }
            },
        };
        out
    });

    Ok((coerced, non_numeric))
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
