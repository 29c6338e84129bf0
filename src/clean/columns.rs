//! Letter-addressed column resolution.
//!
//! Spreadsheet users point at columns positionally ("column A", "column U"); the cleaning
//! stages work on header names. This module locates the header row in a raw grid, maps
//! letters to the headers at their positions, and validates that mandatory letters
//! resolved to something.

use std::collections::BTreeMap;

use crate::error::{CleanError, CleanResult};
use crate::types::{Cell, Table};

/// Mapping from column letter to resolved header name.
///
/// `None` means the letter's position is outside the header row or the header cell there
/// is empty.
pub type ColumnMapping = BTreeMap<String, Option<String>>;

/// Convert a spreadsheet column letter (`A`, `D`, `AA`, ...) to a zero-based column index.
///
/// The letter string is read as a base-26 numeral (`A`=1 … `Z`=26, `AA`=27, ...).
/// Lowercase letters are accepted. Fails with [`CleanError::InvalidColumnLetter`] if the
/// string is empty or contains any character outside `A`–`Z`.
pub fn letter_to_index(letter: &str) -> CleanResult<usize> {
    if letter.is_empty() {
        return Err(CleanError::InvalidColumnLetter {
            letter: letter.to_string(),
        });
    }

    let mut idx: usize = 0;
    for c in letter.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return Err(CleanError::InvalidColumnLetter {
                letter: letter.to_string(),
            });
        }
        idx = idx * 26 + (c as usize - 'A' as usize + 1);
    }
    Ok(idx - 1)
}

/// Header row located by [`resolve_header`]: its position in the raw grid plus the
/// normalized header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// Zero-based index of the header row within the raw grid.
    pub row_index: usize,
    /// Normalized header names, one per grid column. Empty string = empty header cell.
    pub names: Vec<String>,
}

/// Scan a raw grid for the first row that is not entirely empty and treat it as the
/// header row.
///
/// Header names are trimmed and internal whitespace runs collapse to a single space.
/// The scan is lazy: it stops at the first match. Fails with
/// [`CleanError::NoHeaderFound`] if every row is empty.
pub fn resolve_header(grid: &[Vec<Cell>]) -> CleanResult<HeaderRow> {
    for (row_index, row) in grid.iter().enumerate() {
        if row.iter().any(|c| !c.is_empty()) {
            let names = row.iter().map(normalize_header).collect();
            return Ok(HeaderRow { row_index, names });
        }
    }
    Err(CleanError::NoHeaderFound)
}

fn normalize_header(cell: &Cell) -> String {
    match cell.display_text() {
        Some(s) => s.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    }
}

/// Map each requested letter to the header name at its position.
///
/// Letters whose index falls outside the header row, or whose header cell is empty, map
/// to `None` rather than erroring; only malformed letters fail
/// ([`CleanError::InvalidColumnLetter`]).
pub fn map_letters(headers: &[String], letters: &[&str]) -> CleanResult<ColumnMapping> {
    let mut mapping = ColumnMapping::new();
    for &letter in letters {
        let idx = letter_to_index(letter)?;
        let name = headers.get(idx).filter(|h| !h.is_empty()).cloned();
        mapping.insert(letter.to_string(), name);
    }
    Ok(mapping)
}

/// Check that every required letter resolved to a header name.
///
/// Fails with [`CleanError::MissingRequiredColumn`] listing *all* unmapped required
/// letters, not just the first.
pub fn validate_required(mapping: &ColumnMapping, required: &[&str]) -> CleanResult<()> {
    let letters: Vec<String> = required
        .iter()
        .filter(|l| !matches!(mapping.get(**l), Some(Some(_))))
        .map(|l| l.to_string())
        .collect();

    if letters.is_empty() {
        Ok(())
    } else {
        Err(CleanError::MissingRequiredColumn { letters })
    }
}

/// Build a [`Table`] from a raw grid and its resolved header row.
///
/// Data rows are the grid rows after the header. Empty header cells get positional
/// `col_<i>` names; a duplicate header name gets a positional suffix, so column names
/// stay unique and later references de-duplicate on the resolved name.
pub fn table_from_grid(grid: &[Vec<Cell>], header: &HeaderRow) -> Table {
    let mut columns: Vec<String> = Vec::with_capacity(header.names.len());
    for (i, name) in header.names.iter().enumerate() {
        let mut name = if name.is_empty() {
            format!("col_{i}")
        } else {
            name.clone()
        };
        if columns.contains(&name) {
            name = format!("{name}_{i}");
        }
        columns.push(name);
    }

    let width = columns.len();
    let rows = grid[header.row_index + 1..]
        .iter()
        .map(|row| {
            let mut out: Vec<Cell> = row.iter().take(width).cloned().collect();
            out.resize(width, Cell::Empty);
            out
        })
        .collect();

    Table::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::{letter_to_index, map_letters, resolve_header, table_from_grid, validate_required};
    use crate::error::CleanError;
    use crate::types::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn letter_to_index_base26() {
        assert_eq!(letter_to_index("A").unwrap(), 0);
        assert_eq!(letter_to_index("Z").unwrap(), 25);
        assert_eq!(letter_to_index("AA").unwrap(), 26);
        assert_eq!(letter_to_index("U").unwrap(), 20);
        // lowercase accepted
        assert_eq!(letter_to_index("d").unwrap(), 3);
    }

    #[test]
    fn letter_to_index_rejects_non_alphabetic() {
        for bad in ["1", "A1", "", "A B"] {
            let err = letter_to_index(bad).unwrap_err();
            assert!(matches!(err, CleanError::InvalidColumnLetter { .. }), "{bad}");
        }
    }

    #[test]
    fn resolve_header_skips_leading_empty_rows_and_normalizes() {
        let grid = vec![
            vec![Cell::Empty, Cell::Empty],
            vec![text("  Site  Name "), text("Hours")],
            vec![text("north"), text("10")],
        ];
        let header = resolve_header(&grid).unwrap();
        assert_eq!(header.row_index, 1);
        assert_eq!(header.names, vec!["Site Name".to_string(), "Hours".to_string()]);
    }

    #[test]
    fn resolve_header_fails_on_all_empty_grid() {
        let grid = vec![vec![Cell::Empty], vec![Cell::Empty]];
        assert!(matches!(
            resolve_header(&grid).unwrap_err(),
            CleanError::NoHeaderFound
        ));
    }

    #[test]
    fn map_letters_out_of_range_is_unmapped_not_an_error() {
        let headers = vec!["Site".to_string(), String::new(), "Hours".to_string()];
        let mapping = map_letters(&headers, &["A", "B", "C", "Z"]).unwrap();
        assert_eq!(mapping["A"].as_deref(), Some("Site"));
        assert_eq!(mapping["B"], None); // empty header cell
        assert_eq!(mapping["C"].as_deref(), Some("Hours"));
        assert_eq!(mapping["Z"], None); // beyond header length
    }

    #[test]
    fn validate_required_lists_every_missing_letter() {
        let headers = vec!["Site".to_string()];
        let mapping = map_letters(&headers, &["A", "I", "N", "U"]).unwrap();
        assert!(validate_required(&mapping, &["A"]).is_ok());

        let err = validate_required(&mapping, &["I", "N", "U"]).unwrap_err();
        match err {
            CleanError::MissingRequiredColumn { letters } => {
                assert_eq!(letters, vec!["I".to_string(), "N".to_string(), "U".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn table_from_grid_pads_short_rows_and_names_empty_headers() {
        let grid = vec![
            vec![text("Site"), Cell::Empty, text("Site")],
            vec![text("north"), text("x")],
            vec![text("south"), text("y"), text("z"), text("overflow")],
        ];
        let header = resolve_header(&grid).unwrap();
        let table = table_from_grid(&grid, &header);
        assert_eq!(
            table.columns,
            vec!["Site".to_string(), "col_1".to_string(), "Site_2".to_string()]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][2], Cell::Empty); // padded
        assert_eq!(table.rows[1].len(), 3); // overflow cell dropped
    }
}
