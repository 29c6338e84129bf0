#![cfg(feature = "excel")]

//! Workbook input: list sheets and read one sheet into a raw text grid.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{CleanError, CleanResult};
use crate::types::Cell;

/// List the sheet names of a workbook, in workbook order.
///
/// Lets a caller offer sheet selection before reading anything.
pub fn sheet_names(path: impl AsRef<Path>) -> CleanResult<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Read one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, ...) into a raw grid of cells.
///
/// Picks `sheet` if provided, otherwise the first sheet. The grid is padded on the left
/// to column `A` so letter designators keep their spreadsheet positions even when the
/// sheet's used range starts further right. Empty cells and empty strings map to
/// [`Cell::Empty`]; no header handling happens here — see
/// [`crate::clean::columns::resolve_header`].
pub fn read_excel_grid_from_path(
    path: impl AsRef<Path>,
    sheet: Option<&str>,
) -> CleanResult<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(CleanError::EmptyWorkbook)?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut grid: Vec<Vec<Cell>> = Vec::with_capacity(range.height());
    for row in range.rows() {
        let mut cells: Vec<Cell> = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(data_to_cell));
        grid.push(cells);
    }
    Ok(grid)
}

fn data_to_cell(c: &Data) -> Cell {
    match c {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}
