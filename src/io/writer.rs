#![cfg(feature = "excel")]

//! Cleaned-table output: serialize a [`Table`] to a single-sheet workbook.
//!
//! Marked `no_run` because it expects a real workbook on disk:
//!
//! ```no_run
//! use excel_report_cleaner::clean::{FilterSpec, GroupSpec};
//! use excel_report_cleaner::io::{read_excel_grid_from_path, sheet_names, write_cleaned};
//! use excel_report_cleaner::pipeline::{run_from_grid, CleanOptions, CleanRequest};
//!
//! # fn main() -> Result<(), excel_report_cleaner::CleanError> {
//! let sheets = sheet_names("report.xlsx")?;
//! let grid = read_excel_grid_from_path("report.xlsx", sheets.first().map(|s| s.as_str()))?;
//!
//! let request = CleanRequest {
//!     filter: FilterSpec::default(),
//!     sort: vec![],
//!     group: GroupSpec::new(vec!["Site".to_string()], "Hours"),
//! };
//! let outcome = run_from_grid(&grid, &request, &CleanOptions::default())?;
//!
//! let path = write_cleaned(&outcome.table, "out".as_ref(), "Cleaned")?;
//! println!("wrote {} ({} groups)", path.display(), outcome.summary.groups);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::Workbook;

use crate::error::CleanResult;
use crate::types::{Cell, Table};

/// Write a table to a timestamped `.xlsx` in `out_dir` and return the written path.
///
/// The sheet holds one header row (column names) followed by one row per table row;
/// numeric cells are written as numbers, empty cells are left blank. `out_dir` is created
/// if missing. The workbook is fully flushed and closed by the time this returns, on
/// success and failure alike.
pub fn write_cleaned(table: &Table, out_dir: &Path, sheet_name: &str) -> CleanResult<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let out_path = out_dir.join(format!("Cleaned_Report_{ts}.xlsx"));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                Cell::Number(v) => {
                    worksheet.write_number(r, c, *v)?;
                }
            }
        }
    }

    workbook.save(&out_path)?;
    Ok(out_path)
}
