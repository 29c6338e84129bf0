//! The I/O boundary: raw grids in, cleaned workbook out.
//!
//! Input readers produce a raw grid (`Vec<Vec<Cell>>`) with no header handling — header
//! discovery belongs to [`crate::clean::columns::resolve_header`]. The writer serializes
//! a finished [`crate::types::Table`] to a single-sheet workbook.
//!
//! - [`csv`]: headerless raw grid from delimited files
//! - [`excel`]: sheet listing and raw grid from workbook files (feature `excel`)
//! - [`writer`]: timestamped `.xlsx` output (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
#[cfg(feature = "excel")]
pub mod writer;

pub use csv::{read_csv_grid_from_path, read_csv_grid_from_reader};
#[cfg(feature = "excel")]
pub use excel::{read_excel_grid_from_path, sheet_names};
#[cfg(feature = "excel")]
pub use writer::write_cleaned;
