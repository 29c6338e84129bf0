//! `excel-report-cleaner` is a small library for cleaning tabular spreadsheet reports in
//! memory: it resolves logical columns from positional letter designators, applies
//! conjunctive string filters, runs a stable multi-key "priority" sort, coerces a
//! designated column to numeric, and collapses rows into summary groups.
//!
//! Data flows strictly left to right, each stage a pure transform of the previous
//! stage's [`types::Table`]:
//!
//! raw grid → resolved columns → filtered rows → sorted rows → coerced rows → groups
//!
//! The primary entrypoint is [`pipeline::run`] (or [`pipeline::run_from_grid`] when
//! starting from an unresolved grid); each stage is also callable on its own from
//! [`clean`].
//!
//! ## Quick example
//!
//! ```rust
//! use excel_report_cleaner::clean::{FilterSpec, GroupSpec, SortKey};
//! use excel_report_cleaner::pipeline::{run_from_grid, CleanOptions, CleanRequest};
//! use excel_report_cleaner::types::Cell;
//!
//! // A raw grid, header row included, as a workbook or CSV reader would produce it.
//! let text = |s: &str| Cell::Text(s.to_string());
//! let grid = vec![
//!     vec![text("Tag"), text("Site"), text("Hours")],
//!     vec![text("8760_sample"), text("g1"), text("10")],
//!     vec![text("other"), text("g1"), text("5")],
//!     vec![text("8760"), text("g2"), text("3")],
//! ];
//!
//! let mut filter = FilterSpec::default();
//! filter.contains.insert("Tag".to_string(), "8760".to_string());
//!
//! let request = CleanRequest {
//!     filter,
//!     sort: vec![SortKey::new("Tag", "8760")],
//!     group: GroupSpec::new(vec!["Site".to_string()], "Hours"),
//! };
//!
//! let outcome = run_from_grid(&grid, &request, &CleanOptions::default())?;
//! assert_eq!(outcome.summary.groups, 2);
//! assert_eq!(outcome.summary.total_sum, 13.0);
//! # Ok::<(), excel_report_cleaner::CleanError>(())
//! ```
//!
//! ## Letters vs. names
//!
//! Callers address columns by spreadsheet letter (`A`, `D`, `AA`, ...); the transform
//! stages work on header names. [`clean::columns`] bridges the two:
//!
//! ```rust
//! use excel_report_cleaner::clean::{letter_to_index, map_letters, validate_required};
//!
//! assert_eq!(letter_to_index("A")?, 0);
//! assert_eq!(letter_to_index("AA")?, 26);
//!
//! let headers = vec!["Tag".to_string(), "Site".to_string()];
//! let mapping = map_letters(&headers, &["A", "B", "Z"])?;
//! assert_eq!(mapping["A"].as_deref(), Some("Tag"));
//! assert_eq!(mapping["Z"], None); // out of range: unmapped, not an error
//!
//! validate_required(&mapping, &["A", "B"])?;
//! # Ok::<(), excel_report_cleaner::CleanError>(())
//! ```
//!
//! ## Modules
//!
//! - [`clean`]: the transform stages (column resolution, filter, sort, coerce, group)
//! - [`pipeline`]: end-to-end orchestration, run summaries, and observability hooks
//! - [`io`]: raw grid input (CSV, and workbooks behind the `excel` feature) and
//!   cleaned-workbook output
//! - [`types`]: cell + table types
//! - [`error`]: error types used across the crate
//!
//! ## I/O
//!
//! With the default `excel` feature, [`io::excel::read_excel_grid_from_path`] reads one
//! sheet into a raw grid (with [`io::excel::sheet_names`] for sheet selection) and
//! [`io::writer::write_cleaned`] persists the final table as a timestamped single-sheet
//! `.xlsx`, returning the written path; see the `io::writer` docs for a full
//! read-clean-write example. [`io::csv`] provides the same raw-grid boundary for
//! delimited files without any optional feature.

pub mod clean;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod types;

pub use error::{CleanError, CleanResult};
