//! The row-transformation stages.
//!
//! Stages operate on [`crate::types::Table`] values and compose left to right: column
//! resolution → filter → priority sort → numeric coercion → group/sum. Each stage is a
//! pure function of its input table and parameters and returns a fresh table.
//!
//! - [`columns`]: letter designators → header names
//! - [`filter`]: conjunctive case-insensitive substring / exact-value filters
//! - [`sort`]: stable multi-key priority sort
//! - [`coerce`]: numeric coercion of the sum column, with a non-numeric count
//! - [`group`]: group-by summarization with passthrough columns
//!
//! ## Example: filter → sort → coerce → group
//!
//! ```rust
//! use excel_report_cleaner::clean::{
//!     apply_filters, coerce_numeric, group_sum, priority_sort, FilterSpec, GroupSpec, SortKey,
//! };
//! use excel_report_cleaner::types::{Cell, Table};
//!
//! let table = Table::new(
//!     vec!["Tag".to_string(), "Site".to_string(), "Hours".to_string()],
//!     vec![
//!         vec![
//!             Cell::Text("8760_a".to_string()),
//!             Cell::Text("g1".to_string()),
//!             Cell::Text("10".to_string()),
//!         ],
//!         vec![
//!             Cell::Text("other".to_string()),
//!             Cell::Text("g1".to_string()),
//!             Cell::Text("5".to_string()),
//!         ],
//!         vec![
//!             Cell::Text("8760_b".to_string()),
//!             Cell::Text("g1".to_string()),
//!             Cell::Text("2.5".to_string()),
//!         ],
//!     ],
//! );
//!
//! let mut filter = FilterSpec::default();
//! filter.contains.insert("Tag".to_string(), "8760".to_string());
//! let filtered = apply_filters(&table, &filter)?;
//!
//! let sorted = priority_sort(&filtered, &[SortKey::new("Tag", "8760")])?;
//! let (coerced, non_numeric) = coerce_numeric(&sorted, "Hours")?;
//! assert_eq!(non_numeric, 0);
//!
//! let out = group_sum(&coerced, &GroupSpec::new(vec!["Site".to_string()], "Hours"))?;
//! assert_eq!(out.row_count(), 1);
//! assert_eq!(out.cell(0, "Sum_Hours"), Some(&Cell::Number(12.5)));
//! # Ok::<(), excel_report_cleaner::CleanError>(())
//! ```

pub mod coerce;
pub mod columns;
pub mod filter;
pub mod group;
pub mod sort;

pub use coerce::coerce_numeric;
pub use columns::{
    letter_to_index, map_letters, resolve_header, table_from_grid, validate_required,
    ColumnMapping, HeaderRow,
};
pub use filter::{apply_filters, FilterSpec};
pub use group::{group_sum, GroupSpec};
pub use sort::{priority_sort, SortKey};
