//! End-to-end cleaning pipeline.
//!
//! [`run`] executes the transform stages in order — filter → priority sort → numeric
//! coercion → group/sum — over an already-resolved [`Table`], returning the final table
//! plus a [`CleanSummary`]. [`run_from_grid`] additionally resolves the header row of a
//! raw grid first. If any stage fails the run aborts immediately; no partial output is
//! produced.
//!
//! Progress and outcomes can be reported to a [`CleanObserver`] via [`CleanOptions`].
//!
//! ```rust
//! use excel_report_cleaner::clean::{FilterSpec, GroupSpec, SortKey};
//! use excel_report_cleaner::pipeline::{run, CleanOptions, CleanRequest};
//! use excel_report_cleaner::types::{Cell, Table};
//!
//! let table = Table::new(
//!     vec!["Tag".to_string(), "Site".to_string(), "Hours".to_string()],
//!     vec![
//!         vec![
//!             Cell::Text("8760".to_string()),
//!             Cell::Text("g1".to_string()),
//!             Cell::Text("10".to_string()),
//!         ],
//!         vec![
//!             Cell::Text("no".to_string()),
//!             Cell::Text("g1".to_string()),
//!             Cell::Text("5".to_string()),
//!         ],
//!     ],
//! );
//!
//! let mut filter = FilterSpec::default();
//! filter.contains.insert("Tag".to_string(), "8760".to_string());
//! let request = CleanRequest {
//!     filter,
//!     sort: vec![SortKey::new("Tag", "8760")],
//!     group: GroupSpec::new(vec!["Site".to_string()], "Hours"),
//! };
//!
//! let outcome = run(&table, &request, &CleanOptions::default())?;
//! assert_eq!(outcome.summary.filtered_rows, 1);
//! assert_eq!(outcome.summary.total_sum, 10.0);
//! # Ok::<(), excel_report_cleaner::CleanError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clean::{
    apply_filters, coerce_numeric, group_sum, priority_sort, resolve_header, table_from_grid,
    FilterSpec, GroupSpec, SortKey,
};
use crate::error::{CleanError, CleanResult};
use crate::types::{Cell, Table};

pub mod observability;

pub use observability::{
    CleanObserver, CompositeObserver, FileObserver, Severity, Stage, StageStats, StdErrObserver,
};

/// Everything the caller decided for one run: filters, sort keys, grouping.
///
/// Column references are resolved header names, not letters — see
/// [`crate::clean::columns`] for the letter-to-name step. The type derives serde traits
/// so a collaborator UI can hand the core a JSON request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRequest {
    /// Conjunctive string filters.
    #[serde(default)]
    pub filter: FilterSpec,
    /// Sort keys in priority order.
    #[serde(default)]
    pub sort: Vec<SortKey>,
    /// Grouping and summation parameters.
    pub group: GroupSpec,
}

/// Options controlling pipeline execution.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CleanOptions {
    /// Optional observer for stage progress, outcomes, and alerts.
    pub observer: Option<Arc<dyn CleanObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for CleanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Row-count summary of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CleanSummary {
    /// Rows entering the pipeline (after header resolution).
    pub input_rows: usize,
    /// Rows surviving the filter stage.
    pub filtered_rows: usize,
    /// Distinct group keys in the output.
    pub groups: usize,
    /// Cells of the sum column that were non-empty but failed numeric parsing.
    pub non_numeric: usize,
    /// Total of the output sum column across all groups.
    pub total_sum: f64,
}

/// Final aggregated table plus the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    /// The aggregated output table.
    pub table: Table,
    /// Diagnostic counters for the run.
    pub summary: CleanSummary,
}

/// Run the cleaning pipeline over an already-resolved table.
///
/// Stages execute synchronously in order; the first failure aborts the run and is
/// reported to the observer (if any) with a severity, firing `on_alert` when the
/// severity meets `options.alert_at_or_above`.
pub fn run(table: &Table, request: &CleanRequest, options: &CleanOptions) -> CleanResult<CleanOutcome> {
    match run_stages(table, request, options) {
        Ok(outcome) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(&outcome.summary);
            }
            Ok(outcome)
        }
        Err((stage, err)) => Err(report_failure(options, stage, err)),
    }
}

/// Resolve the header row of a raw grid, then run the cleaning pipeline.
///
/// The first not-entirely-empty grid row becomes the header; rows after it become the
/// input table. Fails with [`CleanError::NoHeaderFound`] on an empty grid.
pub fn run_from_grid(
    grid: &[Vec<Cell>],
    request: &CleanRequest,
    options: &CleanOptions,
) -> CleanResult<CleanOutcome> {
    let header = match resolve_header(grid) {
        Ok(header) => header,
        Err(err) => return Err(report_failure(options, Stage::Resolve, err)),
    };
    let table = table_from_grid(grid, &header);
    if let Some(obs) = options.observer.as_ref() {
        obs.on_stage(
            Stage::Resolve,
            StageStats {
                rows_in: grid.len(),
                rows_out: table.row_count(),
            },
        );
    }
    run(&table, request, options)
}

fn run_stages(
    table: &Table,
    request: &CleanRequest,
    options: &CleanOptions,
) -> Result<CleanOutcome, (Stage, CleanError)> {
    let obs = options.observer.as_deref();
    let input_rows = table.row_count();

    let filtered = apply_filters(table, &request.filter).map_err(|e| (Stage::Filter, e))?;
    notify(obs, Stage::Filter, input_rows, filtered.row_count());

    let sorted = priority_sort(&filtered, &request.sort).map_err(|e| (Stage::Sort, e))?;
    notify(obs, Stage::Sort, filtered.row_count(), sorted.row_count());

    let (coerced, non_numeric) =
        coerce_numeric(&sorted, &request.group.sum_column).map_err(|e| (Stage::Coerce, e))?;
    notify(obs, Stage::Coerce, sorted.row_count(), coerced.row_count());

    let grouped = group_sum(&coerced, &request.group).map_err(|e| (Stage::Group, e))?;
    notify(obs, Stage::Group, coerced.row_count(), grouped.row_count());

    let total_sum = match grouped.column_index(&request.group.sum_output_name()) {
        Some(idx) => grouped.rows.iter().filter_map(|r| r[idx].as_number()).sum(),
        None => 0.0,
    };

    Ok(CleanOutcome {
        summary: CleanSummary {
            input_rows,
            filtered_rows: filtered.row_count(),
            groups: grouped.row_count(),
            non_numeric,
            total_sum,
        },
        table: grouped,
    })
}

fn notify(obs: Option<&dyn CleanObserver>, stage: Stage, rows_in: usize, rows_out: usize) {
    if let Some(obs) = obs {
        obs.on_stage(stage, StageStats { rows_in, rows_out });
    }
}

fn report_failure(options: &CleanOptions, stage: Stage, err: CleanError) -> CleanError {
    if let Some(obs) = options.observer.as_ref() {
        let severity = severity_for_error(&err);
        obs.on_failure(stage, severity, &err);
        if severity >= options.alert_at_or_above {
            obs.on_alert(stage, severity, &err);
        }
    }
    err
}

fn severity_for_error(e: &CleanError) -> Severity {
    match e {
        CleanError::Io(_) => Severity::Critical,
        CleanError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        _ => Severity::Error,
    }
}
