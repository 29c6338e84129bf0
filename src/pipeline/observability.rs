use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::CleanError;

use super::CleanSummary;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the run failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// The pipeline stage an observer callback refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Header resolution over the raw grid.
    Resolve,
    /// Conjunctive string filtering.
    Filter,
    /// Stable priority sort.
    Sort,
    /// Numeric coercion of the sum column.
    Coerce,
    /// Group-by summarization.
    Group,
}

/// Row counts around one completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    /// Rows entering the stage.
    pub rows_in: usize,
    /// Rows leaving the stage.
    pub rows_out: usize,
}

/// Observer interface for pipeline progress and outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait CleanObserver: Send + Sync {
    /// Called after each stage completes.
    fn on_stage(&self, _stage: Stage, _stats: StageStats) {}

    /// Called when the whole run succeeds.
    fn on_success(&self, _summary: &CleanSummary) {}

    /// Called when a stage fails and the run aborts.
    fn on_failure(&self, _stage: Stage, _severity: Severity, _error: &CleanError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, stage: Stage, severity: Severity, error: &CleanError) {
        self.on_failure(stage, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CleanObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn CleanObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl CleanObserver for CompositeObserver {
    fn on_stage(&self, stage: Stage, stats: StageStats) {
        for o in &self.observers {
            o.on_stage(stage, stats);
        }
    }

    fn on_success(&self, summary: &CleanSummary) {
        for o in &self.observers {
            o.on_success(summary);
        }
    }

    fn on_failure(&self, stage: Stage, severity: Severity, error: &CleanError) {
        for o in &self.observers {
            o.on_failure(stage, severity, error);
        }
    }

    fn on_alert(&self, stage: Stage, severity: Severity, error: &CleanError) {
        for o in &self.observers {
            o.on_alert(stage, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl CleanObserver for StdErrObserver {
    fn on_stage(&self, stage: Stage, stats: StageStats) {
        eprintln!(
            "[clean][stage] {:?} rows_in={} rows_out={}",
            stage, stats.rows_in, stats.rows_out
        );
    }

    fn on_success(&self, summary: &CleanSummary) {
        eprintln!(
            "[clean][ok] input_rows={} filtered_rows={} groups={} non_numeric={} total_sum={}",
            summary.input_rows,
            summary.filtered_rows,
            summary.groups,
            summary.non_numeric,
            summary.total_sum
        );
    }

    fn on_failure(&self, stage: Stage, severity: Severity, error: &CleanError) {
        eprintln!("[clean][{severity:?}] stage={stage:?} err={error}");
    }

    fn on_alert(&self, stage: Stage, severity: Severity, error: &CleanError) {
        eprintln!("[ALERT][clean][{severity:?}] stage={stage:?} err={error}");
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl CleanObserver for FileObserver {
    fn on_stage(&self, stage: Stage, stats: StageStats) {
        self.append_line(&format!(
            "{} stage {:?} rows_in={} rows_out={}",
            unix_ts(),
            stage,
            stats.rows_in,
            stats.rows_out
        ));
    }

    fn on_success(&self, summary: &CleanSummary) {
        self.append_line(&format!(
            "{} ok input_rows={} filtered_rows={} groups={} non_numeric={} total_sum={}",
            unix_ts(),
            summary.input_rows,
            summary.filtered_rows,
            summary.groups,
            summary.non_numeric,
            summary.total_sum
        ));
    }

    fn on_failure(&self, stage: Stage, severity: Severity, error: &CleanError) {
        self.append_line(&format!(
            "{} fail severity={:?} stage={:?} err={}",
            unix_ts(),
            severity,
            stage,
            error
        ));
    }

    fn on_alert(&self, stage: Stage, severity: Severity, error: &CleanError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} stage={:?} err={}",
            unix_ts(),
            severity,
            stage,
            error
        ));
    }
}

fn unix_ts() -> i64 {
    chrono::Utc::now().timestamp()
}
