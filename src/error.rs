use thiserror::Error;

/// Convenience result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Error type shared across the cleaning pipeline and its I/O boundary.
///
/// Every stage fails fast and synchronously; callers are expected to halt the run without
/// writing any output. Non-numeric values in the sum column are *not* an error — they are
/// reported as a diagnostic count by [`crate::clean::coerce_numeric`].
#[derive(Debug, Error)]
pub enum CleanError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "excel")]
    /// Workbook write error (feature-gated behind `excel`).
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// The workbook contains no sheets to read.
    #[error("workbook has no sheets")]
    EmptyWorkbook,

    /// A column letter contains a character outside `A`–`Z`.
    #[error("invalid column letter: '{letter}'")]
    InvalidColumnLetter { letter: String },

    /// No row in the raw grid has any content, so no header row exists.
    #[error("no non-empty header row found")]
    NoHeaderFound,

    /// One or more mandatory letters did not resolve to a header name.
    #[error("missing required columns: {}", .letters.join(", "))]
    MissingRequiredColumn { letters: Vec<String> },

    /// A filter, sort, coercion, or grouping operation referenced a column that is absent
    /// from the table.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },
}
