use thiserror::Error;

/// Validation failures are user-correctable: the caller reports them and
/// lets the user fix the source file and resubmit. Row numbers are
/// zero-based data-row indices (the header row is not counted).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Every missing required column, reported together.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A monetary cell that does not parse as a number.
    #[error("column '{column}', row {row}: value is not a number")]
    InvalidNumber { column: String, row: usize },

    /// A required field that is null or empty (strict schemas only).
    #[error("row {row}: field '{column}' is empty")]
    NullField { row: usize, column: String },

    #[error("row {row}: quantity must be a positive number")]
    InvalidQuantity { row: usize },

    #[error("row {row}: price must be a positive number")]
    InvalidPrice { row: usize },

    #[error("row {row}: email address must contain '@'")]
    InvalidEmail { row: usize },
}

/// Top-level error for document generation. Validation errors pass
/// through untouched so callers can match on the kind.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unexpected failure while composing a page. Carries the group key
    /// so the failing invoice can be reproduced.
    #[error("failed to render invoice '{group}': {detail}")]
    Rendering { group: String, detail: String },

    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
