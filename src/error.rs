use serde_json::json;
use thiserror::Error;

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Coarse classification of an [`EngineError`], used by callers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The uploaded bytes could not be read as a table.
    Parse,
    /// A non-empty column request matched none of the header columns.
    NoValidColumns,
    /// Anything else; not caused by the caller's input.
    Internal,
}

impl ErrorKind {
    /// Returns `true` for kinds caused by the caller's input.
    pub fn is_client_error(self) -> bool {
        matches!(self, Self::Parse | Self::NoValidColumns)
    }

    /// HTTP status code hint for this kind (400 for client errors, 500 otherwise).
    pub fn status_code(self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

/// Error type returned by parsing and summarizing.
///
/// This is a single error enum shared across the crate.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The bytes are not a readable `.xlsx` workbook (corrupt file, wrong format, bad sheet xml).
    #[error("unable to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// The workbook contains no worksheet to read.
    #[error("workbook has no sheets")]
    NoSheets,

    /// The sheet has no usable header row.
    #[error("no header row found: {message}")]
    NoHeader { message: String },

    /// None of the requested columns exist in the header.
    #[error("none of the requested columns were found. requested={requested:?} available={available:?}")]
    NoValidColumns {
        requested: Vec<String>,
        available: Vec<String>,
    },
}

impl EngineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Workbook(calamine::XlsxError::Io(_)) => ErrorKind::Internal,
            Self::Workbook(_) | Self::NoSheets | Self::NoHeader { .. } => ErrorKind::Parse,
            Self::NoValidColumns { .. } => ErrorKind::NoValidColumns,
        }
    }

    /// Render a client-facing JSON body for this error.
    ///
    /// Always contains `detail`; [`EngineError::NoValidColumns`] additionally lists
    /// `requested_columns` and `available_columns` so the caller can correct the request.
    pub fn to_json_body(&self) -> serde_json::Value {
        match self {
            Self::NoValidColumns {
                requested,
                available,
            } => json!({
                "detail": "None of the requested columns were found in the sheet.",
                "requested_columns": requested,
                "available_columns": available,
            }),
            Self::Workbook(_) | Self::NoSheets => json!({
                "detail": "Unable to read Excel file. Make sure it is a valid .xlsx file.",
            }),
            Self::NoHeader { .. } => json!({ "detail": self.to_string() }),
        }
    }
}
