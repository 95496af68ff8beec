//! `sheet-summary` reads an uploaded `.xlsx` workbook and computes numeric summaries for the
//! columns a caller asks for.
//!
//! The crate is the pure core of a "summarize my spreadsheet" endpoint: the web layer extracts
//! the uploaded bytes and the requested column names, calls [`engine::summarize_upload`] (or
//! [`ingestion::parse`] + [`processing::summarize`] directly), and maps the result or
//! [`EngineError`] to a response. No state is kept between calls.
//!
//! ## What gets computed
//!
//! For every requested column found in the header row, a [`processing::ColumnSummary`]:
//!
//! - `sum`, `mean`, `min`, `max` over the cells that coerce to numbers
//! - `numeric_count`, and `non_numeric_count` for text/bool/date/error/empty cells
//!
//! A column with no numeric cells has `sum = 0` and no `mean`/`min`/`max`.
//!
//! Requested names that are not in the header are listed in
//! [`processing::SummaryResult::missing_columns`]; the call only fails
//! ([`EngineError::NoValidColumns`]) if *none* of a non-empty request is found. An empty request
//! summarizes every column.
//!
//! ## Quick example
//!
//! ```no_run
//! use sheet_summary::ingestion::parse;
//! use sheet_summary::processing::summarize;
//! use sheet_summary::types::ColumnRequest;
//!
//! # fn main() -> Result<(), sheet_summary::EngineError> {
//! let bytes = std::fs::read("upload.xlsx").unwrap();
//! let doc = parse(&bytes)?;
//! let result = summarize(&doc, &ColumnRequest::new(["A", "Z"]))?;
//! println!("missing={:?}", result.missing_columns);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`EngineError`]. [`EngineError::kind`] classifies it as a parse failure or
//! an unusable request (both client errors) or an internal failure, and
//! [`EngineError::to_json_body`] renders a client-facing body.
//!
//! ## Modules
//!
//! - [`ingestion`]: `.xlsx` parsing, numeric coercion, observer hooks
//! - [`processing`]: per-column reduction and summary assembly
//! - [`engine`]: the unified parse + summarize entrypoint and its options
//! - [`types`]: document, cell, and request types
//! - [`error`]: the crate error type

pub mod engine;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use engine::{summarize_upload, SummaryOptions};
pub use error::{EngineError, EngineResult, ErrorKind};
