//! Column summaries over a parsed [`crate::types::TabularDocument`].
//!
//! - [`summarize()`]: requested columns → [`SummaryResult`]
//! - [`reduce()`]: the single-pass numeric fold behind each [`ColumnSummary`]
//!
//! ## Example
//!
//! ```rust
//! use sheet_summary::processing::summarize;
//! use sheet_summary::types::{Cell, Column, ColumnRequest, TabularDocument};
//!
//! let doc = TabularDocument::new(vec![Column::new(
//!     "A",
//!     vec![Cell::Numeric(10.0), Cell::Numeric(20.0), Cell::from("x"), Cell::Numeric(30.0)],
//! )]);
//!
//! let result = summarize(&doc, &ColumnRequest::new(["A", "Z"])).unwrap();
//! let a = result.get("A").unwrap();
//! assert_eq!(a.sum, 60.0);
//! assert_eq!(a.mean, Some(20.0));
//! assert_eq!(a.non_numeric_count, 1);
//! assert_eq!(result.missing_columns, vec!["Z".to_string()]);
//! ```

pub mod reduce;
pub mod summary;

pub use reduce::{reduce, NumericAccumulator};
pub use summary::{
    summarize, summarize_with_options, ColumnSummary, HeaderMatch, SummarizeOptions, SummaryResult,
};
