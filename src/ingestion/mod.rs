//! Turning uploaded bytes into a [`crate::types::TabularDocument`].
//!
//! - [`xlsx`]: workbook reading and header-row location
//! - [`coerce`]: per-cell numeric coercion
//! - [`observability`]: observer hooks reported by [`crate::engine::summarize_upload`]

pub mod coerce;
pub mod observability;
pub mod xlsx;

pub use coerce::NumberCoercion;
pub use observability::{
    CompositeObserver, Severity, SummaryContext, SummaryObserver, SummaryStats, TracingObserver,
};
pub use xlsx::{parse, parse_with_options, HeaderRow, ParseOptions};
