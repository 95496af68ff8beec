//! Unified entrypoint: uploaded bytes + requested columns → [`SummaryResult`].
//!
//! Most callers (an HTTP handler, typically) should use [`summarize_upload`], which parses the
//! upload, summarizes the request, and reports the outcome to an optional
//! [`SummaryObserver`].

use std::fmt;
use std::sync::Arc;

use crate::error::EngineResult;
use crate::ingestion::observability::severity_for_error;
use crate::ingestion::{
    parse_with_options, HeaderRow, NumberCoercion, ParseOptions, Severity, SummaryContext,
    SummaryObserver, SummaryStats,
};
use crate::processing::{summarize_with_options, HeaderMatch, SummarizeOptions, SummaryResult};
use crate::types::ColumnRequest;

/// Options controlling [`summarize_upload`].
///
/// Use [`Default`] for the strict behavior (first non-empty row is the header, exact
/// case-sensitive column names, plain numbers only, no rounding), or
/// [`SummaryOptions::lenient`] for tolerant matching of hand-edited workbooks.
#[derive(Clone)]
pub struct SummaryOptions {
    pub parse: ParseOptions,
    pub summarize: SummarizeOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn SummaryObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl SummaryOptions {
    /// Tolerant preset:
    ///
    /// - the header is detected within the first 5 rows using the requested names
    /// - names match trimmed and case-insensitively
    /// - currency symbols, thousands separators and decimal commas are accepted
    /// - results are rounded to 2 decimal places
    pub fn lenient() -> Self {
        Self {
            parse: ParseOptions {
                header_row: HeaderRow::Detect {
                    candidates: Vec::new(),
                    search_rows: 5,
                },
                coercion: NumberCoercion::Lenient,
            },
            summarize: SummarizeOptions {
                header_match: HeaderMatch::Normalized,
                round_to: Some(2),
            },
            ..Default::default()
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SummaryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            summarize: SummarizeOptions::default(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

impl fmt::Debug for SummaryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryOptions")
            .field("parse", &self.parse)
            .field("summarize", &self.summarize)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Parse `bytes` and summarize `request`.
///
/// If `options.parse.header_row` is [`HeaderRow::Detect`] with no candidates, the requested
/// names are used as candidates.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use sheet_summary::engine::{summarize_upload, SummaryOptions};
/// use sheet_summary::ingestion::{SummaryContext, TracingObserver};
/// use sheet_summary::types::ColumnRequest;
///
/// # fn main() -> Result<(), sheet_summary::EngineError> {
/// let bytes = std::fs::read("report.xlsx").unwrap();
/// let request = ColumnRequest::new(["CURRENT USD", "CURRENT CAD"]);
/// let opts = SummaryOptions::lenient().with_observer(Arc::new(TracingObserver));
///
/// let ctx = SummaryContext {
///     file_name: Some("report.xlsx".to_string()),
///     requested_columns: request.len(),
/// };
/// let result = summarize_upload(&bytes, &request, &opts, &ctx)?;
/// for (column, summary) in &result.summaries {
///     println!("{column}: sum={} mean={:?}", summary.sum, summary.mean);
/// }
/// # Ok(())
/// # }
/// ```
pub fn summarize_upload(
    bytes: &[u8],
    request: &ColumnRequest,
    options: &SummaryOptions,
    ctx: &SummaryContext,
) -> EngineResult<SummaryResult> {
    let parse_options = resolve_parse_options(&options.parse, request);

    let result = parse_with_options(bytes, &parse_options).and_then(|doc| {
        summarize_with_options(&doc, request, &options.summarize).map(|summary| (doc.row_count(), summary))
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((rows, summary)) => obs.on_success(
                ctx,
                SummaryStats {
                    rows: *rows,
                    summarized_columns: summary.summaries.len(),
                    missing_columns: summary.missing_columns.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }

    result.map(|(_, summary)| summary)
}

fn resolve_parse_options(parse: &ParseOptions, request: &ColumnRequest) -> ParseOptions {
    match &parse.header_row {
        HeaderRow::Detect {
            candidates,
            search_rows,
        } if candidates.is_empty() => ParseOptions {
            header_row: HeaderRow::Detect {
                candidates: request.names().to_vec(),
                search_rows: *search_rows,
            },
            coercion: parse.coercion,
        },
        _ => parse.clone(),
    }
}
