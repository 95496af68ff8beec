//! Per-column summaries for a [`TabularDocument`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::ingestion::xlsx::normalize;
use crate::types::{Column, ColumnRequest, TabularDocument};

use super::reduce::reduce;

/// How requested names are compared against header names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Exact, case-sensitive string equality (default).
    #[default]
    Exact,
    /// Compare trimmed, lower-cased names.
    Normalized,
}

const MAX_ROUND_PLACES: u32 = 15;

/// Options controlling [`summarize_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummarizeOptions {
    pub header_match: HeaderMatch,
    /// Round sum/mean/min/max to this many decimal places. `None` keeps full precision.
    pub round_to: Option<u32>,
}

/// Aggregate statistics for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub sum: f64,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub numeric_count: usize,
    /// Non-numeric plus empty cells.
    pub non_numeric_count: usize,
}

impl ColumnSummary {
    /// Summarize every cell of `column`.
    pub fn from_column(column: &Column) -> Self {
        let acc = reduce(&column.cells);
        Self {
            sum: acc.sum,
            mean: acc.mean(),
            min: acc.min,
            max: acc.max,
            numeric_count: acc.numeric,
            non_numeric_count: acc.non_numeric,
        }
    }

    fn rounded(self, places: u32) -> Self {
        // f64 carries ~15 significant digits; more places cannot change the value.
        let factor = 10f64.powi(places.min(MAX_ROUND_PLACES) as i32);
        let round = |v: f64| {
            let scaled = v * factor;
            if scaled.is_finite() {
                scaled.round() / factor
            } else {
                v
            }
        };
        Self {
            sum: round(self.sum),
            mean: self.mean.map(round),
            min: self.min.map(round),
            max: self.max.map(round),
            ..self
        }
    }
}

/// Result of [`summarize`]: computed summaries plus requested names that were not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryResult {
    /// Summaries keyed by column name as requested.
    pub summaries: BTreeMap<String, ColumnSummary>,
    /// Requested names absent from the header, in request order without duplicates.
    pub missing_columns: Vec<String>,
}

impl SummaryResult {
    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.summaries.get(column)
    }

    /// `true` when every requested column was found.
    pub fn is_complete(&self) -> bool {
        self.missing_columns.is_empty()
    }
}

/// Summarize `request` against `document` with default options.
///
/// - An empty request summarizes every header column.
/// - Unknown names are reported in [`SummaryResult::missing_columns`].
/// - Fails with [`EngineError::NoValidColumns`] only when a non-empty request matches nothing.
pub fn summarize(document: &TabularDocument, request: &ColumnRequest) -> EngineResult<SummaryResult> {
    summarize_with_options(document, request, &SummarizeOptions::default())
}

/// Summarize `request` against `document`.
pub fn summarize_with_options(
    document: &TabularDocument,
    request: &ColumnRequest,
    options: &SummarizeOptions,
) -> EngineResult<SummaryResult> {
    let mut result = SummaryResult::default();

    if request.is_empty() {
        for column in document.columns() {
            result
                .summaries
                .insert(column.name.clone(), finish(ColumnSummary::from_column(column), options));
        }
        return Ok(result);
    }

    for name in request.names() {
        if result.summaries.contains_key(name) || result.missing_columns.contains(name) {
            continue;
        }
        match find_column(document, name, options.header_match) {
            Some(column) => {
                result
                    .summaries
                    .insert(name.clone(), finish(ColumnSummary::from_column(column), options));
            }
            None => result.missing_columns.push(name.clone()),
        }
    }

    if result.summaries.is_empty() {
        return Err(EngineError::NoValidColumns {
            requested: request.names().to_vec(),
            available: document.column_names().map(str::to_string).collect(),
        });
    }

    Ok(result)
}

fn finish(summary: ColumnSummary, options: &SummarizeOptions) -> ColumnSummary {
    match options.round_to {
        Some(places) => summary.rounded(places),
        None => summary,
    }
}

fn find_column<'a>(document: &'a TabularDocument, name: &str, mode: HeaderMatch) -> Option<&'a Column> {
    match mode {
        HeaderMatch::Exact => document.column(name),
        HeaderMatch::Normalized => {
            let wanted = normalize(name);
            // Last match wins, mirroring duplicate-header resolution.
            document.columns().iter().rev().find(|c| normalize(&c.name) == wanted)
        }
    }
}
