use std::fmt;
use std::sync::Arc;

use crate::error::EngineError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (the request was unusable, the upload was fine).
    Warning,
    /// Error-level event (the upload could not be read).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Context about a summary attempt.
#[derive(Debug, Clone, Default)]
pub struct SummaryContext {
    /// Uploaded file name, if the caller knows it.
    pub file_name: Option<String>,
    /// Number of requested column names (0 means "all columns").
    pub requested_columns: usize,
}

/// Stats reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    /// Number of data rows in the parsed sheet.
    pub rows: usize,
    /// Number of columns that were summarized.
    pub summarized_columns: usize,
    /// Number of requested names not found in the header.
    pub missing_columns: usize,
}

/// Observer interface for summary outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait SummaryObserver: Send + Sync {
    /// Called when summarizing succeeds.
    fn on_success(&self, _ctx: &SummaryContext, _stats: SummaryStats) {}

    /// Called when parsing or summarizing fails.
    fn on_failure(&self, _ctx: &SummaryContext, _severity: Severity, _error: &EngineError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &SummaryContext, severity: Severity, error: &EngineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SummaryObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn SummaryObserver>>) -> Self {
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

impl SummaryObserver for CompositeObserver {
    fn on_success(&self, ctx: &SummaryContext, stats: SummaryStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &SummaryContext, severity: Severity, error: &EngineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &SummaryContext, severity: Severity, error: &EngineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits summary events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl SummaryObserver for TracingObserver {
    fn on_success(&self, ctx: &SummaryContext, stats: SummaryStats) {
        tracing::info!(
            file = ctx.file_name.as_deref().unwrap_or("<upload>"),
            requested = ctx.requested_columns,
            rows = stats.rows,
            summarized = stats.summarized_columns,
            missing = stats.missing_columns,
            "summary computed"
        );
    }

    fn on_failure(&self, ctx: &SummaryContext, severity: Severity, error: &EngineError) {
        let file = ctx.file_name.as_deref().unwrap_or("<upload>");
        match severity {
            Severity::Info | Severity::Warning => {
                tracing::warn!(file, ?severity, %error, "summary rejected")
            }
            Severity::Error | Severity::Critical => {
                tracing::error!(file, ?severity, %error, "summary failed")
            }
        }
    }

    fn on_alert(&self, ctx: &SummaryContext, severity: Severity, error: &EngineError) {
        tracing::error!(
            file = ctx.file_name.as_deref().unwrap_or("<upload>"),
            ?severity,
            %error,
            alert = true,
            "summary failure crossed alert threshold"
        );
    }
}

/// Severity an error is reported at.
pub(crate) fn severity_for_error(e: &EngineError) -> Severity {
    match e {
        EngineError::Workbook(calamine::XlsxError::Io(_)) => Severity::Critical,
        EngineError::Workbook(_) | EngineError::NoSheets | EngineError::NoHeader { .. } => {
            Severity::Error
        }
        EngineError::NoValidColumns { .. } => Severity::Warning,
    }
}
