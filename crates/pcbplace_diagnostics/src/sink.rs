//! Collects the diagnostics of one placement run.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Collected {
    diagnostics: Vec<Diagnostic>,
    counts: [usize; Severity::ALL.len()],
}

/// Accumulates diagnostics behind a shared reference.
///
/// The placer only needs `&DiagnosticSink`, so a caller can keep reading
/// counts while a run holds the sink. Per-severity counts survive
/// [`take_all`](Self::take_all).
#[derive(Default)]
pub struct DiagnosticSink {
    inner: Mutex<Collected>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collected> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        tracing::trace!(code = %diag.code, message = %diag.message, "diagnostic");
        let mut inner = self.lock();
        inner.counts[diag.severity.index()] += 1;
        inner.diagnostics.push(diag);
    }

    /// Number of diagnostics emitted at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock().counts[severity.index()]
    }

    /// Returns `true` once any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Drains the collected diagnostics, most severe first, keeping emission
    /// order within a severity.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.lock().diagnostics);
        diagnostics.sort_by(|a, b| b.severity.cmp(&a.severity));
        diagnostics
    }

    /// Snapshot in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().diagnostics.clone()
    }
}
