//! Outcome of a validation run.

use arv_core::{Diagnostic, DiagnosticKind};
use serde::Serialize;

/// Diagnostics recorded for one module, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub module: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new(module: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            module: module.into(),
            diagnostics,
        }
    }

    /// True when the implementation matches the specification.
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
