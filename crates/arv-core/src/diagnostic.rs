//! # Diagnostics
//!
//! A diagnostic is one recorded mismatch between the specification and the
//! project. Diagnostics are collected, never raised: the validator appends
//! them in check order and keeps going.
//!
//! Some mismatches need more than one line to be useful (the expected and
//! found values), so a diagnostic carries a headline plus indented detail
//! lines. It still counts as a single message.

use std::fmt;

use serde::Serialize;

/// Category of a recorded mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A module, version folder or endpoint is absent from the project.
    StructuralMismatch,
    /// The verbs an endpoint implements differ from the verbs it declares.
    CoverageMismatch,
    /// Documentation text is missing or differs from the specification.
    DocumentationMismatch,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StructuralMismatch => "structural",
            Self::CoverageMismatch => "coverage",
            Self::DocumentationMismatch => "documentation",
        };
        f.write_str(s)
    }
}

/// A single recorded mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// One-line summary.
    pub message: String,
    /// Supporting lines, already indented for display.
    pub details: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::StructuralMismatch, message)
    }

    pub fn coverage(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::CoverageMismatch, message)
    }

    pub fn documentation(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::DocumentationMismatch, message)
    }

    /// Append a detail line.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    /// Headline followed by the detail lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.message.as_str()).chain(self.details.iter().map(String::as_str))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_headline_and_details() {
        let d = Diagnostic::documentation("Documentation does not match for Widgets GET (collection)")
            .with_detail("  Expected: List widgets")
            .with_detail("     Found: List all widgets");
        assert_eq!(
            d.to_string(),
            "Documentation does not match for Widgets GET (collection)\n  Expected: List widgets\n     Found: List all widgets"
        );
    }

    #[test]
    fn single_line_diagnostic_has_no_trailing_newline() {
        let d = Diagnostic::structural("The Shop module does not exist");
        assert_eq!(d.to_string(), "The Shop module does not exist");
        assert_eq!(d.lines().count(), 1);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let d = Diagnostic::coverage("Missing methods for Widgets resource!");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "coverage_mismatch");
        assert_eq!(json["details"], serde_json::json!([]));
    }

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Diagnostic::structural("x").kind, DiagnosticKind::StructuralMismatch);
        assert_eq!(Diagnostic::coverage("x").kind, DiagnosticKind::CoverageMismatch);
        assert_eq!(Diagnostic::documentation("x").kind, DiagnosticKind::DocumentationMismatch);
        assert_eq!(DiagnosticKind::CoverageMismatch.to_string(), "coverage");
    }
}
