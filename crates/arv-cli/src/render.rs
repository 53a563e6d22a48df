//! # Report Rendering
//!
//! Turns a [`Report`] into what the user sees on stdout.

use arv_core::Diagnostic;
use arv_validate::Report;
use clap::ValueEnum;
use nu_ansi_term::Color;
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str =
    "Congratulations! Your Apigility implementation matches the RAML specification!";

pub const FAILURE_MESSAGE: &str = "Apigility implementation doesn't match the RAML specification!";

/// Output format for the validation report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable lines, optionally colored.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Render the report as text lines, each terminated by a newline.
pub fn render_text(report: &Report, color: bool) -> String {
    let mut out = String::new();
    if report.is_success() {
        push_line(&mut out, paint(color, Color::Green, SUCCESS_MESSAGE));
        return out;
    }

    push_line(&mut out, paint(color, Color::Red, FAILURE_MESSAGE));
    for line in report.diagnostics.iter().flat_map(|d| d.lines()) {
        push_line(&mut out, paint(color, Color::Yellow, line));
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    module: &'a str,
    success: bool,
    diagnostics: &'a [Diagnostic],
}

/// Render the report as pretty-printed JSON followed by a newline.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    let doc = JsonReport {
        module: &report.module,
        success: report.is_success(),
        diagnostics: &report.diagnostics,
    };
    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}

fn paint(color: bool, c: Color, text: &str) -> String {
    if color {
        c.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}
