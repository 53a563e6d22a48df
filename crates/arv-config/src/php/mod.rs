//! # PHP Config Reader
//!
//! Apigility keeps its configuration in PHP files of the form
//! `<?php return [ ... ];`. These files are data, not programs, so they are
//! read here without a PHP runtime: a small tokenizer plus an evaluator for
//! the literal subset (arrays, strings, numbers, booleans, `null`,
//! `Foo::class`, `__DIR__` and `.` concatenation).
//!
//! The result is an ordered [`serde_json::Value`]. PHP arrays whose keys are
//! exactly `0..n` become JSON arrays; every other array becomes an object
//! whose keys keep their source order.
//!
//! Anything outside that subset (function calls, variables, constants other
//! than `::class`) is a [`PhpSyntaxError`] with a line and column.

mod lexer;
mod parser;

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

pub use lexer::Position;

/// A config file uses syntax outside the supported literal subset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {}, column {}: {message}", .position.line, .position.column)]
pub struct PhpSyntaxError {
    pub position: Position,
    pub message: String,
}

impl PhpSyntaxError {
    pub(crate) fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Evaluate the `return` expression of a PHP config file.
///
/// `dir` is substituted for `__DIR__`; pass the directory containing the
/// file being read.
pub fn parse_config(source: &str, dir: Option<&Path>) -> Result<Value, PhpSyntaxError> {
    let tokens = lexer::tokenize(source)?;
    parser::Parser::new(tokens, dir).parse_file()
}
