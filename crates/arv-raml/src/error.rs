//! # RAML Parse Errors and Warnings
//!
//! Errors abort parsing: the document cannot produce a specification.
//! Warnings mark parts of a valid document that were skipped.

use std::fmt;

use thiserror::Error;

/// Fatal error while reading or parsing a RAML document.
#[derive(Error, Debug)]
pub enum RamlError {
    /// The document file could not be read.
    #[error("cannot read RAML document '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML.
    #[error("invalid YAML in RAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document root is not a mapping.
    #[error("RAML document root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    /// The mandatory `title` property is absent.
    #[error("RAML document has no title")]
    MissingTitle,

    /// A root property has an unusable value.
    #[error("invalid value for '{field}': expected {expected}, found {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Where in the document: a resource URI, optionally followed by a
    /// method or property name. Empty for document-level warnings.
    pub location: String,
    pub message: String,
}

impl ParseWarning {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "(document): {}", self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}
