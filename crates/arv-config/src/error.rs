//! # Config Errors
//!
//! Every error here is fatal to a validation run: the project cannot be
//! compared against the specification without its route and REST config.

use thiserror::Error;

use crate::php::PhpSyntaxError;

/// Error loading or interpreting Apigility configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file with any supported extension exists.
    #[error("config file '{name}' not found in {dir} (tried {tried})")]
    NotFound {
        name: String,
        dir: String,
        tried: String,
    },

    /// The file exists but could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A PHP config file uses unsupported syntax.
    #[error("cannot evaluate PHP config '{path}': {source}")]
    Php {
        path: String,
        #[source]
        source: PhpSyntaxError,
    },

    /// A YAML or JSON config file is malformed.
    #[error("cannot parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// A required key is absent.
    #[error("missing required key '{key}' in {source_name}")]
    MissingKey { source_name: String, key: String },

    /// A key holds a value of the wrong shape.
    #[error("invalid value for '{key}' in {source_name}: expected {expected}")]
    InvalidValue {
        source_name: String,
        key: String,
        expected: &'static str,
    },

    /// A route names a controller with no `zf-rest` entry.
    #[error("controller '{controller}' has no zf-rest or zf-rpc configuration")]
    UnknownController { controller: String },
}
