//! Errors that abort a validation run.

use arv_config::ConfigError;
use thiserror::Error;

/// A validation run could not complete.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The module's config is missing, unreadable or malformed.
    #[error("module '{module}': {source}")]
    Config {
        module: String,
        #[source]
        source: ConfigError,
    },
}

impl ValidateError {
    pub(crate) fn config(module: &str, source: ConfigError) -> Self {
        Self::Config {
            module: module.to_string(),
            source,
        }
    }
}
