//! # Settings File
//!
//! Optional YAML file holding defaults for every command-line option, so a
//! project can keep its validator invocation under version control:
//!
//! ```yaml
//! spec: api/shop.raml
//! project: .
//! module: Shop
//! format: json
//! color: false
//! ```
//!
//! Relative paths are resolved against the settings file's directory.
//! Command-line arguments always win over values from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::render::ReportFormat;

/// Values read from a settings file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub spec: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub module: Option<String>,
    pub debug: Option<bool>,
    pub format: Option<ReportFormat>,
    pub color: Option<bool>,
}

impl Settings {
    /// Read a settings file. An empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let mut settings = Self::from_yaml(&source)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        settings.spec = settings.spec.map(|p| resolve_path(&p, base));
        settings.project = settings.project.map(|p| resolve_path(&p, base));

        tracing::debug!(path = %path.display(), ?settings, "loaded settings file");
        Ok(settings)
    }

    /// Parse settings from YAML text without resolving paths.
    pub fn from_yaml(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Join a relative path onto `base`; absolute paths are returned as-is.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
