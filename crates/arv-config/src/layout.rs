//! # Project Layout
//!
//! Where an Apigility project keeps each module:
//!
//! ```text
//! <root>/module/<Module>/
//!     config/module.config.php
//!     config/documentation.config.php
//!     src/<Version>/...
//! ```

use std::path::{Path, PathBuf};

use crate::documentation::DocumentationConfig;
use crate::error::ConfigError;
use crate::loader::{find_config, load_value, require_config};
use crate::module::ModuleConfig;

/// Base name of the module config file.
pub const MODULE_CONFIG: &str = "module.config";

/// Base name of the documentation config file.
pub const DOCUMENTATION_CONFIG: &str = "documentation.config";

/// Paths inside an Apigility project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/module/<module>`
    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.root.join("module").join(module)
    }

    /// `<root>/module/<module>/src/<folder>`
    pub fn version_dir(&self, module: &str, folder: &str) -> PathBuf {
        self.module_dir(module).join("src").join(folder)
    }

    /// `<root>/module/<module>/config`
    pub fn config_dir(&self, module: &str) -> PathBuf {
        self.module_dir(module).join("config")
    }

    /// Load the module's route and controller config. A missing file is
    /// an error.
    pub fn load_module_config(&self, module: &str) -> Result<ModuleConfig, ConfigError> {
        let path = require_config(&self.config_dir(module), MODULE_CONFIG)?;
        let value = load_value(&path)?;
        ModuleConfig::from_value(&value, &path.display().to_string())
    }

    /// Load the module's documentation config, or `None` when the module
    /// has no documentation file.
    pub fn load_documentation_config(
        &self,
        module: &str,
    ) -> Result<Option<DocumentationConfig>, ConfigError> {
        let Some(path) = find_config(&self.config_dir(module), DOCUMENTATION_CONFIG) else {
            tracing::debug!(module, "no documentation config");
            return Ok(None);
        };
        let value = load_value(&path)?;
        DocumentationConfig::from_value(value, &path.display().to_string()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::MethodScope;

    fn project_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn paths_follow_apigility_layout() {
        let layout = ProjectLayout::new("/srv/app");
        assert_eq!(layout.module_dir("Shop"), PathBuf::from("/srv/app/module/Shop"));
        assert_eq!(layout.version_dir("Shop", "V1"), PathBuf::from("/srv/app/module/Shop/src/V1"));
        assert_eq!(layout.config_dir("Shop"), PathBuf::from("/srv/app/module/Shop/config"));
        assert_eq!(layout.root(), Path::new("/srv/app"));
    }

    #[test]
    fn loads_php_module_config() {
        let dir = project_with(&[(
            "module/Shop/config/module.config.php",
            r"<?php return [
                'router' => ['routes' => ['shop.rest.widget' => ['options' => [
                    'route' => '/widgets', 'defaults' => ['controller' => 'W'],
                ]]]],
                'zf-rest' => ['W' => ['collection_http_methods' => ['GET']]],
            ];",
        )]);
        let config = ProjectLayout::new(dir.path()).load_module_config("Shop").unwrap();
        assert_eq!(config.routes().len(), 1);
        assert_eq!(config.implemented_methods("W", MethodScope::Collection).unwrap(), ["GET"]);
    }

    #[test]
    fn missing_module_config_is_an_error() {
        let dir = project_with(&[]);
        let err = ProjectLayout::new(dir.path()).load_module_config("Shop").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn missing_documentation_is_none() {
        let dir = project_with(&[]);
        let docs = ProjectLayout::new(dir.path()).load_documentation_config("Shop").unwrap();
        assert!(docs.is_none());
    }

    #[test]
    fn loads_yaml_documentation_config() {
        let dir = project_with(&[(
            "module/Shop/config/documentation.config.yaml",
            "W:\n  collection:\n    GET:\n      description: List widgets\n",
        )]);
        let docs = ProjectLayout::new(dir.path())
            .load_documentation_config("Shop")
            .unwrap()
            .unwrap();
        assert_eq!(
            docs.description("W", MethodScope::Collection, "GET").as_deref(),
            Some("List widgets")
        );
    }
}
