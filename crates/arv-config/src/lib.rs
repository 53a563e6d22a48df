//! # arv-config — Apigility Project Configuration
//!
//! Locates an Apigility module on disk and loads the two config files the
//! validator compares against a specification:
//!
//! - `config/module.config.*` — router routes and, per controller, the
//!   HTTP methods implemented for collections and entities.
//! - `config/documentation.config.*` — optional per-method descriptions.
//!
//! Config is read natively from PHP array-literal files ([`php`]), or from
//! YAML/JSON files of the same shape. Every format becomes the same ordered
//! `serde_json::Value` tree before typed extraction.
//!
//! ## Crate Policy
//!
//! - No PHP runtime: only the literal subset of PHP is evaluated.
//! - Missing or malformed required config is a [`ConfigError`], never a
//!   silent default.

pub mod documentation;
pub mod error;
pub mod layout;
pub mod loader;
pub mod module;
pub mod php;

pub use documentation::DocumentationConfig;
pub use error::ConfigError;
pub use layout::{ProjectLayout, DOCUMENTATION_CONFIG, MODULE_CONFIG};
pub use loader::{find_config, load_value, ConfigFormat};
pub use module::{MethodScope, ModuleConfig, RestController, Route};
pub use php::PhpSyntaxError;
