//! # Documentation Config
//!
//! `documentation.config` holds the API descriptions Apigility's admin UI
//! writes, keyed controller → `collection` | `entity` → verb:
//!
//! ```php
//! return [
//!     'Shop\\V1\\Rest\\Widget\\Controller' => [
//!         'description' => 'Widgets',
//!         'collection' => [
//!             'GET' => ['description' => 'List widgets'],
//!         ],
//!     ],
//! ];
//! ```

use serde_json::Value;

use crate::error::ConfigError;
use crate::module::MethodScope;

/// Descriptions of a module's controllers.
#[derive(Debug, Clone)]
pub struct DocumentationConfig {
    controllers: serde_json::Map<String, Value>,
}

impl DocumentationConfig {
    /// Build from a loaded `documentation.config` tree.
    ///
    /// An empty PHP array (`return [];`) is an empty config.
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, ConfigError> {
        let controllers = match value {
            Value::Object(map) => map,
            Value::Array(items) if items.is_empty() => serde_json::Map::new(),
            _ => {
                return Err(ConfigError::InvalidValue {
                    source_name: source_name.to_string(),
                    key: "(root)".to_string(),
                    expected: "an array keyed by controller",
                })
            }
        };
        tracing::debug!(
            source = source_name,
            controllers = controllers.len(),
            "loaded documentation config"
        );
        Ok(Self { controllers })
    }

    /// Description documented for `verb` on `controller`, if any.
    ///
    /// Scalars other than strings are rendered as text so they compare
    /// unequal to the specification rather than vanishing.
    pub fn description(&self, controller: &str, scope: MethodScope, verb: &str) -> Option<String> {
        let description = self
            .controllers
            .get(controller)?
            .get(scope.key())?
            .get(verb)?
            .get("description")?;
        match description {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
