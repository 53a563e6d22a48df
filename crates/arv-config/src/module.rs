//! # Module Config
//!
//! The typed slice of `module.config` the validator needs: the router's
//! route list and, per controller, the HTTP methods it implements.
//!
//! Apigility (and its successor Laminas API Tools) writes these under
//! `router.routes`, `zf-rest` / `api-tools-rest` for REST services and
//! `zf-rpc` / `api-tools-rpc` for RPC services.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::ConfigError;

/// Top-level keys holding REST controller config, legacy name first.
const REST_KEYS: [&str; 2] = ["zf-rest", "api-tools-rest"];

/// Top-level keys holding RPC controller config.
const RPC_KEYS: [&str; 2] = ["zf-rpc", "api-tools-rpc"];

/// Which half of a REST service a check looks at.
///
/// A collection route serves `/widgets`; an entity route serves
/// `/widgets/:id`. Apigility keeps separate method lists for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodScope {
    Collection,
    Entity,
}

impl MethodScope {
    /// Key used in documentation config (`collection` / `entity`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Entity => "entity",
        }
    }

    /// Key of the method list in REST controller config.
    pub fn http_methods_key(self) -> &'static str {
        match self {
            Self::Collection => "collection_http_methods",
            Self::Entity => "entity_http_methods",
        }
    }
}

/// One entry of `router.routes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Route name (the array key), e.g. `shop.rest.widget`.
    pub name: String,
    /// Route pattern, e.g. `/widgets[/:widget_id]`.
    pub pattern: String,
    /// Controller service name from `options.defaults.controller`.
    pub controller: String,
}

/// Implemented methods of a REST controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestController {
    pub collection_http_methods: Vec<String>,
    pub entity_http_methods: Vec<String>,
}

impl RestController {
    pub fn http_methods(&self, scope: MethodScope) -> &[String] {
        match scope {
            MethodScope::Collection => &self.collection_http_methods,
            MethodScope::Entity => &self.entity_http_methods,
        }
    }
}

/// Routes and controller method lists of one Apigility module.
#[derive(Debug, Clone, Default)]
pub struct ModuleConfig {
    routes: Vec<Route>,
    rest: HashMap<String, RestController>,
    rpc: HashMap<String, Vec<String>>,
}

impl ModuleConfig {
    /// Build from a loaded `module.config` tree.
    ///
    /// `source_name` names the file in error messages.
    pub fn from_value(value: &Value, source_name: &str) -> Result<Self, ConfigError> {
        let missing = |key: &str| ConfigError::MissingKey {
            source_name: source_name.to_string(),
            key: key.to_string(),
        };
        let invalid = |key: String, expected: &'static str| ConfigError::InvalidValue {
            source_name: source_name.to_string(),
            key,
            expected,
        };

        let routes_value = value
            .get("router")
            .and_then(|router| router.get("routes"))
            .ok_or_else(|| missing("router.routes"))?;

        let mut routes = Vec::new();
        for (name, entry) in entries(routes_value).ok_or_else(|| invalid("router.routes".into(), "an array"))? {
            let options = entry.get("options");
            let pattern = options
                .and_then(|o| o.get("route"))
                .and_then(Value::as_str)
                .ok_or_else(|| missing(&format!("router.routes.{name}.options.route")))?;
            let controller = options
                .and_then(|o| o.get("defaults"))
                .and_then(|d| d.get("controller"))
                .and_then(Value::as_str)
                .ok_or_else(|| missing(&format!("router.routes.{name}.options.defaults.controller")))?;
            routes.push(Route {
                name,
                pattern: pattern.to_string(),
                controller: controller.to_string(),
            });
        }

        let mut rest = HashMap::new();
        for key in REST_KEYS {
            let Some(section) = value.get(key) else {
                continue;
            };
            let controllers = entries(section).ok_or_else(|| invalid(key.to_string(), "an array"))?;
            for (controller, entry) in controllers {
                let mut methods = RestController::default();
                for scope in [MethodScope::Collection, MethodScope::Entity] {
                    let list_key = scope.http_methods_key();
                    let list = match entry.get(list_key) {
                        None | Some(Value::Null) => Vec::new(),
                        Some(list) => string_values(list).ok_or_else(|| {
                            invalid(format!("{key}.{controller}.{list_key}"), "a list of strings")
                        })?,
                    };
                    match scope {
                        MethodScope::Collection => methods.collection_http_methods = list,
                        MethodScope::Entity => methods.entity_http_methods = list,
                    }
                }
                rest.entry(controller).or_insert(methods);
            }
        }

        let mut rpc = HashMap::new();
        for key in RPC_KEYS {
            let Some(section) = value.get(key) else {
                continue;
            };
            let controllers = entries(section).ok_or_else(|| invalid(key.to_string(), "an array"))?;
            for (controller, entry) in controllers {
                let list = match entry.get("http_methods") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(list) => string_values(list).ok_or_else(|| {
                        invalid(format!("{key}.{controller}.http_methods"), "a list of strings")
                    })?,
                };
                rpc.entry(controller).or_insert(list);
            }
        }

        tracing::debug!(
            source = source_name,
            routes = routes.len(),
            rest_controllers = rest.len(),
            rpc_controllers = rpc.len(),
            "loaded module config"
        );

        Ok(Self { routes, rest, rpc })
    }

    /// Routes in config order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Methods `controller` implements for `scope`.
    ///
    /// REST controllers answer from the matching method list. RPC
    /// controllers have a single `http_methods` list used for both scopes.
    pub fn implemented_methods(
        &self,
        controller: &str,
        scope: MethodScope,
    ) -> Result<&[String], ConfigError> {
        if let Some(rest) = self.rest.get(controller) {
            return Ok(rest.http_methods(scope));
        }
        if let Some(rpc) = self.rpc.get(controller) {
            return Ok(rpc);
        }
        Err(ConfigError::UnknownController {
            controller: controller.to_string(),
        })
    }
}

/// Key/value pairs of a PHP array. Lists yield their indices as keys.
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

/// Values of a PHP array of strings, in order, ignoring keys.
fn string_values(value: &Value) -> Option<Vec<String>> {
    let (_, values): (Vec<String>, Vec<&Value>) = entries(value)?.into_iter().unzip();
    values
        .into_iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget_config() -> Value {
        json!({
            "router": {
                "routes": {
                    "shop.rest.widget": {
                        "type": "Segment",
                        "options": {
                            "route": "/widgets[/:widget_id]",
                            "defaults": { "controller": "Shop\\V1\\Rest\\Widget\\Controller" }
                        }
                    },
                    "shop.rpc.ping": {
                        "type": "Literal",
                        "options": {
                            "route": "/ping",
                            "defaults": { "controller": "Shop\\V1\\Rpc\\Ping\\Controller", "action": "ping" }
                        }
                    }
                }
            },
            "zf-rest": {
                "Shop\\V1\\Rest\\Widget\\Controller": {
                    "collection_http_methods": ["GET", "POST"],
                    "entity_http_methods": {"0": "GET", "1": "DELETE"}
                }
            },
            "zf-rpc": {
                "Shop\\V1\\Rpc\\Ping\\Controller": { "http_methods": ["GET"] }
            }
        })
    }

    #[test]
    fn routes_keep_config_order() {
        let config = ModuleConfig::from_value(&widget_config(), "module.config.php").unwrap();
        let names: Vec<&str> = config.routes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["shop.rest.widget", "shop.rpc.ping"]);
        assert_eq!(config.routes()[0].pattern, "/widgets[/:widget_id]");
        assert_eq!(config.routes()[0].controller, r"Shop\V1\Rest\Widget\Controller");
    }

    #[test]
    fn rest_methods_per_scope() {
        let config = ModuleConfig::from_value(&widget_config(), "m").unwrap();
        let controller = r"Shop\V1\Rest\Widget\Controller";
        assert_eq!(
            config.implemented_methods(controller, MethodScope::Collection).unwrap(),
            ["GET", "POST"]
        );
        assert_eq!(
            config.implemented_methods(controller, MethodScope::Entity).unwrap(),
            ["GET", "DELETE"]
        );
    }

    #[test]
    fn rpc_methods_apply_to_both_scopes() {
        let config = ModuleConfig::from_value(&widget_config(), "m").unwrap();
        let controller = r"Shop\V1\Rpc\Ping\Controller";
        assert_eq!(config.implemented_methods(controller, MethodScope::Collection).unwrap(), ["GET"]);
        assert_eq!(config.implemented_methods(controller, MethodScope::Entity).unwrap(), ["GET"]);
    }

    #[test]
    fn unknown_controller_is_an_error() {
        let config = ModuleConfig::from_value(&widget_config(), "m").unwrap();
        let err = config.implemented_methods("Nope", MethodScope::Collection).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownController { .. }));
    }

    #[test]
    fn laminas_keys_are_accepted() {
        let value = json!({
            "router": { "routes": {} },
            "api-tools-rest": { "C": { "collection_http_methods": ["GET"] } }
        });
        let config = ModuleConfig::from_value(&value, "m").unwrap();
        assert_eq!(config.implemented_methods("C", MethodScope::Collection).unwrap(), ["GET"]);
        assert!(config.implemented_methods("C", MethodScope::Entity).unwrap().is_empty());
    }

    #[test]
    fn missing_routes_is_an_error() {
        let err = ModuleConfig::from_value(&json!({"zf-rest": {}}), "module.config.php").unwrap_err();
        match err {
            ConfigError::MissingKey { key, source_name } => {
                assert_eq!(key, "router.routes");
                assert_eq!(source_name, "module.config.php");
            }
            other => panic!("expected MissingKey, got {other}"),
        }
    }

    #[test]
    fn route_without_controller_is_an_error() {
        let value = json!({
            "router": { "routes": { "r": { "options": { "route": "/r" } } } }
        });
        let err = ModuleConfig::from_value(&value, "m").unwrap_err();
        assert!(err.to_string().contains("router.routes.r.options.defaults.controller"));
    }

    #[test]
    fn non_string_method_is_an_error() {
        let value = json!({
            "router": { "routes": [] },
            "zf-rest": { "C": { "collection_http_methods": ["GET", 1] } }
        });
        let err = ModuleConfig::from_value(&value, "m").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn empty_php_array_routes_are_a_list() {
        let value = json!({ "router": { "routes": [] } });
        let config = ModuleConfig::from_value(&value, "m").unwrap();
        assert!(config.routes().is_empty());
    }
}
