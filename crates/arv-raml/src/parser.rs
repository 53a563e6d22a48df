//! # RAML Parser
//!
//! Walks the YAML tree of a RAML document and builds a
//! [`Specification`]. Keys starting with `/` are resources, keys naming an
//! HTTP verb are methods. Resource URIs are absolute: a nested `/{id}`
//! under `/widgets` becomes `/widgets/{id}`.

use std::path::Path;

use arv_core::{HttpMethod, Method, Resource, Specification};
use serde_yaml::{Mapping, Value};

use crate::error::{ParseWarning, RamlError};

/// RAML versions this parser understands.
const SUPPORTED_VERSIONS: [&str; 2] = ["0.8", "1.0"];

const HEADER_PREFIX: &str = "#%RAML";

/// Resource properties that carry nothing the validator compares.
const IGNORED_RESOURCE_KEYS: [&str; 7] = [
    "description",
    "uriParameters",
    "baseUriParameters",
    "type",
    "is",
    "securedBy",
    "usage",
];

/// Result of parsing a RAML document.
#[derive(Debug, Clone)]
pub struct ParsedSpecification {
    pub specification: Specification,
    /// Skipped or unsupported constructs, in document order.
    pub warnings: Vec<ParseWarning>,
}

/// Read and parse a RAML document from disk.
pub fn parse_file(path: &Path) -> Result<ParsedSpecification, RamlError> {
    let source = std::fs::read_to_string(path).map_err(|source| RamlError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read RAML document");
    parse_str(&source)
}

/// Parse a RAML document held in memory.
pub fn parse_str(source: &str) -> Result<ParsedSpecification, RamlError> {
    let mut parser = Parser::default();
    parser.check_header(source);

    let root: Value = serde_yaml::from_str(source)?;
    let Value::Mapping(root) = root else {
        return Err(RamlError::NotAMapping {
            found: kind_of(&root),
        });
    };

    let title = match root.get("title") {
        None | Some(Value::Null) => return Err(RamlError::MissingTitle),
        Some(value) => scalar_to_string(value).ok_or(RamlError::InvalidField {
            field: "title",
            expected: "a scalar",
            found: kind_of(value),
        })?,
    };

    let version = match root.get("version") {
        None | Some(Value::Null) => None,
        Some(value) => Some(scalar_to_string(value).ok_or(RamlError::InvalidField {
            field: "version",
            expected: "a scalar",
            found: kind_of(value),
        })?),
    };

    let mut specification = Specification::new(title, version);
    for (key, value) in &root {
        let Some(key) = key.as_str() else {
            continue;
        };
        if key.starts_with('/') {
            if let Some(resource) = parser.parse_resource("", key, value) {
                specification.resources.push(resource);
            }
        }
    }

    tracing::debug!(
        title = %specification.title,
        version = ?specification.version,
        resources = specification.resources.len(),
        warnings = parser.warnings.len(),
        "parsed RAML specification"
    );

    Ok(ParsedSpecification {
        specification,
        warnings: parser.warnings,
    })
}

#[derive(Default)]
struct Parser {
    warnings: Vec<ParseWarning>,
}

impl Parser {
    fn warn(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ParseWarning::new(location, message));
    }

    fn check_header(&mut self, source: &str) {
        let first = source.lines().next().unwrap_or("").trim();
        match first.strip_prefix(HEADER_PREFIX) {
            Some(rest) => {
                let version = rest.trim();
                if !SUPPORTED_VERSIONS.contains(&version) {
                    self.warn("", format!("unsupported RAML version '{version}'"));
                }
            }
            None => self.warn("", "missing #%RAML header"),
        }
    }

    fn parse_resource(&mut self, parent_uri: &str, key: &str, value: &Value) -> Option<Resource> {
        let uri = format!("{parent_uri}{key}");
        let mut resource = Resource::new(uri.clone(), key);

        let properties = match value {
            Value::Mapping(map) => map,
            Value::Null => return Some(resource),
            Value::Tagged(tagged) => {
                self.warn(&uri, format!("ignored tagged resource {}", tagged.tag));
                return None;
            }
            other => {
                self.warn(&uri, format!("resource body is {}, expected a mapping", kind_of(other)));
                return Some(resource);
            }
        };

        self.parse_resource_properties(&mut resource, properties);
        Some(resource)
    }

    fn parse_resource_properties(&mut self, resource: &mut Resource, properties: &Mapping) {
        for (key, value) in properties {
            let Some(key) = key.as_str() else {
                self.warn(&resource.uri, format!("ignored non-string key of type {}", kind_of(key)));
                continue;
            };

            if key.starts_with('/') {
                if let Some(child) = self.parse_resource(&resource.uri, key, value) {
                    resource.resources.push(child);
                }
            } else if let Ok(verb) = key.parse::<HttpMethod>() {
                let method = self.parse_method(&resource.uri, verb, value);
                resource.insert_method(method);
            } else if key == "displayName" {
                match scalar_to_string(value) {
                    Some(name) => resource.display_name = name,
                    None => self.warn(&resource.uri, "displayName is not a scalar"),
                }
            } else if IGNORED_RESOURCE_KEYS.contains(&key) || key.starts_with('(') {
                continue;
            } else {
                self.warn(&resource.uri, format!("ignored unknown property '{key}'"));
            }
        }
    }

    fn parse_method(&mut self, uri: &str, verb: HttpMethod, value: &Value) -> Method {
        let location = format!("{uri} {}", verb.as_str().to_ascii_lowercase());
        let description = match value {
            Value::Null => String::new(),
            Value::Mapping(map) => match map.get("description") {
                None | Some(Value::Null) => String::new(),
                Some(Value::Tagged(tagged)) => {
                    self.warn(&location, format!("ignored tagged description {}", tagged.tag));
                    String::new()
                }
                Some(text) => scalar_to_string(text).unwrap_or_else(|| {
                    self.warn(&location, "description is not a scalar");
                    String::new()
                }),
            },
            Value::Tagged(tagged) => {
                self.warn(&location, format!("ignored tagged method {}", tagged.tag));
                String::new()
            }
            other => {
                self.warn(&location, format!("method body is {}, expected a mapping", kind_of(other)));
                String::new()
            }
        };
        Method::new(verb, description)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
