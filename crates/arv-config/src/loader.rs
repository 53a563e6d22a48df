//! # Config File Loading
//!
//! Locates a config file by base name and reads it into an ordered JSON
//! value tree, whatever its on-disk format. PHP is the native Apigility
//! format; YAML and JSON equivalents are accepted for projects that export
//! their config.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ConfigError;
use crate::php;

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Php,
    Yaml,
    Json,
}

/// Extensions tried by [`find_config`], in preference order.
pub const CONFIG_EXTENSIONS: [(&str, ConfigFormat); 4] = [
    ("php", ConfigFormat::Php),
    ("yaml", ConfigFormat::Yaml),
    ("yml", ConfigFormat::Yaml),
    ("json", ConfigFormat::Json),
];

impl ConfigFormat {
    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        CONFIG_EXTENSIONS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }
}

/// Find `<dir>/<name>.<ext>` for the first extension that exists.
pub fn find_config(dir: &Path, name: &str) -> Option<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|(ext, _)| dir.join(format!("{name}.{ext}")))
        .find(|path| path.is_file())
}

/// Like [`find_config`], but a missing file is an error.
pub fn require_config(dir: &Path, name: &str) -> Result<PathBuf, ConfigError> {
    find_config(dir, name).ok_or_else(|| ConfigError::NotFound {
        name: name.to_string(),
        dir: dir.display().to_string(),
        tried: CONFIG_EXTENSIONS
            .iter()
            .map(|(ext, _)| *ext)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Read a config file into a JSON value tree.
///
/// The format is chosen from the extension; unknown extensions are read as
/// JSON.
pub fn load_value(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Json);
    tracing::debug!(path = %path.display(), ?format, "loading config file");

    match format {
        ConfigFormat::Php => php::parse_config(&content, path.parent()).map_err(|source| {
            ConfigError::Php {
                path: path.display().to_string(),
                source,
            }
        }),
        ConfigFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: path.display().to_string(),
                    reason: format!("invalid YAML: {e}"),
                })?;
            yaml_to_json_value(yaml).map_err(|reason| ConfigError::Parse {
                path: path.display().to_string(),
                reason: format!("YAML-to-JSON conversion failed: {reason}"),
            })
        }
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Convert a YAML tree into the shape a PHP config evaluates to. Mapping
/// keys follow PHP array-key coercion; tags are dropped.
fn yaml_to_json_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => serde_json::to_value(&n).map_err(|e| e.to_string())?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json_value)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                object.insert(php_array_key(&key)?, yaml_to_json_value(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json_value(tagged.value)?,
    })
}

/// The key PHP would store for a scalar used as an array key.
fn php_array_key(key: &serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .map(|i| i.to_string())
            .ok_or_else(|| format!("unusable array key {n}")),
        Yaml::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        Yaml::Null => Ok(String::new()),
        Yaml::Sequence(_) | Yaml::Mapping(_) | Yaml::Tagged(_) => {
            Err("array keys must be scalars".to_string())
        }
    }
}
