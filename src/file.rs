//! File-backed providers for JSON, YAML, TOML, and INI.
//!
//! JSON and YAML decode straight into the JSON-shaped tree the
//! [`flatten`](crate::flatten) walker takes; TOML decodes into
//! [`toml::Table`] and is rebuilt as the same tree, with datetimes as
//! their text form. INI is two levels deep by nature; its provider
//! synthesizes `section.key` tokens directly instead of going through the
//! flattener.
//!
//! Each provider points at one explicit path and re-reads it on every load.
//! There is no discovery or fallback: a file that is missing or unreadable
//! fails the load, and the error carries the offending path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::FigstackError;
use crate::flatten::flatten;
use crate::provider::{Provider, Settings};

fn read(path: &Path) -> Result<String, FigstackError> {
    std::fs::read_to_string(path).map_err(|e| FigstackError::Io {
        path: path.to_path_buf(),
        source: Arc::new(e),
    })
}

fn parse_error(path: &Path, source: impl std::error::Error + Send + Sync + 'static) -> FigstackError {
    FigstackError::Parse {
        path: path.to_path_buf(),
        source: Arc::new(source),
    }
}

/// Raised for structurally-valid documents whose root is not a mapping.
#[derive(Debug)]
struct RootNotMapping;

impl std::fmt::Display for RootNotMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "document root is not a key-value mapping")
    }
}

impl std::error::Error for RootNotMapping {}

#[derive(Debug)]
struct IniError(String);

impl std::fmt::Display for IniError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IniError {}

/// Flatten a decoded document, requiring a mapping at the root.
///
/// A `null` root (e.g. an empty YAML file) is treated as an empty mapping.
fn flatten_root(path: &Path, value: Value) -> Result<Settings, FigstackError> {
    match value {
        Value::Object(map) => Ok(flatten(&map, "")),
        Value::Null => Ok(Settings::new()),
        _ => Err(parse_error(path, RootNotMapping)),
    }
}

/// Loads and flattens a JSON config file.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Provider for JsonFile {
    fn load(&self) -> Result<Settings, FigstackError> {
        let content = read(&self.path)?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| parse_error(&self.path, e))?;
        flatten_root(&self.path, value)
    }
}

/// Loads and flattens a YAML config file.
pub struct YamlFile {
    path: PathBuf,
}

impl YamlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Provider for YamlFile {
    fn load(&self) -> Result<Settings, FigstackError> {
        let content = read(&self.path)?;
        let value: Value =
            serde_yaml::from_str(&content).map_err(|e| parse_error(&self.path, e))?;
        flatten_root(&self.path, value)
    }
}

/// Rebuild a decoded TOML value as JSON-shaped data for the flattener.
///
/// Datetimes have no JSON counterpart; they become their literal text.
fn json_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::from(number),
        toml::Value::Float(number) => Value::from(number),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(stamp) => Value::String(stamp.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(json_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, json_value(value)))
                .collect(),
        ),
    }
}

/// Loads and flattens a TOML config file.
///
/// Datetime values keep their literal text, e.g. `1979-05-27T07:32:00Z`.
pub struct TomlFile {
    path: PathBuf,
}

impl TomlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Provider for TomlFile {
    fn load(&self) -> Result<Settings, FigstackError> {
        let content = read(&self.path)?;
        let table: toml::Table =
            toml::from_str(&content).map_err(|e| parse_error(&self.path, e))?;
        let mapping: Map<String, Value> = table
            .into_iter()
            .map(|(key, value)| (key, json_value(value)))
            .collect();
        Ok(flatten(&mapping, ""))
    }
}

/// Loads an INI config file.
///
/// Tokens are `section.key`, lower-cased. Keys above any section header
/// land in the parser's `default` section, so they come out as
/// `default.key`. A key written without a value maps to the empty string.
pub struct IniFile {
    path: PathBuf,
}

impl IniFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Provider for IniFile {
    fn load(&self) -> Result<Settings, FigstackError> {
        let content = read(&self.path)?;

        let mut ini = configparser::ini::Ini::new();
        let sections = ini
            .read(content)
            .map_err(|reason| parse_error(&self.path, IniError(reason)))?;

        let mut settings = Settings::new();
        for (section, keys) in sections {
            for (key, value) in keys {
                let token = format!("{section}.{key}").to_lowercase();
                settings.insert(token, value.unwrap_or_default());
            }
        }

        Ok(settings)
    }
}
