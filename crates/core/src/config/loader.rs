//! Project config file loading
//!
//! The config file is optional: a missing or malformed file yields an empty
//! [`ConfigObject`] and never fails resolution.

use super::document::{read_document, DocumentFormat};
use crate::error::{Error, Result};
use crate::interfaces::Environment;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Flat option-name → value mapping read from a config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigObject {
    values: Map<String, Value>,
}

impl ConfigObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed document; the top level must be a table/object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(Error::ConfigError(format!(
                "Top level of a config file must be a table, found {}",
                type_name(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for ConfigObject {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `pawn` + JSON -> `pawnfile.json`
pub fn default_config_name(tool: &str, format: DocumentFormat) -> String {
    format!("{tool}file.{}", format.extension())
}

/// Config file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path the config would be read from: the explicit one, or the first
    /// default candidate that exists in the working directory
    pub fn locate(tool: &str, explicit: Option<&Path>, env: &dyn Environment) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            return Ok(Some(env.resolve_path(path)?));
        }
        let cwd = env.current_dir()?;
        Ok(DocumentFormat::ALL
            .iter()
            .map(|format| cwd.join(default_config_name(tool, *format)))
            .find(|candidate| candidate.is_file()))
    }

    /// Load the config, reporting every failure
    pub fn try_load(tool: &str, explicit: Option<&Path>, env: &dyn Environment) -> Result<ConfigObject> {
        match Self::locate(tool, explicit, env)? {
            Some(path) => {
                let config = ConfigObject::from_value(read_document(&path)?)?;
                tracing::debug!("Loaded config from {:?} ({} keys)", path, config.len());
                Ok(config)
            }
            None => Ok(ConfigObject::new()),
        }
    }

    /// Load the config; any failure yields an empty config
    pub fn load(tool: &str, explicit: Option<&Path>, env: &dyn Environment) -> ConfigObject {
        match Self::try_load(tool, explicit, env) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Ignoring config for '{}': {}", tool, e);
                ConfigObject::new()
            }
        }
    }
}
