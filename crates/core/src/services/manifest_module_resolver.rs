//! Module resolver over declarative plugin manifests
//!
//! A manifest is a JSON or TOML document describing a plugin without code:
//!
//! ```toml
//! name = "pawn-module"
//! description = "Adds --test"
//!
//! [options.test]
//! type = "string"
//!
//! [capabilities]
//! banner = "hello"
//! ```
//!
//! Manifests live in one plugins directory (resolved against the working
//! directory); explicit specs may also point straight at a manifest file.

use crate::config::document::{read_document, DocumentFormat};
use crate::error::{Error, Result};
use crate::interfaces::{Environment, LoadedModule, ModuleResolver, Plugin};
use crate::schema::OptionSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A plugin described by a manifest document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionSchema>,

    /// Free-form data exposed to programs
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub capabilities: Map<String, Value>,
}

impl PluginManifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let document = read_document(path).map_err(|e| Error::plugin(path.display().to_string(), e))?;
        serde_json::from_value(document).map_err(|e| Error::plugin(path.display().to_string(), e))
    }

    pub fn capability(&self, key: &str) -> Option<&Value> {
        self.capabilities.get(key)
    }
}

impl Plugin for PluginManifest {
    fn options(&self) -> Option<OptionSchema> {
        self.options.clone()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Loads [`PluginManifest`]s from a plugins directory
#[derive(Debug, Clone)]
pub struct ManifestModuleResolver {
    plugins_dir: PathBuf,
}

impl ManifestModuleResolver {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
        }
    }

    fn plugins_dir(&self, env: &dyn Environment) -> Result<PathBuf> {
        env.resolve_path(&self.plugins_dir)
    }

    /// Where `spec` would be read from, if anywhere
    fn locate(&self, spec: &str, env: &dyn Environment) -> Result<Option<PathBuf>> {
        let as_path = Path::new(spec);
        if DocumentFormat::from_path(as_path).is_some() || as_path.components().count() > 1 {
            let path = env.resolve_path(as_path)?;
            return Ok(path.is_file().then_some(path));
        }

        let dir = self.plugins_dir(env)?;
        Ok(DocumentFormat::ALL
            .iter()
            .map(|format| dir.join(format!("{spec}.{}", format.extension())))
            .find(|candidate| candidate.is_file()))
    }

    fn load_file(path: &Path) -> Result<LoadedModule> {
        let manifest = PluginManifest::from_file(path)?;
        let name = manifest
            .name
            .clone()
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_default();
        tracing::debug!("Loaded plugin manifest {:?} as '{}'", path, name);
        Ok(LoadedModule::new(name, Arc::new(manifest)))
    }
}

impl ModuleResolver for ManifestModuleResolver {
    fn discover(&self, prefix: &str, env: &dyn Environment) -> Result<Vec<LoadedModule>> {
        let dir = self.plugins_dir(env)?;
        if !dir.is_dir() {
            tracing::debug!("No plugins directory at {:?}", dir);
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| Error::plugin(dir.display().to_string(), e))?;
        let mut candidates = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::plugin(dir.display().to_string(), e))?.path();
            if !path.is_file() || DocumentFormat::from_path(&path).is_none() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with(prefix) && stem.len() > prefix.len() {
                candidates.push((stem.to_string(), path.clone()));
            }
        }
        candidates.sort();

        candidates
            .into_iter()
            .map(|(stem, path)| {
                // Discovery keys on the installed (file) name, not the declared one
                let module = Self::load_file(&path)?;
                Ok(LoadedModule::new(stem, module.plugin))
            })
            .collect()
    }

    fn load(&self, spec: &str, env: &dyn Environment) -> Result<LoadedModule> {
        match self.locate(spec, env)? {
            Some(path) => Self::load_file(&path),
            None => Err(Error::plugin(
                spec,
                format!("no manifest found (looked in {})", self.plugins_dir(env)?.display()),
            )),
        }
    }

    fn provides(&self, spec: &str, env: &dyn Environment) -> bool {
        matches!(self.locate(spec, env), Ok(Some(_)))
    }
}
