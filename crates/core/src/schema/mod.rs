//! Option schemas
//!
//! An [`OptionSchema`] is one authored layer (built-ins, the tool, a plugin).
//! A [`MergedSchema`] is the flat grammar a parse pass runs against; it is
//! never mutated, every extension returns a new value with a bumped version.

use crate::error::{Error, Result};
use crate::impl_case_insensitive_deserialize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod builtins;

pub use builtins::{builtin_options, is_internal_key, INTERNAL_KEYS};

/// Value shape of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Boolean,
    String,
    #[serde(rename = "array")]
    StringArray,
}

impl_case_insensitive_deserialize!(
    OptionKind,
    Boolean => ["boolean", "bool"],
    String => ["string"],
    StringArray => ["array", "stringarray"]
);

impl OptionKind {
    pub fn takes_value(self) -> bool {
        !matches!(self, OptionKind::Boolean)
    }
}

/// Declaration of a single option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    #[serde(rename = "type")]
    pub kind: OptionKind,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "describe")]
    pub description: Option<String>,

    /// Lowest-precedence value, used when no other layer supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl OptionDescriptor {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            description: None,
            default: None,
        }
    }

    pub fn boolean() -> Self {
        Self::new(OptionKind::Boolean)
    }

    pub fn string() -> Self {
        Self::new(OptionKind::String)
    }

    pub fn string_array() -> Self {
        Self::new(OptionKind::StringArray)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// One authored layer of options, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSchema {
    options: IndexMap<String, OptionDescriptor>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method adding (or replacing) an option
    pub fn with(mut self, name: impl Into<String>, descriptor: OptionDescriptor) -> Self {
        self.options.insert(name.into(), descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionDescriptor)> {
        self.options.iter().map(|(name, d)| (name.as_str(), d))
    }
}

impl<S: Into<String>> FromIterator<(S, OptionDescriptor)> for OptionSchema {
    fn from_iter<I: IntoIterator<Item = (S, OptionDescriptor)>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().map(|(n, d)| (n.into(), d)).collect(),
        }
    }
}

/// Help-text group an option is listed under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionGroup {
    /// Built-ins and the tool's own options
    General,
    /// Options contributed by the plugin with this identifier
    Plugin(String),
}

impl OptionGroup {
    fn describe(&self) -> String {
        match self {
            OptionGroup::General => "the tool".to_string(),
            OptionGroup::Plugin(id) => format!("plugin '{id}'"),
        }
    }
}

/// What happens when a layer re-declares an option that is already present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The later layer silently wins
    #[default]
    Override,
    /// A collision between different groups is an error
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub descriptor: OptionDescriptor,
    pub group: OptionGroup,
}

/// Flat grammar assembled from layers; name uniqueness holds by construction
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSchema {
    version: u32,
    entries: IndexMap<String, SchemaEntry>,
}

impl MergedSchema {
    /// Schema holding only the built-in options
    pub fn builtins() -> Self {
        let entries = builtin_options()
            .iter()
            .map(|(name, d)| {
                (
                    name.to_string(),
                    SchemaEntry {
                        descriptor: d.clone(),
                        group: OptionGroup::General,
                    },
                )
            })
            .collect();
        Self { version: 0, entries }
    }

    /// Return a new schema with `layer` merged on top of this one
    pub fn extend(
        &self,
        layer: &OptionSchema,
        group: OptionGroup,
        policy: CollisionPolicy,
    ) -> Result<MergedSchema> {
        let mut entries = self.entries.clone();

        for (name, descriptor) in layer.iter() {
            if let Some(existing) = entries.get(name) {
                if policy == CollisionPolicy::Reject && existing.group != group {
                    return Err(Error::OptionCollision {
                        name: name.to_string(),
                        existing: existing.group.describe(),
                        incoming: group.describe(),
                    });
                }
                tracing::debug!(
                    "Option '{}' from {} overrides the one from {}",
                    name,
                    group.describe(),
                    existing.group.describe()
                );
            }
            entries.insert(
                name.to_string(),
                SchemaEntry {
                    descriptor: descriptor.clone(),
                    group: group.clone(),
                },
            );
        }

        Ok(MergedSchema {
            version: self.version + 1,
            entries,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries.iter().map(|(name, e)| (name.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtins_schema() {
        let schema = MergedSchema::builtins();
        assert_eq!(schema.version(), 0);
        for name in ["help", "version", "cwd", "configPath", "plugins"] {
            assert!(schema.contains(name), "missing built-in {name}");
        }
        assert_eq!(schema.get("plugins").unwrap().descriptor.kind, OptionKind::StringArray);
    }

    #[test]
    fn test_extend_returns_new_version() {
        let base = MergedSchema::builtins();
        let layer = OptionSchema::new().with("arg", OptionDescriptor::string());

        let extended = base
            .extend(&layer, OptionGroup::General, CollisionPolicy::Override)
            .unwrap();

        assert_eq!(extended.version(), 1);
        assert!(extended.contains("arg"));
        assert!(!base.contains("arg"));
    }

    #[test]
    fn test_later_layer_wins() {
        let tool = OptionSchema::new().with("test", OptionDescriptor::boolean());
        let plugin = OptionSchema::new().with("test", OptionDescriptor::string());

        let schema = MergedSchema::builtins()
            .extend(&tool, OptionGroup::General, CollisionPolicy::Override)
            .unwrap()
            .extend(&plugin, OptionGroup::Plugin("module".into()), CollisionPolicy::Override)
            .unwrap();

        let entry = schema.get("test").unwrap();
        assert_eq!(entry.descriptor.kind, OptionKind::String);
        assert_eq!(entry.group, OptionGroup::Plugin("module".into()));
    }

    #[test]
    fn test_reject_policy_reports_collision() {
        let tool = OptionSchema::new().with("test", OptionDescriptor::boolean());
        let plugin = OptionSchema::new().with("test", OptionDescriptor::string());

        let err = MergedSchema::builtins()
            .extend(&tool, OptionGroup::General, CollisionPolicy::Reject)
            .unwrap()
            .extend(&plugin, OptionGroup::Plugin("module".into()), CollisionPolicy::Reject)
            .unwrap_err();

        assert!(matches!(err, Error::OptionCollision { ref name, .. } if name == "test"));
    }

    #[test]
    fn test_deserialize_schema_layer() {
        let layer: OptionSchema = serde_json::from_value(json!({
            "test": { "type": "string", "description": "A plugin option" },
            "verbose": { "type": "Boolean", "default": false },
            "tags": { "type": "array" }
        }))
        .unwrap();

        assert_eq!(layer.len(), 3);
        assert_eq!(layer.names().collect::<Vec<_>>(), vec!["test", "verbose", "tags"]);
        assert_eq!(layer.get("verbose").unwrap().default, Some(json!(false)));
        assert_eq!(layer.get("tags").unwrap().kind, OptionKind::StringArray);
    }
}
