//! Argument parser adapter
//!
//! Wraps clap: every call takes a schema and the raw tokens and returns a
//! flat [`ParseResult`]. Nothing is kept between calls; the only thing that
//! grows from pass to pass is the schema handed in.
//!
//! Value precedence for a declared option, highest first:
//! command line > config file > environment variable > declared default.

use crate::config::ConfigObject;
use crate::error::{Error, Result};
use crate::interfaces::Environment;
use crate::schema::builtins::POSITIONAL;
use crate::schema::{MergedSchema, OptionDescriptor, OptionKind};
use crate::utils::env_var_name;
use clap::parser::ValueSource;
use clap::ArgMatches;
use serde_json::Value;
use std::collections::BTreeMap;

pub mod command;
pub mod layering;
pub mod tokens;

pub use command::{build_grammar, plugin_heading, Grammar, GENERAL_HEADING};
pub use tokens::{mentions_option, retain_known, FlagBag, RawArgs};

/// How tokens the schema does not know are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Unknown flags are skipped (they may belong to plugins not loaded yet)
    Lenient,
    /// Unknown flags are an error
    Strict,
}

/// Value sources layered beneath the command line
#[derive(Clone, Copy, Default)]
pub struct ParseLayers<'a> {
    pub config: Option<&'a ConfigObject>,
    /// Tool name (for variable names) and the environment to read from
    pub env: Option<(&'a str, &'a dyn Environment)>,
}

impl<'a> ParseLayers<'a> {
    /// Command line and defaults only
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(config: &'a ConfigObject, tool: &'a str, env: &'a dyn Environment) -> Self {
        Self {
            config: Some(config),
            env: Some((tool, env)),
        }
    }
}

/// Output of one parse pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub positional: Vec<String>,
    pub options: BTreeMap<String, Value>,
}

impl ParseResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.options.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_list(&self, name: &str) -> Vec<String> {
        match self.options.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

/// Stateless parser over one schema
pub struct ArgumentParser<'a> {
    tool: &'a str,
    schema: &'a MergedSchema,
}

impl<'a> ArgumentParser<'a> {
    pub fn new(tool: &'a str, schema: &'a MergedSchema) -> Self {
        Self { tool, schema }
    }

    pub fn parse(&self, tokens: &[String], layers: ParseLayers<'_>, mode: ParseMode) -> Result<ParseResult> {
        let tokens = match mode {
            ParseMode::Lenient => retain_known(tokens, self.schema),
            ParseMode::Strict => tokens.to_vec(),
        };

        let Grammar { command, declared } = build_grammar(self.tool, self.schema, None);
        let matches = command.try_get_matches_from(tokens).map_err(from_clap)?;

        let mut result = ParseResult {
            positional: matches
                .get_many::<String>(POSITIONAL)
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            options: BTreeMap::new(),
        };

        for (name, entry) in self.schema.iter() {
            if !declared.contains(name) {
                continue;
            }
            if let Some(value) = self.resolve(name, &entry.descriptor, &matches, layers)? {
                result.options.insert(name.to_string(), value);
            }
        }

        // Config keys no schema declares pass through untouched
        if let Some(config) = layers.config {
            for (key, value) in config.iter() {
                if !self.schema.contains(key) && !value.is_null() {
                    result.options.insert(key.to_string(), value.clone());
                }
            }
        }

        tracing::trace!("Parsed against schema v{}: {:?}", self.schema.version(), result);
        Ok(result)
    }

    fn resolve(
        &self,
        name: &str,
        descriptor: &OptionDescriptor,
        matches: &ArgMatches,
        layers: ParseLayers<'_>,
    ) -> Result<Option<Value>> {
        if matches.value_source(name) == Some(ValueSource::CommandLine) {
            return Ok(Some(command_line_value(name, descriptor.kind, matches)));
        }

        if let Some(value) = layers.config.and_then(|config| config.get(name)) {
            if let Some(value) = layering::coerce_config(name, descriptor.kind, value)? {
                return Ok(Some(value));
            }
        }

        if let Some((tool, env)) = layers.env {
            let variable = env_var_name(tool, name);
            if let Some(raw) = env.var(&variable) {
                return layering::coerce_env(name, descriptor.kind, &variable, &raw).map(Some);
            }
        }

        Ok(descriptor.default.clone())
    }
}

fn command_line_value(name: &str, kind: OptionKind, matches: &ArgMatches) -> Value {
    match kind {
        OptionKind::Boolean => Value::Bool(matches.get_flag(name)),
        OptionKind::String => matches
            .get_one::<String>(name)
            .map(|s| Value::String(s.clone()))
            .unwrap_or(Value::Null),
        OptionKind::StringArray => Value::Array(
            matches
                .get_many::<String>(name)
                .into_iter()
                .flatten()
                .map(|s| Value::String(s.clone()))
                .collect(),
        ),
    }
}

fn from_clap(err: clap::Error) -> Error {
    use clap::error::{ContextKind, ContextValue};

    let option = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => "<arguments>".to_string(),
    };
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    Error::ArgumentParse { option, message }
}
