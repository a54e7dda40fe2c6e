//! Raw invocation arguments
//!
//! Arguments arrive either as argv tokens or as a structured flag bag; the
//! bag is flattened into tokens once and the same tokens are re-parsed by
//! every pass.

use crate::schema::builtins::POSITIONAL;
use crate::schema::{MergedSchema, OptionKind};
use crate::utils::kebab_case;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Structured flags, e.g. `{ cwd: "/x", plugins: ["a"] }`.
///
/// `true` becomes `--name`, `false` and `null` are dropped, scalars become
/// `--name value`, arrays `--name v1 v2`. The `_` key holds positional
/// arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagBag {
    flags: IndexMap<String, Value>,
}

impl FlagBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for a flag
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.flags.get(name)
    }

    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();

        // Positionals go first so a trailing multi-value flag cannot absorb them
        if let Some(positional) = self.flags.get(POSITIONAL) {
            match positional {
                Value::Array(items) => tokens.extend(items.iter().filter_map(scalar_to_string)),
                other => tokens.extend(scalar_to_string(other)),
            }
        }

        for (name, value) in &self.flags {
            if name == POSITIONAL {
                continue;
            }
            let flag = format!("--{}", kebab_case(name));
            match value {
                Value::Bool(true) => tokens.push(flag),
                Value::Bool(false) | Value::Null => {}
                Value::Array(items) => {
                    let values: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
                    if !values.is_empty() {
                        tokens.push(flag);
                        tokens.extend(values);
                    }
                }
                Value::Object(_) => {
                    tracing::debug!("Skipping nested flag '{}'", name);
                }
                scalar => {
                    if let Some(value) = scalar_to_string(scalar) {
                        tokens.push(flag);
                        tokens.push(value);
                    }
                }
            }
        }
        tokens
    }
}

impl From<Map<String, Value>> for FlagBag {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            flags: map.into_iter().collect(),
        }
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

/// Arguments of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum RawArgs {
    Tokens(Vec<String>),
    Flags(FlagBag),
}

impl RawArgs {
    pub fn empty() -> Self {
        RawArgs::Tokens(Vec::new())
    }

    pub fn to_tokens(&self) -> Vec<String> {
        match self {
            RawArgs::Tokens(tokens) => tokens.clone(),
            RawArgs::Flags(flags) => flags.to_tokens(),
        }
    }
}

impl Default for RawArgs {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<String>> for RawArgs {
    fn from(tokens: Vec<String>) -> Self {
        RawArgs::Tokens(tokens)
    }
}

impl From<Vec<&str>> for RawArgs {
    fn from(tokens: Vec<&str>) -> Self {
        RawArgs::Tokens(tokens.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for RawArgs {
    fn from(tokens: &[&str]) -> Self {
        RawArgs::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl From<FlagBag> for RawArgs {
    fn from(flags: FlagBag) -> Self {
        RawArgs::Flags(flags)
    }
}

pub(crate) fn is_flag(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1
}

/// `-5`, `-0.25`, `-1e3`
pub(crate) fn is_negative_number(token: &str) -> bool {
    token
        .strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()) && rest.parse::<f64>().is_ok())
}

/// Whether `token` can be the value of a preceding flag
fn is_value(token: &str) -> bool {
    !is_flag(token) || is_negative_number(token)
}

/// Split `--name=value` into `("name", Some("value"))`
pub(crate) fn split_long(token: &str) -> Option<(&str, Option<&str>)> {
    let body = token.strip_prefix("--")?;
    if body.is_empty() {
        return None;
    }
    Some(match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    })
}

/// Every spelling a long flag of `schema` accepts, mapped to its kind
pub(crate) fn flag_spellings(schema: &MergedSchema) -> HashMap<String, OptionKind> {
    let mut spellings = HashMap::new();
    for (name, entry) in schema.iter() {
        spellings.insert(kebab_case(name), entry.descriptor.kind);
        spellings.insert(name.to_string(), entry.descriptor.kind);
    }
    spellings
}

/// Keep only the tokens `schema` understands.
///
/// Early passes run before plugin options are known; flags they cannot
/// interpret yet (and the value following them) are left for the final pass.
pub fn retain_known(tokens: &[String], schema: &MergedSchema) -> Vec<String> {
    let spellings = flag_spellings(schema);
    let mut kept = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        if token == "--" {
            kept.push(token.clone());
            kept.extend(iter.cloned());
            break;
        }

        if let Some((name, inline)) = split_long(token) {
            match spellings.get(name) {
                Some(kind) => {
                    kept.push(token.clone());
                    if inline.is_none() {
                        match kind {
                            OptionKind::Boolean => {}
                            OptionKind::String => {
                                if let Some(value) = iter.next_if(|t| is_value(t)) {
                                    kept.push(value.clone());
                                }
                            }
                            OptionKind::StringArray => {
                                while let Some(value) = iter.next_if(|t| is_value(t)) {
                                    kept.push(value.clone());
                                }
                            }
                        }
                    }
                }
                None => {
                    tracing::trace!("Deferring unknown flag '{}'", token);
                    if inline.is_none() {
                        iter.next_if(|t| is_value(t));
                    }
                }
            }
        } else if is_flag(token) {
            tracing::trace!("Deferring short flag '{}'", token);
            iter.next_if(|t| is_value(t));
        } else {
            kept.push(token.clone());
        }
    }
    kept
}

/// Whether `tokens` explicitly set the option `name` (any spelling)
pub fn mentions_option(tokens: &[String], name: &str) -> bool {
    let kebab = kebab_case(name);
    tokens
        .iter()
        .take_while(|t| t.as_str() != "--")
        .filter_map(|t| split_long(t))
        .any(|(flag, _)| flag == name || flag == kebab)
}
