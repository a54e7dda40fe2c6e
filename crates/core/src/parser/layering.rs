//! Coercion of config and environment values to declared kinds

use crate::error::{Error, Result};
use crate::schema::OptionKind;
use serde_json::Value;

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Coerce a config-file value. `null` counts as absent.
pub fn coerce_config(option: &str, kind: OptionKind, value: &Value) -> Result<Option<Value>> {
    if value.is_null() {
        return Ok(None);
    }
    let coerced = match kind {
        OptionKind::Boolean => match value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) => parse_bool(s).map(Value::Bool),
            _ => None,
        },
        OptionKind::String => scalar_text(value).map(Value::String),
        OptionKind::StringArray => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| scalar_text(item).map(Value::String))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            scalar => scalar_text(scalar).map(|s| Value::Array(vec![Value::String(s)])),
        },
    };
    coerced
        .map(Some)
        .ok_or_else(|| Error::argument(option, format!("config value {value} is not a valid {}", kind_name(kind))))
}

/// Coerce an environment variable. Arrays are comma separated.
pub fn coerce_env(option: &str, kind: OptionKind, variable: &str, raw: &str) -> Result<Value> {
    match kind {
        OptionKind::Boolean => parse_bool(raw).map(Value::Bool).ok_or_else(|| {
            Error::argument(option, format!("{variable}={raw:?} is not a valid boolean"))
        }),
        OptionKind::String => Ok(Value::String(raw.to_string())),
        OptionKind::StringArray => Ok(Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
    }
}

fn kind_name(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Boolean => "boolean",
        OptionKind::String => "string",
        OptionKind::StringArray => "array of strings",
    }
}
