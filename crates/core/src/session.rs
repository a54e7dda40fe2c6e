//! The resolved invocation handed to a program

use crate::error::{Error, Result};
use crate::interfaces::Program;
use crate::parser::ParseResult;
use crate::plugins::PluginRegistry;
use crate::schema::is_internal_key;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Positional arguments, option values and loaded plugins of one run
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub args: Vec<String>,
    pub options: BTreeMap<String, Value>,
    pub plugins: PluginRegistry,
}

impl Session {
    /// Build a session from a final parse; bookkeeping keys are dropped
    pub fn new(parsed: ParseResult, plugins: PluginRegistry) -> Self {
        let options = parsed
            .options
            .into_iter()
            .filter(|(name, _)| !is_internal_key(name))
            .collect();
        Self {
            args: parsed.positional,
            options,
            plugins,
        }
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(Value::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// JSON view of the session; plugins are listed by identifier
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("args".into(), self.args.clone().into());
        object.insert(
            "options".into(),
            Value::Object(self.options.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        );
        object.insert(
            "plugins".into(),
            self.plugins.ids().map(|id| Value::String(id.to_string())).collect(),
        );
        Value::Object(object)
    }
}

/// Builds the session and runs the program against it
pub struct SessionEmitter;

impl SessionEmitter {
    pub fn emit(parsed: ParseResult, plugins: PluginRegistry, program: &dyn Program) -> Result<Session> {
        let session = Session::new(parsed, plugins);
        tracing::debug!(
            "Executing with {} arg(s), {} option(s), {} plugin(s)",
            session.args.len(),
            session.options.len(),
            session.plugins.len()
        );
        program.execute(&session).map_err(Error::program)?;
        Ok(session)
    }
}
