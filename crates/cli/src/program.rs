use crate::plugins::JsonFormat;
use anyhow::{Context, Result};
use pawn_core::{OptionDescriptor, OptionSchema, Program, Session};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What the `pawn` binary prints for a session
#[derive(Debug, Serialize)]
pub struct SessionDump<'a> {
    /// Binary that produced the dump; tells a local install from the global one
    pub executable: Option<String>,
    pub args: &'a [String],
    pub options: &'a BTreeMap<String, Value>,
    pub plugins: Vec<&'a str>,
}

/// Prints the resolved session as JSON
#[derive(Debug, Clone, Default)]
pub struct EchoProgram {
    executable: Option<PathBuf>,
}

impl EchoProgram {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }

    pub fn render(&self, session: &Session) -> Result<String> {
        let dump = SessionDump {
            executable: self.executable.as_ref().map(|p| p.display().to_string()),
            args: &session.args,
            options: &session.options,
            plugins: session.plugins.ids().collect(),
        };

        let pretty = session.plugins.get_as::<JsonFormat>("json").is_some() && session.flag("pretty");
        let rendered = if pretty {
            serde_json::to_string_pretty(&dump)
        } else {
            serde_json::to_string(&dump)
        };
        rendered.context("Failed to serialize session")
    }
}

impl Program for EchoProgram {
    fn options(&self) -> OptionSchema {
        OptionSchema::new().with("arg", OptionDescriptor::string().with_description("Value echoed back in the session."))
    }

    fn usage(&self) -> Option<String> {
        Some("  pawn [options] [args...]".to_string())
    }

    fn execute(&self, session: &Session) -> Result<()> {
        println!("{}", self.render(session)?);
        Ok(())
    }
}
