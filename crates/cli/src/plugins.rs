//! Plugins compiled into the `pawn` binary

use pawn_core::{OptionDescriptor, OptionSchema, Plugin};
use std::any::Any;

/// Module name the JSON plugin is registered under
pub const JSON_MODULE: &str = "pawn-json";

/// Output formatting for the session dump
#[derive(Debug, Clone, Default)]
pub struct JsonFormat;

impl Plugin for JsonFormat {
    fn options(&self) -> Option<OptionSchema> {
        Some(OptionSchema::new().with(
            "pretty",
            OptionDescriptor::boolean().with_description("Pretty-print the session JSON."),
        ))
    }

    fn description(&self) -> Option<&str> {
        Some("JSON output formatting")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
