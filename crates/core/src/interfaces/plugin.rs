//! Plugin interface
//!
//! Plugins may contribute options and any other capability; programs reach
//! those capabilities by downcasting through [`Plugin::as_any`].

use crate::schema::OptionSchema;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// A loaded plugin
pub trait Plugin: Any + Send + Sync + Debug {
    /// Options contributed to the final parse
    fn options(&self) -> Option<OptionSchema> {
        None
    }

    /// Short description (optional)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Access to the concrete plugin type
    fn as_any(&self) -> &dyn Any;
}

/// A module handed back by a [`super::ModuleResolver`]
#[derive(Debug, Clone)]
pub struct LoadedModule {
    /// Module name as installed or declared (e.g. `pawn-module`)
    pub name: String,

    /// The plugin object the module exports
    pub plugin: Arc<dyn Plugin>,
}

impl LoadedModule {
    pub fn new(name: impl Into<String>, plugin: Arc<dyn Plugin>) -> Self {
        Self {
            name: name.into(),
            plugin,
        }
    }
}
