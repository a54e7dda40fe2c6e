//! Module resolution interface
//!
//! Provides abstraction for finding and loading plugin modules.

use super::{Environment, LoadedModule};
use crate::error::Result;

/// Trait for plugin module resolution
pub trait ModuleResolver: Send + Sync {
    /// Load every installed module whose name starts with `prefix`
    /// (e.g. `pawn-`). Finding none is not an error.
    fn discover(&self, prefix: &str, env: &dyn Environment) -> Result<Vec<LoadedModule>>;

    /// Load one module from a name or a path
    fn load(&self, spec: &str, env: &dyn Environment) -> Result<LoadedModule>;

    /// Whether this resolver can load `spec` at all
    fn provides(&self, spec: &str, env: &dyn Environment) -> bool;
}
