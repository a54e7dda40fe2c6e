//! Module resolver over compiled-in plugins
//!
//! Plugins linked into the binary are registered under the module name they
//! would be installed as (e.g. `pawn-json`), which makes them visible to
//! naming-convention discovery exactly like installed ones.

use crate::error::{Error, Result};
use crate::interfaces::{Environment, LoadedModule, ModuleResolver, Plugin};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of compiled-in plugin modules
#[derive(Clone, Default)]
pub struct StaticModuleResolver {
    modules: BTreeMap<String, Arc<dyn Plugin>>,
}

impl std::fmt::Debug for StaticModuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticModuleResolver")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StaticModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module
    pub fn register(&mut self, name: impl Into<String>, plugin: Arc<dyn Plugin>) {
        self.modules.insert(name.into(), plugin);
    }

    /// Builder method for registering a module
    pub fn with_module(mut self, name: impl Into<String>, plugin: impl Plugin) -> Self {
        self.register(name, Arc::new(plugin));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }
}

impl ModuleResolver for StaticModuleResolver {
    fn discover(&self, prefix: &str, _env: &dyn Environment) -> Result<Vec<LoadedModule>> {
        Ok(self
            .modules
            .iter()
            .filter(|(name, _)| name.starts_with(prefix) && name.len() > prefix.len())
            .map(|(name, plugin)| LoadedModule::new(name.clone(), Arc::clone(plugin)))
            .collect())
    }

    fn load(&self, spec: &str, _env: &dyn Environment) -> Result<LoadedModule> {
        self.modules
            .get(spec)
            .map(|plugin| LoadedModule::new(spec, Arc::clone(plugin)))
            .ok_or_else(|| Error::plugin(spec, "no such module is registered"))
    }

    fn provides(&self, spec: &str, _env: &dyn Environment) -> bool {
        self.contains(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::VirtualEnvironment;
    use std::any::Any;

    #[derive(Debug)]
    struct Marker;

    impl Plugin for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn resolver() -> StaticModuleResolver {
        StaticModuleResolver::new()
            .with_module("pawn-module", Marker)
            .with_module("pawn-other", Marker)
            .with_module("other-module", Marker)
    }

    #[test]
    fn test_discover_by_prefix() {
        let env = VirtualEnvironment::new("/");
        let found = resolver().discover("pawn-", &env).unwrap();
        let names: Vec<_> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["pawn-module", "pawn-other"]);
    }

    #[test]
    fn test_load_missing_module() {
        let env = VirtualEnvironment::new("/");
        let err = resolver().load("missing", &env).unwrap_err();
        assert!(matches!(err, Error::PluginLoad { ref module, .. } if module == "missing"));
    }

    #[test]
    fn test_load_by_name() {
        let env = VirtualEnvironment::new("/");
        let module = resolver().load("other-module", &env).unwrap();
        assert_eq!(module.name, "other-module");
        assert!(module.plugin.as_any().is::<Marker>());
    }
}
