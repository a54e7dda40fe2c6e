use super::PluginRegistry;
use crate::error::Result;
use crate::interfaces::{Environment, ModuleResolver};
use crate::utils::camel_case;

/// Builds the plugin registry from convention discovery and explicit specs
pub struct PluginLoader<'a> {
    tool: &'a str,
    modules: &'a dyn ModuleResolver,
}

impl<'a> PluginLoader<'a> {
    pub fn new(tool: &'a str, modules: &'a dyn ModuleResolver) -> Self {
        Self { tool, modules }
    }

    /// Modules named `<tool>-<suffix>` are picked up by convention
    pub fn convention_prefix(&self) -> String {
        format!("{}-", self.tool)
    }

    /// `pawn-other-module` -> `otherModule`
    pub fn convention_id(&self, module: &str) -> String {
        let prefix = self.convention_prefix();
        camel_case(module.strip_prefix(prefix.as_str()).unwrap_or(module))
    }

    /// Load every plugin. Explicit specs overwrite convention plugins with
    /// the same identifier; any load failure is fatal.
    pub fn load(&self, explicit: &[String], env: &dyn Environment) -> Result<PluginRegistry> {
        let mut registry = PluginRegistry::new();

        for module in self.modules.discover(&self.convention_prefix(), env)? {
            let id = self.convention_id(&module.name);
            tracing::debug!("Discovered plugin '{}' as '{}'", module.name, id);
            registry.insert(id, module.plugin);
        }

        for spec in explicit {
            let module = self.modules.load(spec, env)?;
            let id = camel_case(&module.name);
            if registry.insert(id.clone(), module.plugin).is_some() {
                tracing::debug!("Explicit plugin '{}' replaces the discovered '{}'", spec, id);
            } else {
                tracing::debug!("Loaded plugin '{}' as '{}'", spec, id);
            }
        }

        tracing::info!("{} plugin(s) loaded for '{}'", registry.len(), self.tool);
        Ok(registry)
    }
}
