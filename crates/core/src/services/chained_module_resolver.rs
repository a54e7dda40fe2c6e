//! Combines several module resolvers

use crate::error::{Error, Result};
use crate::interfaces::{Environment, LoadedModule, ModuleResolver};

/// Discovers from every resolver; loads from the first one that provides
/// the requested module
#[derive(Default)]
pub struct ChainedModuleResolver {
    resolvers: Vec<Box<dyn ModuleResolver>>,
}

impl ChainedModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }
}

impl ModuleResolver for ChainedModuleResolver {
    fn discover(&self, prefix: &str, env: &dyn Environment) -> Result<Vec<LoadedModule>> {
        let mut modules = Vec::new();
        for resolver in &self.resolvers {
            modules.extend(resolver.discover(prefix, env)?);
        }
        Ok(modules)
    }

    fn load(&self, spec: &str, env: &dyn Environment) -> Result<LoadedModule> {
        match self.resolvers.iter().find(|r| r.provides(spec, env)) {
            Some(resolver) => resolver.load(spec, env),
            None => Err(Error::plugin(spec, "module not found")),
        }
    }

    fn provides(&self, spec: &str, env: &dyn Environment) -> bool {
        self.resolvers.iter().any(|r| r.provides(spec, env))
    }
}
