//! Multi-pass configuration resolution
//!
//! 1. bootstrap parse against built-ins + tool options; apply `--cwd` and
//!    resolve `--configPath`
//! 2. load the config file (best effort)
//! 3. re-parse with config and environment layered beneath the command line
//!    and read the requested plugin list
//! 4. load plugins and extend the schema with their options
//! 5. stop here for `--help` / `--version`
//! 6. final strict parse against the extended schema

use crate::config::{ConfigLoader, ConfigObject};
use crate::error::Result;
use crate::interfaces::{Environment, ModuleResolver};
use crate::parser::{ArgumentParser, ParseLayers, ParseMode, ParseResult};
use crate::plugins::{PluginLoader, PluginRegistry};
use crate::schema::builtins::{CONFIG_PATH, CWD, HELP, PLUGINS, VERSION};
use crate::schema::{CollisionPolicy, MergedSchema, OptionGroup, OptionSchema};
use std::path::{Path, PathBuf};

/// How a resolution run ended
#[derive(Debug)]
pub enum Resolution {
    /// Final parse succeeded; ready to emit a session
    Complete {
        parsed: ParseResult,
        plugins: PluginRegistry,
        schema: MergedSchema,
    },
    /// `--help` was requested; carries the fully extended schema
    Help { schema: MergedSchema },
    /// `--version` was requested
    Version,
}

pub struct ConfigurationResolver<'a> {
    tool: &'a str,
    tool_options: &'a OptionSchema,
    modules: &'a dyn ModuleResolver,
    policy: CollisionPolicy,
}

impl<'a> ConfigurationResolver<'a> {
    pub fn new(tool: &'a str, tool_options: &'a OptionSchema, modules: &'a dyn ModuleResolver) -> Self {
        Self {
            tool,
            tool_options,
            modules,
            policy: CollisionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Schema every resolution starts from: built-ins plus the tool's options
    pub fn base_schema(&self) -> Result<MergedSchema> {
        MergedSchema::builtins().extend(self.tool_options, OptionGroup::General, self.policy)
    }

    pub fn resolve(&self, tokens: &[String], env: &mut dyn Environment) -> Result<Resolution> {
        let base = self.base_schema()?;

        let config_path = self.bootstrap(tokens, &base, env)?;
        let config = ConfigLoader::load(self.tool, config_path.as_deref(), env);

        let layered = ArgumentParser::new(self.tool, &base).parse(
            tokens,
            ParseLayers::new(&config, self.tool, env),
            ParseMode::Lenient,
        )?;
        tracing::debug!("Pass 2 resolved {} option(s)", layered.options.len());

        let requested = layered.get_list(PLUGINS);
        let plugins = PluginLoader::new(self.tool, self.modules).load(&requested, env)?;
        let schema = self.extend_with_plugins(base, &plugins)?;

        if layered.get_bool(HELP) {
            return Ok(Resolution::Help { schema });
        }
        if layered.get_bool(VERSION) {
            return Ok(Resolution::Version);
        }

        let parsed = self.final_pass(tokens, &schema, &config, env)?;
        Ok(Resolution::Complete {
            parsed,
            plugins,
            schema,
        })
    }

    /// Pass 1: only its `cwd` and `configPath` are used
    fn bootstrap(&self, tokens: &[String], schema: &MergedSchema, env: &mut dyn Environment) -> Result<Option<PathBuf>> {
        let first = ArgumentParser::new(self.tool, schema).parse(tokens, ParseLayers::none(), ParseMode::Lenient)?;

        if let Some(cwd) = first.get_str(CWD) {
            let target = env.resolve_path(Path::new(cwd))?;
            env.set_current_dir(&target)?;
            tracing::info!("Changed working directory to {:?}", target);
        }

        match first.get_str(CONFIG_PATH) {
            Some(path) => {
                let resolved = env.resolve_path(Path::new(path))?;
                tracing::debug!("Config path resolved to {:?}", resolved);
                Ok(Some(resolved))
            }
            None => Ok(None),
        }
    }

    fn extend_with_plugins(&self, mut schema: MergedSchema, plugins: &PluginRegistry) -> Result<MergedSchema> {
        for (id, plugin) in plugins.iter() {
            if let Some(options) = plugin.options() {
                schema = schema.extend(&options, OptionGroup::Plugin(id.to_string()), self.policy)?;
                tracing::debug!(
                    "Plugin '{}' added {} option(s), schema now v{}",
                    id,
                    options.len(),
                    schema.version()
                );
            }
        }
        Ok(schema)
    }

    fn final_pass(
        &self,
        tokens: &[String],
        schema: &MergedSchema,
        config: &ConfigObject,
        env: &dyn Environment,
    ) -> Result<ParseResult> {
        ArgumentParser::new(self.tool, schema).parse(tokens, ParseLayers::new(config, self.tool, env), ParseMode::Strict)
    }
}
