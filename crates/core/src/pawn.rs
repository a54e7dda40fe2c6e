//! Entry point tying resolution, session emission and delegation together

use crate::error::{Error, Result};
use crate::format::{default_usage, help_text, version_banner};
use crate::interfaces::{Environment, EnvironmentProbe, Launcher, ModuleResolver, ProbeRequest, Program};
use crate::parser::{ArgumentParser, ParseLayers, ParseMode, RawArgs};
use crate::resolver::{ConfigurationResolver, Resolution};
use crate::schema::builtins::{CONFIG_PATH, CWD, VERSION};
use crate::schema::{CollisionPolicy, MergedSchema};
use crate::services::{LocalInstallProbe, ProcessLauncher, StaticModuleResolver};
use crate::session::{Session, SessionEmitter};
use crate::target::{reconcile, ExecutionTarget, ExecutionTargetResolver, TargetEvent, TargetState};
use std::path::PathBuf;

/// What a run produced
#[derive(Debug)]
pub enum Outcome {
    /// The program ran against this session
    Executed(Session),
    /// Help text to print
    Help(String),
    /// Version banner to print
    Version(String),
    /// A local installation ran instead
    Delegated { entry: PathBuf },
}

/// A command-line tool: a name, a program and its collaborators
pub struct Pawn {
    name: String,
    version: String,
    usage: Option<String>,
    program: Box<dyn Program>,
    modules: Box<dyn ModuleResolver>,
    probe: Box<dyn EnvironmentProbe>,
    launcher: Box<dyn Launcher>,
    policy: CollisionPolicy,
}

impl Pawn {
    pub fn new(name: impl Into<String>, program: impl Program + 'static) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            usage: None,
            program: Box::new(program),
            modules: Box::new(StaticModuleResolver::new()),
            probe: Box::new(LocalInstallProbe::new()),
            launcher: Box::new(ProcessLauncher::new()),
            policy: CollisionPolicy::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Usage line for help output; takes precedence over the program's
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_module_resolver(mut self, modules: impl ModuleResolver + 'static) -> Self {
        self.modules = Box::new(modules);
        self
    }

    pub fn with_probe(mut self, probe: impl EnvironmentProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn usage_line(&self) -> String {
        self.usage
            .clone()
            .or_else(|| self.program.usage())
            .unwrap_or_else(|| default_usage(&self.name))
    }

    /// Resolve options and run the program in this process
    pub fn execute(&self, args: impl Into<RawArgs>, env: &mut dyn Environment) -> Result<Outcome> {
        self.execute_here(args.into(), env, None)
    }

    /// `local_version` is set when this process is the project-local install
    fn execute_here(&self, args: RawArgs, env: &mut dyn Environment, local_version: Option<&str>) -> Result<Outcome> {
        let tokens = args.to_tokens();
        let tool_options = self.program.options();
        let resolver =
            ConfigurationResolver::new(&self.name, &tool_options, self.modules.as_ref()).with_policy(self.policy);

        match resolver.resolve(&tokens, env)? {
            Resolution::Help { schema } => Ok(Outcome::Help(help_text(&self.name, &schema, &self.usage_line()))),
            Resolution::Version => Ok(Outcome::Version(version_banner(&self.version, local_version))),
            Resolution::Complete { parsed, plugins, .. } => {
                SessionEmitter::emit(parsed, plugins, self.program.as_ref()).map(Outcome::Executed)
            }
        }
    }

    /// Process entry: run here, or hand over to a project-local installation
    pub fn run_from_cli<I, S>(&self, argv: I, env: &mut dyn Environment) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = argv.into_iter().map(Into::into).collect();
        let builtins = MergedSchema::builtins();
        let first = ArgumentParser::new(&self.name, &builtins).parse(&tokens, ParseLayers::none(), ParseMode::Lenient)?;
        let request = ProbeRequest {
            cwd: first.get_str(CWD).map(PathBuf::from),
            config_path: first.get_str(CONFIG_PATH).map(PathBuf::from),
        };

        let mut state = TargetState::Probing;
        let mut outcome = None;
        loop {
            state = match state {
                TargetState::Probing => ExecutionTargetResolver::new(&self.name, self.probe.as_ref()).resolve(&request, env)?,
                TargetState::SelfTarget(target) => {
                    let args = reconcile(&tokens, &target.resolved_facts);
                    outcome = Some(self.execute_here(args.into(), env, target.local_version.as_deref())?);
                    TargetState::SelfTarget(target).transition(TargetEvent::Dispatched)?
                }
                TargetState::Delegating(target) => {
                    outcome = Some(if first.get_bool(VERSION) {
                        let local = target.local_version.as_deref().unwrap_or("unknown");
                        Outcome::Version(version_banner(&self.version, Some(local)))
                    } else {
                        self.delegate(&tokens, &target, env)?
                    });
                    TargetState::Delegating(target).transition(TargetEvent::Dispatched)?
                }
                TargetState::Done(_) => break,
            };
        }

        outcome.ok_or_else(|| Error::Probe("no execution target was dispatched".to_string()))
    }

    fn delegate(&self, tokens: &[String], target: &ExecutionTarget, env: &dyn Environment) -> Result<Outcome> {
        let entry = target
            .delegate_entry
            .clone()
            .ok_or_else(|| Error::Probe("delegation without a local entry".to_string()))?;
        let cwd = match &target.resolved_facts.cwd {
            Some(cwd) => cwd.clone(),
            None => env.current_dir()?,
        };
        let args = reconcile(tokens, &target.resolved_facts);

        self.launcher.launch(&entry, &args, &cwd)?;
        Ok(Outcome::Delegated { entry })
    }
}
