//! pawn-core - layered option resolution for command-line tools
//!
//! This crate provides functionality to:
//! - Assemble an option grammar from built-ins, the tool and its plugins
//! - Resolve option values from the command line, a project config file and
//!   environment variables
//! - Decide whether to run in-process or hand over to a project-local install
pub mod config;
pub mod error;
pub mod format;
pub mod interfaces;
pub mod parser;
pub mod pawn;
pub mod plugins;
pub mod resolver;
pub mod schema;
pub mod services;
pub mod session;
pub mod target;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use interfaces::{Environment, EnvironmentProbe, Launcher, LoadedModule, ModuleResolver, Plugin, Program};
pub use parser::{FlagBag, ParseResult, RawArgs};
pub use pawn::{Outcome, Pawn};
pub use plugins::PluginRegistry;
pub use schema::{CollisionPolicy, MergedSchema, OptionDescriptor, OptionGroup, OptionKind, OptionSchema};
pub use session::Session;
pub use target::{ExecutionTarget, TargetState};
