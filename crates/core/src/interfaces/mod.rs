//! Collaborator interfaces
//!
//! The engine talks to everything outside of it (process state, the tool's
//! program, plugin modules, install detection, delegation) through these
//! traits. Default implementations live in [`crate::services`].

pub mod environment;
pub mod launcher;
pub mod module_resolver;
pub mod plugin;
pub mod probe;
pub mod program;

pub use environment::Environment;
pub use launcher::Launcher;
pub use module_resolver::ModuleResolver;
pub use plugin::{LoadedModule, Plugin};
pub use probe::{EnvironmentProbe, ProbeReport, ProbeRequest};
pub use program::Program;
