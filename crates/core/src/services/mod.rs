//! Default collaborator implementations
//!
//! Concrete implementations of the traits in [`crate::interfaces`], used by
//! the `pawn` binary and available to any tool built on the engine.

pub mod chained_module_resolver;
pub mod local_install_probe;
pub mod manifest_module_resolver;
pub mod process_environment;
pub mod process_launcher;
pub mod static_module_resolver;
pub mod virtual_environment;

pub use chained_module_resolver::ChainedModuleResolver;
pub use local_install_probe::{InstallManifest, LocalInstallProbe};
pub use manifest_module_resolver::{ManifestModuleResolver, PluginManifest};
pub use process_environment::ProcessEnvironment;
pub use process_launcher::ProcessLauncher;
pub use static_module_resolver::StaticModuleResolver;
pub use virtual_environment::VirtualEnvironment;
