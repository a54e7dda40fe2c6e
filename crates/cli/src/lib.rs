pub mod plugins;
pub mod program;

use pawn_core::services::{ChainedModuleResolver, ManifestModuleResolver, StaticModuleResolver};
use pawn_core::Pawn;
use std::path::PathBuf;

// Re-export commonly used items
pub use plugins::{JsonFormat, JSON_MODULE};
pub use program::{EchoProgram, SessionDump};

/// Directory, relative to the working directory, holding plugin manifests
pub const PLUGINS_DIR: &str = ".pawn/plugins";

/// The `pawn` tool as the binary runs it
pub fn build(executable: Option<PathBuf>) -> Pawn {
    let modules = ChainedModuleResolver::new()
        .with(StaticModuleResolver::new().with_module(JSON_MODULE, JsonFormat))
        .with(ManifestModuleResolver::new(PLUGINS_DIR));

    Pawn::new("pawn", EchoProgram::new(executable))
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_module_resolver(modules)
}
