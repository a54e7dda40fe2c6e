//! Delegation interface
//!
//! Hands the invocation over to a project-local installation.

use crate::error::Result;
use std::path::Path;

/// Trait for running a delegate installation
pub trait Launcher: Send + Sync {
    /// Run `entry` with `args` from `cwd`; returns once it has finished
    fn launch(&self, entry: &Path, args: &[String], cwd: &Path) -> Result<()>;
}
