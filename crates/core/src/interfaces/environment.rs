//! Environment context interface
//!
//! Every component reads the working directory and environment variables
//! through this trait, so the one process-wide side effect (changing the
//! working directory) is explicit and can be replaced in tests.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Trait for access to process-level state
pub trait Environment {
    /// Current working directory
    fn current_dir(&self) -> Result<PathBuf>;

    /// Change the working directory
    fn set_current_dir(&mut self, dir: &Path) -> Result<()>;

    /// Read an environment variable
    fn var(&self, key: &str) -> Option<String>;

    /// Path of the executable currently running, if known
    fn current_exe(&self) -> Option<PathBuf>;

    /// Resolve `path` against the current working directory
    fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.current_dir()?.join(path))
        }
    }
}
