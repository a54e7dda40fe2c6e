//! Environment backed by the real process

use crate::error::{Error, Result};
use crate::interfaces::Environment;
use std::path::{Path, PathBuf};

/// The running process's working directory and environment variables.
///
/// Changing the working directory through this type affects the whole
/// process; concurrent resolutions sharing it are not supported.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for ProcessEnvironment {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn set_current_dir(&mut self, dir: &Path) -> Result<()> {
        std::env::set_current_dir(dir).map_err(|source| Error::WorkingDirectory {
            path: dir.to_path_buf(),
            source,
        })
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }
}
