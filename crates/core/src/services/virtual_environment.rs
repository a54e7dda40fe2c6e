//! In-memory environment
//!
//! Holds its own working directory and variables so resolutions can run
//! side by side (tests, embedding) without touching process state.

use crate::error::{Error, Result};
use crate::interfaces::Environment;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct VirtualEnvironment {
    cwd: PathBuf,
    vars: HashMap<String, String>,
    exe: Option<PathBuf>,
}

impl VirtualEnvironment {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            vars: HashMap::new(),
            exe: None,
        }
    }

    /// Builder method for an environment variable
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Builder method for the running executable
    pub fn with_exe(mut self, exe: impl Into<PathBuf>) -> Self {
        self.exe = Some(exe.into());
        self
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove_var(&mut self, key: &str) {
        self.vars.remove(key);
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl Environment for VirtualEnvironment {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn set_current_dir(&mut self, dir: &Path) -> Result<()> {
        let target = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.cwd.join(dir)
        };
        if !target.is_dir() {
            return Err(Error::WorkingDirectory {
                path: target,
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            });
        }
        tracing::debug!("Virtual cwd {:?} -> {:?}", self.cwd, target);
        self.cwd = target;
        Ok(())
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        self.exe.clone()
    }
}
