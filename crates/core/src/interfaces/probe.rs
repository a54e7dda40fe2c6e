//! Local installation probe interface

use super::Environment;
use crate::error::Result;
use std::path::PathBuf;

/// What the invocation explicitly asked for, as seen before any resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeRequest {
    pub cwd: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Facts the probe resolved on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Project base directory
    pub cwd: PathBuf,
    /// Config file found for the project
    pub config_path: Option<PathBuf>,
    /// Entry point of a project-local installation
    pub local_entry: Option<PathBuf>,
    /// Version of the project-local installation
    pub local_version: Option<String>,
}

impl ProbeReport {
    pub fn without_install(cwd: PathBuf) -> Self {
        Self {
            cwd,
            config_path: None,
            local_entry: None,
            local_version: None,
        }
    }
}

/// Trait for detecting a project-local installation of a tool
pub trait EnvironmentProbe: Send + Sync {
    fn probe(&self, tool: &str, request: &ProbeRequest, env: &dyn Environment) -> Result<ProbeReport>;
}
