//! Choosing between this process and a project-local installation
//!
//! ```text
//! Probing --probed--> SelfTarget --dispatched--> Done
//!         \--probed--> Delegating --dispatched--> Done
//! ```

use crate::error::{Error, Result};
use crate::interfaces::{Environment, EnvironmentProbe, ProbeReport, ProbeRequest};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod reconcile;

pub use reconcile::reconcile;

/// Working directory and config path as the probe resolved them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFacts {
    pub cwd: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Which installation runs this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTarget {
    pub is_self: bool,
    pub delegate_entry: Option<PathBuf>,
    pub resolved_facts: ResolvedFacts,
    pub local_version: Option<String>,
}

impl ExecutionTarget {
    /// Decide from a probe report. A local install that is the running
    /// executable counts as self.
    pub fn from_report(report: ProbeReport, current_exe: Option<&Path>) -> Self {
        let resolved_facts = ResolvedFacts {
            cwd: Some(report.cwd),
            config_path: report.config_path,
        };
        let delegate_entry = report
            .local_entry
            .filter(|entry| !current_exe.is_some_and(|exe| same_file(entry, exe)));

        Self {
            is_self: delegate_entry.is_none(),
            delegate_entry,
            resolved_facts,
            local_version: report.local_version,
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetState {
    Probing,
    SelfTarget(ExecutionTarget),
    Delegating(ExecutionTarget),
    Done(ExecutionTarget),
}

#[derive(Debug)]
pub enum TargetEvent {
    Probed {
        report: ProbeReport,
        current_exe: Option<PathBuf>,
    },
    Dispatched,
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetState::Probing => "probing",
            TargetState::SelfTarget(_) => "self",
            TargetState::Delegating(_) => "delegating",
            TargetState::Done(_) => "done",
        };
        f.write_str(name)
    }
}

impl TargetState {
    pub fn transition(self, event: TargetEvent) -> Result<TargetState> {
        let next = match (self, event) {
            (TargetState::Probing, TargetEvent::Probed { report, current_exe }) => {
                let target = ExecutionTarget::from_report(report, current_exe.as_deref());
                if target.is_self {
                    TargetState::SelfTarget(target)
                } else {
                    TargetState::Delegating(target)
                }
            }
            (TargetState::SelfTarget(target) | TargetState::Delegating(target), TargetEvent::Dispatched) => {
                TargetState::Done(target)
            }
            (state, event) => {
                return Err(Error::Probe(format!("unexpected {event:?} while {state}")));
            }
        };
        tracing::debug!("Execution target -> {}", next);
        Ok(next)
    }

    pub fn target(&self) -> Option<&ExecutionTarget> {
        match self {
            TargetState::Probing => None,
            TargetState::SelfTarget(target) | TargetState::Delegating(target) | TargetState::Done(target) => {
                Some(target)
            }
        }
    }
}

/// Runs the probe and moves out of `Probing`
pub struct ExecutionTargetResolver<'a> {
    tool: &'a str,
    probe: &'a dyn EnvironmentProbe,
}

impl<'a> ExecutionTargetResolver<'a> {
    pub fn new(tool: &'a str, probe: &'a dyn EnvironmentProbe) -> Self {
        Self { tool, probe }
    }

    pub fn resolve(&self, request: &ProbeRequest, env: &dyn Environment) -> Result<TargetState> {
        let report = self.probe.probe(self.tool, request, env)?;
        TargetState::Probing.transition(TargetEvent::Probed {
            report,
            current_exe: env.current_exe(),
        })
    }
}
