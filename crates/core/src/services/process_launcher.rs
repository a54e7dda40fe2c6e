//! Launches a local installation as a child process

use crate::error::{Error, Result};
use crate::interfaces::Launcher;
use std::path::Path;
use std::process::Command;

/// Runs the delegate with inherited stdio and waits for it
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, entry: &Path, args: &[String], cwd: &Path) -> Result<()> {
        tracing::info!("Delegating to {} {}", entry.display(), args.join(" "));

        let status = Command::new(entry)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| Error::DelegateSpawn {
                entry: entry.to_path_buf(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::DelegateExit {
                entry: entry.to_path_buf(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_entry_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("no-such-binary");

        let err = ProcessLauncher.launch(&entry, &[], temp.path()).unwrap_err();
        assert!(matches!(err, Error::DelegateSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_entry_reports_exit_code() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("pawn");
        std::fs::write(&entry, "#!/bin/sh\nexit 3\n").unwrap();
        std::fs::set_permissions(&entry, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = ProcessLauncher.launch(&entry, &["--arg".into(), "x".into()], temp.path()).unwrap_err();
        assert!(matches!(err, Error::DelegateExit { code: Some(3), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_entry_runs_in_cwd() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("pawn");
        std::fs::write(&entry, "#!/bin/sh\ntouch ran\n").unwrap();
        std::fs::set_permissions(&entry, std::fs::Permissions::from_mode(0o755)).unwrap();

        ProcessLauncher.launch(&entry, &[], temp.path()).unwrap();
        assert!(temp.path().join("ran").is_file());
    }
}
