//! Filesystem probe for project-local installations
//!
//! Starting from the requested (or current) directory, walks parent
//! directories looking for the tool's config file. The directory holding it
//! is the project base. A local installation lives under `<base>/.<tool>/`:
//!
//! ```text
//! <base>/
//!   pawnfile.json
//!   .pawn/
//!     install.json        { "version": "1.2.0", "entry": "bin/pawn" }   (optional)
//!     bin/pawn            default entry
//! ```

use crate::config::document::DocumentFormat;
use crate::config::loader::default_config_name;
use crate::error::{Error, Result};
use crate::interfaces::{Environment, EnvironmentProbe, ProbeReport, ProbeRequest};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

const INSTALL_MANIFEST: &str = "install.json";

/// Optional description of a local installation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallManifest {
    #[serde(default)]
    pub version: Option<String>,
    /// Entry point, relative to the install directory
    #[serde(default)]
    pub entry: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct LocalInstallProbe;

impl LocalInstallProbe {
    pub fn new() -> Self {
        Self
    }

    /// Directory a local installation of `tool` lives in
    pub fn install_dir(base: &Path, tool: &str) -> PathBuf {
        base.join(format!(".{tool}"))
    }

    /// Default entry point of a local installation
    pub fn default_entry(tool: &str) -> PathBuf {
        Path::new("bin").join(format!("{tool}{}", std::env::consts::EXE_SUFFIX))
    }

    fn is_file(path: &Path) -> Result<bool> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Probe(format!("cannot inspect {}: {e}", path.display()))),
        }
    }

    /// Walk up from `start` looking for the tool's config file
    fn find_config(tool: &str, start: &Path) -> Result<Option<PathBuf>> {
        for dir in start.ancestors() {
            for format in DocumentFormat::ALL {
                let candidate = dir.join(default_config_name(tool, format));
                if Self::is_file(&candidate)? {
                    return Ok(Some(candidate));
                }
            }
        }
        Ok(None)
    }

    fn read_manifest(install_dir: &Path) -> Result<InstallManifest> {
        let path = install_dir.join(INSTALL_MANIFEST);
        if !Self::is_file(&path)? {
            return Ok(InstallManifest::default());
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Probe(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Probe(format!("invalid {}: {e}", path.display())))
    }
}

impl EnvironmentProbe for LocalInstallProbe {
    fn probe(&self, tool: &str, request: &ProbeRequest, env: &dyn Environment) -> Result<ProbeReport> {
        let current = env
            .current_dir()
            .map_err(|e| Error::Probe(format!("cannot determine working directory: {e}")))?;
        let start = match &request.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => current.join(cwd),
            None => current,
        };
        if !start.is_dir() {
            return Err(Error::Probe(format!("{} is not a directory", start.display())));
        }

        let config_path = match &request.config_path {
            Some(path) if path.is_absolute() => Some(path.clone()),
            Some(path) => Some(start.join(path)),
            None => Self::find_config(tool, &start)?,
        };

        let base = match (&request.cwd, &config_path) {
            (None, Some(config)) => config.parent().map(Path::to_path_buf).unwrap_or(start),
            _ => start,
        };

        let install_dir = Self::install_dir(&base, tool);
        let manifest = Self::read_manifest(&install_dir)?;
        let entry = install_dir.join(manifest.entry.clone().unwrap_or_else(|| Self::default_entry(tool)));
        let local_entry = if Self::is_file(&entry)? { Some(entry) } else { None };

        tracing::debug!(
            "Probe for '{}': base {:?}, config {:?}, local entry {:?}",
            tool,
            base,
            config_path,
            local_entry
        );

        Ok(ProbeReport {
            local_version: local_entry.as_ref().and(manifest.version),
            cwd: base,
            config_path,
            local_entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::VirtualEnvironment;
    use std::fs;
    use tempfile::TempDir;

    fn install(base: &Path, version: Option<&str>) -> PathBuf {
        let dir = LocalInstallProbe::install_dir(base, "pawn");
        let entry = dir.join(LocalInstallProbe::default_entry("pawn"));
        fs::create_dir_all(entry.parent().unwrap()).unwrap();
        fs::write(&entry, "").unwrap();
        if let Some(version) = version {
            fs::write(dir.join(INSTALL_MANIFEST), format!(r#"{{"version": "{version}"}}"#)).unwrap();
        }
        entry
    }

    #[test]
    fn test_no_config_no_install() {
        let temp = TempDir::new().unwrap();
        let env = VirtualEnvironment::new(temp.path());

        let report = LocalInstallProbe.probe("pawn", &ProbeRequest::default(), &env).unwrap();
        assert_eq!(report, ProbeReport::without_install(temp.path().to_path_buf()));
    }

    #[test]
    fn test_walks_up_to_project_base() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src/deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("pawnfile.toml"), "arg = \"value\"\n").unwrap();
        let entry = install(temp.path(), Some("2.0.0"));

        let env = VirtualEnvironment::new(&nested);
        let report = LocalInstallProbe.probe("pawn", &ProbeRequest::default(), &env).unwrap();

        assert_eq!(report.cwd, temp.path());
        assert_eq!(report.config_path, Some(temp.path().join("pawnfile.toml")));
        assert_eq!(report.local_entry, Some(entry));
        assert_eq!(report.local_version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_explicit_cwd_is_kept() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let env = VirtualEnvironment::new(temp.path());
        let request = ProbeRequest {
            cwd: Some(PathBuf::from("project")),
            config_path: Some(PathBuf::from("conf/custom.json")),
        };
        let report = LocalInstallProbe.probe("pawn", &request, &env).unwrap();

        assert_eq!(report.cwd, project);
        assert_eq!(report.config_path, Some(project.join("conf/custom.json")));
        assert_eq!(report.local_entry, None);
    }

    #[test]
    fn test_manifest_relocates_entry() {
        let temp = TempDir::new().unwrap();
        let dir = LocalInstallProbe::install_dir(temp.path(), "pawn");
        fs::create_dir_all(dir.join("libexec")).unwrap();
        fs::write(dir.join("libexec/pawn-local"), "").unwrap();
        fs::write(
            dir.join(INSTALL_MANIFEST),
            r#"{"version": "0.9.0", "entry": "libexec/pawn-local"}"#,
        )
        .unwrap();

        let env = VirtualEnvironment::new(temp.path());
        let report = LocalInstallProbe.probe("pawn", &ProbeRequest::default(), &env).unwrap();
        assert_eq!(report.local_entry, Some(dir.join("libexec/pawn-local")));
    }

    #[test]
    fn test_missing_start_directory_fails() {
        let temp = TempDir::new().unwrap();
        let env = VirtualEnvironment::new(temp.path().join("gone"));

        let err = LocalInstallProbe.probe("pawn", &ProbeRequest::default(), &env).unwrap_err();
        assert!(matches!(err, Error::Probe(_)));
    }

    #[test]
    fn test_invalid_install_manifest_fails() {
        let temp = TempDir::new().unwrap();
        let dir = LocalInstallProbe::install_dir(temp.path(), "pawn");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(INSTALL_MANIFEST), "{ nope").unwrap();

        let env = VirtualEnvironment::new(temp.path());
        let err = LocalInstallProbe.probe("pawn", &ProbeRequest::default(), &env).unwrap_err();
        assert!(matches!(err, Error::Probe(_)));
    }
}
