//! Legacy-to-modern conversion: `.doc` → `.docx` via a [`LegacyConverter`].
//!
//! The orchestrator only ever talks to the trait, so the LibreOffice
//! subprocess used by default can be replaced by an in-process library, a
//! remote service, or a test double without touching the pipeline.
//!
//! ## Contract
//!
//! `convert(source, out_dir, format)` must write exactly one file,
//! `out_dir/<source stem>.<format extension>`. The orchestrator predicts that
//! name and hands it to the parser without checking it first; a converter
//! that names its output differently surfaces as a `FileNotFound` from the
//! parser.

use crate::error::PartitionError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};
use url::Url;

/// Converts a legacy document into a modern container format.
///
/// Implementations are called from a blocking thread and may block for as
/// long as the conversion takes. There is no timeout at this layer.
pub trait LegacyConverter: Send + Sync {
    /// Write `out_dir/<stem of source>.<format.extension()>`.
    fn convert(
        &self,
        source: &Path,
        out_dir: &Path,
        format: ContainerFormat,
    ) -> Result<(), PartitionError>;
}

/// Target container format of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// Office Open XML word-processing document.
    #[default]
    Docx,
}

impl ContainerFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Docx => "docx",
        }
    }

    /// Value passed to `soffice --convert-to`.
    pub fn soffice_target(&self) -> &'static str {
        match self {
            ContainerFormat::Docx => "docx",
        }
    }
}

/// Name of the per-conversion LibreOffice profile directory.
const PROFILE_DIR: &str = "lo-profile";

/// Runs `soffice --headless --convert-to <fmt> --outdir <dir> <source>`.
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    program: Option<PathBuf>,
    isolate_profile: bool,
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self {
            program: None,
            isolate_profile: true,
        }
    }
}

impl SofficeConverter {
    /// Discover `soffice` lazily via [`soffice_locate::locate_soffice`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit executable instead of discovery.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
            ..Self::default()
        }
    }

    /// Give every conversion its own LibreOffice user profile, created inside
    /// the output directory. Two `soffice` processes sharing one profile
    /// block each other, so this is on by default.
    pub fn isolate_profile(mut self, isolate: bool) -> Self {
        self.isolate_profile = isolate;
        self
    }

    fn program(&self, source: &Path) -> Result<PathBuf, PartitionError> {
        if let Some(ref p) = self.program {
            return Ok(p.clone());
        }
        soffice_locate::locate_soffice().map_err(|e| PartitionError::ConversionFailed {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Arguments passed to `soffice`, exposed for logging and tests.
    pub fn command_args(
        &self,
        source: &Path,
        out_dir: &Path,
        format: ContainerFormat,
    ) -> Result<Vec<OsString>, PartitionError> {
        let mut args: Vec<OsString> = Vec::with_capacity(8);
        if self.isolate_profile {
            let profile = file_url(&out_dir.join(PROFILE_DIR)).map_err(|reason| {
                PartitionError::ConversionFailed {
                    path: source.to_path_buf(),
                    reason,
                }
            })?;
            args.push(format!("-env:UserInstallation={profile}").into());
        }
        args.push("--headless".into());
        args.push("--convert-to".into());
        args.push(format.soffice_target().into());
        args.push("--outdir".into());
        args.push(out_dir.as_os_str().to_owned());
        args.push(source.as_os_str().to_owned());
        Ok(args)
    }
}

impl LegacyConverter for SofficeConverter {
    fn convert(
        &self,
        source: &Path,
        out_dir: &Path,
        format: ContainerFormat,
    ) -> Result<(), PartitionError> {
        let program = self.program(source)?;
        let args = self.command_args(source, out_dir, format)?;
        debug!("Running {} {:?}", program.display(), args);

        let output = Command::new(&program).args(&args).output().map_err(|e| {
            let reason = if e.kind() == std::io::ErrorKind::NotFound {
                format!(
                    "'{}' was not found. Install LibreOffice or set SOFFICE_PATH.",
                    program.display()
                )
            } else {
                format!("failed to execute '{}': {}", program.display(), e)
            };
            PartitionError::ConversionFailed {
                path: source.to_path_buf(),
                reason,
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            info!("{}", stdout);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PartitionError::ConversionFailed {
                path: source.to_path_buf(),
                reason: format!("soffice exited with {}: {}", output.status, stderr.trim()),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("soffice stderr: {}", stderr.trim());
        }

        Ok(())
    }
}

/// Percent-encoded `file://` URL for a local path, as LibreOffice expects
/// for `-env:` values. Relative paths are made absolute first.
fn file_url(path: &Path) -> Result<String, String> {
    let absolute = std::path::absolute(path)
        .map_err(|e| format!("cannot resolve '{}': {}", path.display(), e))?;
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|_| format!("cannot express '{}' as a file:// URL", absolute.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docx_extension() {
        assert_eq!(ContainerFormat::Docx.extension(), "docx");
        assert_eq!(ContainerFormat::default(), ContainerFormat::Docx);
    }

    #[test]
    fn command_args_order() {
        let conv = SofficeConverter::with_program("/usr/bin/soffice").isolate_profile(false);
        let args = conv.command_args(
            Path::new("/a/b/report.doc"),
            Path::new("/tmp/work"),
            ContainerFormat::Docx,
        )
        .unwrap();
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--headless",
                "--convert-to",
                "docx",
                "--outdir",
                "/tmp/work",
                "/a/b/report.doc"
            ]
        );
    }

    #[test]
    fn isolated_profile_lives_in_out_dir() {
        let conv = SofficeConverter::new();
        let args = conv.command_args(
            Path::new("report.doc"),
            Path::new("/tmp/work"),
            ContainerFormat::Docx,
        )
        .unwrap();
        let first = args[0].to_string_lossy().into_owned();
        assert_eq!(first, "-env:UserInstallation=file:///tmp/work/lo-profile");
    }

    #[cfg(unix)]
    #[test]
    fn file_url_percent_encodes_reserved_characters() {
        assert_eq!(file_url(Path::new("/tmp/x")).unwrap(), "file:///tmp/x");
        assert_eq!(
            file_url(Path::new("/tmp/My Docs/50% #1")).unwrap(),
            "file:///tmp/My%20Docs/50%25%20%231"
        );
    }

    #[cfg(windows)]
    #[test]
    fn file_url_windows_drive() {
        assert_eq!(
            file_url(Path::new("C:\\Users\\A B\\x")).unwrap(),
            "file:///C:/Users/A%20B/x"
        );
    }

    #[cfg(unix)]
    #[test]
    fn relative_out_dir_profile_is_absolute() {
        let conv = SofficeConverter::new();
        let args = conv
            .command_args(Path::new("a.doc"), Path::new("work"), ContainerFormat::Docx)
            .unwrap();
        let first = args[0].to_string_lossy().into_owned();
        let cwd = std::env::current_dir().unwrap();
        let expected = Url::from_file_path(cwd.join("work/lo-profile")).unwrap();
        assert_eq!(first, format!("-env:UserInstallation={expected}"));
    }

    #[test]
    fn missing_program_is_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let conv = SofficeConverter::with_program("/definitely/not/soffice");
        let err = conv
            .convert(Path::new("memo.doc"), dir.path(), ContainerFormat::Docx)
            .unwrap_err();
        match err {
            PartitionError::ConversionFailed { path, reason } => {
                assert_eq!(path, PathBuf::from("memo.doc"));
                assert!(reason.contains("not found"), "got: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let conv = SofficeConverter::with_program("/bin/false").isolate_profile(false);
        let err = conv
            .convert(Path::new("memo.doc"), dir.path(), ContainerFormat::Docx)
            .unwrap_err();
        assert!(matches!(err, PartitionError::ConversionFailed { .. }));
    }
}
