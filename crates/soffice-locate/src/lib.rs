//! # soffice-locate
//!
//! Find the LibreOffice `soffice` executable so callers can run headless
//! conversions (`soffice --headless --convert-to docx …`) without asking
//! users to configure anything when LibreOffice is installed normally.
//!
//! ## How it works
//!
//! On the first call to [`locate_soffice`]:
//!
//! 1. `SOFFICE_PATH` wins if set. It must name an existing file.
//! 2. `soffice` and then `libreoffice` are looked up on `PATH`.
//! 3. The well-known install locations for the current platform are probed.
//!
//! The result is cached for the lifetime of the process.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use soffice_locate::{locate_soffice, soffice_version};
//!
//! let soffice = locate_soffice().expect("LibreOffice not installed");
//! println!("{} ({})", soffice.display(), soffice_version(&soffice).unwrap_or_default());
//! ```
//!
//! ## Platform search locations
//!
//! | OS      | Locations probed after `PATH` |
//! |---------|-------------------------------|
//! | macOS   | `/Applications/LibreOffice.app/Contents/MacOS/soffice`, `~/Applications/…` |
//! | Linux   | `/usr/bin`, `/usr/local/bin`, `/usr/lib/libreoffice/program`, `/opt/libreoffice*/program`, `/snap/bin` |
//! | Windows | `%ProgramFiles%\LibreOffice\program\soffice.exe`, `%ProgramFiles(x86)%\…` |

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variable naming an explicit `soffice` executable.
pub const SOFFICE_PATH_ENV: &str = "SOFFICE_PATH";

/// Executable names looked up on `PATH`, in order.
const PATH_NAMES: [&str; 2] = ["soffice", "libreoffice"];

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by soffice-locate operations.
#[derive(Error, Debug)]
pub enum LocateError {
    /// `SOFFICE_PATH` is set but does not point at a file.
    #[error("SOFFICE_PATH is set to '{path}' but no such file exists")]
    EnvPathMissing { path: PathBuf },

    /// Nothing was found on `PATH` or in any of the probed locations.
    #[error(
        "LibreOffice (soffice) was not found.\n\
Install LibreOffice, put `soffice` on PATH, or set SOFFICE_PATH.\n\
Probed: {}",
        .probed.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    NotFound { probed: Vec<PathBuf> },

    /// The binary exists but `--version` could not be run.
    #[error("Failed to run '{path}' --version: {reason}")]
    Version { path: PathBuf, reason: String },
}

// ── Platform search locations ────────────────────────────────────────────────

/// Well-known install locations for the current platform, most likely first.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut out = Vec::new();

    match std::env::consts::OS {
        "macos" => {
            out.push(PathBuf::from(
                "/Applications/LibreOffice.app/Contents/MacOS/soffice",
            ));
            if let Some(home) = dirs::home_dir() {
                out.push(home.join("Applications/LibreOffice.app/Contents/MacOS/soffice"));
            }
        }
        "windows" => {
            for var in ["ProgramFiles", "ProgramFiles(x86)", "ProgramW6432"] {
                if let Ok(base) = std::env::var(var) {
                    out.push(
                        PathBuf::from(base)
                            .join("LibreOffice")
                            .join("program")
                            .join("soffice.exe"),
                    );
                }
            }
        }
        _ => {
            out.push(PathBuf::from("/usr/bin/soffice"));
            out.push(PathBuf::from("/usr/local/bin/soffice"));
            out.push(PathBuf::from("/usr/lib/libreoffice/program/soffice"));
            out.push(PathBuf::from("/usr/lib64/libreoffice/program/soffice"));
            out.extend(opt_installs(Path::new("/opt")));
            out.push(PathBuf::from("/snap/bin/libreoffice"));
        }
    }

    out
}

/// `/opt/libreoffice*/program/soffice`, in reverse lexical order.
fn opt_installs(opt: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(opt) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("libreoffice"))
        .map(|e| e.path().join("program").join("soffice"))
        .collect();
    dirs.sort();
    dirs.reverse();
    dirs
}

// ── Thread-safe singleton path cache ─────────────────────────────────────────

static RESOLVED_PATH: OnceLock<PathBuf> = OnceLock::new();

// ── Public API ───────────────────────────────────────────────────────────────

/// Locate `soffice`, caching the first successful answer for the process.
///
/// Failures are not cached, so installing LibreOffice while a long-running
/// process is alive is picked up on the next call.
pub fn locate_soffice() -> Result<PathBuf, LocateError> {
    if let Some(path) = RESOLVED_PATH.get() {
        return Ok(path.clone());
    }

    let path = find_soffice()?;
    let _ = RESOLVED_PATH.set(path.clone());
    Ok(path)
}

/// Locate `soffice` without touching the process-wide cache.
pub fn find_soffice() -> Result<PathBuf, LocateError> {
    if let Some(explicit) = std::env::var_os(SOFFICE_PATH_ENV) {
        let path = PathBuf::from(explicit);
        if path.is_file() {
            return Ok(path);
        }
        return Err(LocateError::EnvPathMissing { path });
    }

    for name in PATH_NAMES {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    let probed = candidate_paths();
    let found = probed.iter().find(|p| p.is_file()).cloned();
    found.ok_or(LocateError::NotFound { probed })
}

/// Returns `true` if a `soffice` binary can be found.
pub fn is_soffice_available() -> bool {
    locate_soffice().is_ok()
}

/// Run `<path> --version` and return its first non-empty output line,
/// e.g. `LibreOffice 7.6.4.1 60(Build:1)`.
pub fn soffice_version(path: &Path) -> Result<String, LocateError> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .map_err(|e| LocateError::Version {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(LocateError::Version {
            path: path.to_path_buf(),
            reason: format!("exited with {}", output.status),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_paths_are_absolute() {
        for p in candidate_paths() {
            assert!(p.is_absolute(), "candidate should be absolute: {}", p.display());
        }
    }

    #[test]
    fn opt_installs_in_reverse_lexical_order() {
        let opt = tempfile::tempdir().unwrap();
        std::fs::create_dir(opt.path().join("libreoffice7.5")).unwrap();
        std::fs::create_dir(opt.path().join("libreoffice24.2")).unwrap();
        std::fs::create_dir(opt.path().join("unrelated")).unwrap();

        let found = opt_installs(opt.path());
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with(opt.path().join("libreoffice7.5")));
        assert!(found.iter().all(|p| p.ends_with("program/soffice")));
    }

    #[test]
    fn opt_installs_missing_dir_is_empty() {
        assert!(opt_installs(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn not_found_message_lists_probed_paths() {
        let e = LocateError::NotFound {
            probed: vec![PathBuf::from("/usr/bin/soffice")],
        };
        let msg = e.to_string();
        assert!(msg.contains("/usr/bin/soffice"), "got: {msg}");
        assert!(msg.contains(SOFFICE_PATH_ENV));
    }

    #[test]
    fn version_of_missing_binary_fails() {
        let err = soffice_version(Path::new("/definitely/not/soffice")).unwrap_err();
        assert!(matches!(err, LocateError::Version { .. }));
    }
}
