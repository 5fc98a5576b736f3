//! The scoped conversion directory.
//!
//! A [`ConversionWorkspace`] owns a fresh temporary directory for exactly one
//! convert-then-parse step. Dropping it removes the directory and everything
//! in it, so every exit path (success, converter failure, parser failure,
//! panic) cleans up. [`ConversionWorkspace::close`] does the same removal
//! explicitly and reports whether it worked.

use crate::error::PartitionError;
use crate::pipeline::convert::ContainerFormat;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

const DIR_PREFIX: &str = "docpart-convert-";

/// Temporary directory bracketing one conversion.
#[derive(Debug)]
pub struct ConversionWorkspace {
    dir: TempDir,
}

impl ConversionWorkspace {
    /// Create a uniquely named directory under `root`, or the OS temp dir.
    pub fn create(root: Option<&Path>) -> Result<Self, PartitionError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(DIR_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| PartitionError::temp_storage("create conversion directory", e))?;

        debug!("Created conversion workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where a conforming converter writes its output for `base_filename`.
    ///
    /// The stem is joined as raw OS bytes, so names that are not valid UTF-8
    /// still match the file the converter writes.
    pub fn artifact_path(&self, base_filename: &OsStr, format: ContainerFormat) -> PathBuf {
        let mut name = base_filename.to_os_string();
        name.push(".");
        name.push(format.extension());
        self.dir.path().join(name)
    }

    /// Remove the directory now. Failure is logged and returned; the
    /// directory may then be left behind for the OS to reclaim.
    pub fn close(self) -> Result<(), PartitionError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            warn!("Failed to remove conversion workspace {}: {}", path.display(), e);
            PartitionError::temp_storage("remove conversion directory", e)
        })?;
        debug!("Removed conversion workspace {}", path.display());
        Ok(())
    }
}

/// File stem of `path`: directory and final extension stripped.
///
/// `/a/b/report.doc` → `report`, `archive.v2.doc` → `archive.v2`.
pub fn base_filename(path: &Path) -> Result<OsString, PartitionError> {
    path.file_stem()
        .filter(|s| !s.is_empty())
        .map(OsStr::to_os_string)
        .ok_or_else(|| {
            PartitionError::InvalidArgument(format!(
                "'{}' has no file name to derive the converted name from",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_filename_strips_dir_and_extension() {
        assert_eq!(base_filename(Path::new("/a/b/report.doc")).unwrap(), "report");
        assert_eq!(base_filename(Path::new("archive.v2.doc")).unwrap(), "archive.v2");
        assert_eq!(base_filename(Path::new("noext")).unwrap(), "noext");
    }

    #[test]
    fn base_filename_rejects_root() {
        assert!(base_filename(Path::new("/")).is_err());
    }

    #[test]
    fn artifact_path_uses_format_extension() {
        let ws = ConversionWorkspace::create(None).unwrap();
        let p = ws.artifact_path(OsStr::new("report"), ContainerFormat::Docx);
        assert_eq!(p, ws.path().join("report.docx"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_stem_survives_to_artifact_path() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let source = PathBuf::from(OsString::from_vec(b"/in/rep\xffort.doc".to_vec()));
        let stem = base_filename(&source).unwrap();
        assert_eq!(stem.as_bytes(), b"rep\xffort");

        let ws = ConversionWorkspace::create(None).unwrap();
        let artifact = ws.artifact_path(&stem, ContainerFormat::Docx);
        assert_eq!(
            artifact.file_name().unwrap().as_bytes(),
            b"rep\xffort.docx"
        );
        assert_eq!(artifact.parent().unwrap(), ws.path());
    }

    #[test]
    fn drop_removes_directory_and_contents() {
        let ws = ConversionWorkspace::create(None).unwrap();
        let path = ws.path().to_path_buf();
        std::fs::create_dir(path.join("nested")).unwrap();
        std::fs::write(path.join("nested/file.txt"), b"x").unwrap();
        drop(ws);
        assert!(!path.exists());
    }

    #[test]
    fn close_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let ws = ConversionWorkspace::create(Some(root.path())).unwrap();
        let path = ws.path().to_path_buf();
        assert!(path.starts_with(root.path()));
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(DIR_PREFIX));
        ws.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn create_in_missing_root_fails() {
        let err = ConversionWorkspace::create(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, PartitionError::TempStorage { .. }));
    }
}
