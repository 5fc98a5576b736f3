//! Error types for the edgequake-docpart library.
//!
//! Every failure surfaces immediately as a [`PartitionError`]; nothing is
//! retried or swallowed inside the pipeline. Variants carry the offending
//! path so a caller can diagnose the failure from the message alone.
//!
//! [`PartitionError::kind`] collapses the variants into the small
//! [`ErrorKind`] taxonomy callers usually branch on (bad arguments, missing
//! file, converter failure, parser failure).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-docpart library.
#[derive(Debug, Error)]
pub enum PartitionError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Neither or both of {path, stream} were supplied, or the path is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file that should exist does not (input document or converted artifact).
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// The legacy-to-modern converter is missing or reported failure.
    #[error("Conversion of '{path}' failed: {reason}")]
    ConversionFailed { path: PathBuf, reason: String },

    // ── Parse errors ──────────────────────────────────────────────────────
    /// The structural parser could not read the converted document.
    #[error("Failed to parse '{path}': {detail}")]
    ParseFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write a temporary file or directory.
    #[error("Temporary storage error ({context}): {source}")]
    TempStorage {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`PartitionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Neither or both inputs supplied.
    InvalidArgument,
    /// Input document or converted artifact missing (or unreadable).
    NotFound,
    /// External conversion did not succeed.
    ConversionFailed,
    /// Structural parser failure.
    ParseFailed,
    /// Temp storage or output write failure.
    Io,
    /// Invalid configuration.
    Config,
    /// Anything else.
    Internal,
}

impl PartitionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartitionError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PartitionError::FileNotFound { .. } | PartitionError::PermissionDenied { .. } => {
                ErrorKind::NotFound
            }
            PartitionError::ConversionFailed { .. } => ErrorKind::ConversionFailed,
            PartitionError::ParseFailed { .. } => ErrorKind::ParseFailed,
            PartitionError::TempStorage { .. } | PartitionError::OutputWriteFailed { .. } => {
                ErrorKind::Io
            }
            PartitionError::InvalidConfig(_) => ErrorKind::Config,
            PartitionError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn temp_storage(context: impl Into<String>, source: std::io::Error) -> Self {
        PartitionError::TempStorage {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = PartitionError::FileNotFound {
            path: PathBuf::from("/a/b/report.doc"),
        };
        assert!(e.to_string().contains("/a/b/report.doc"), "got: {e}");
        assert_eq!(e.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn conversion_failed_display() {
        let e = PartitionError::ConversionFailed {
            path: PathBuf::from("memo.doc"),
            reason: "soffice exited with status 1".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("memo.doc"));
        assert!(msg.contains("status 1"));
        assert_eq!(e.kind(), ErrorKind::ConversionFailed);
    }

    #[test]
    fn parse_failed_kind() {
        let e = PartitionError::ParseFailed {
            path: PathBuf::from("memo.docx"),
            detail: "word/document.xml missing".into(),
        };
        assert_eq!(e.kind(), ErrorKind::ParseFailed);
        assert!(e.to_string().contains("word/document.xml"));
    }

    #[test]
    fn temp_storage_keeps_source() {
        use std::error::Error as _;
        let e = PartitionError::temp_storage(
            "create conversion directory",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(e.kind(), ErrorKind::Io);
        assert!(e.source().is_some());
        assert!(e.to_string().contains("disk full"));
    }

    #[test]
    fn invalid_argument_kind() {
        let e = PartitionError::InvalidArgument("exactly one of path or stream".into());
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }
}
