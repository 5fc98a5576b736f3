//! Input resolution: normalise a path or byte stream to a local file.
//!
//! The converter is an external program and needs a file-system path, so a
//! stream input is first spooled to a named temp file. The temp file's
//! [`TempPath`] lives inside [`ResolvedSource`]; dropping the source removes
//! the file unless the caller asked to keep it
//! ([`crate::config::PartitionConfig::keep_stream_temp_file`]).

use crate::config::PartitionConfig;
use crate::error::PartitionError;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, info};

const STREAM_PREFIX: &str = "docpart-input-";
const STREAM_SUFFIX: &str = ".doc";

/// A readable byte stream holding a legacy document.
pub type DocumentStream = Box<dyn AsyncRead + Send + Unpin>;

/// The document to partition: a path on disk or a byte stream.
pub enum DocumentInput {
    /// File on disk. Its string form is used verbatim as provenance.
    Path(PathBuf),
    /// Byte stream, spooled to a temp file before conversion.
    Stream(DocumentStream),
}

impl fmt::Debug for DocumentInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentInput::Path(p) => f.debug_tuple("Path").field(p).finish(),
            DocumentInput::Stream(_) => f.write_str("Stream(<dyn AsyncRead>)"),
        }
    }
}

impl DocumentInput {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DocumentInput::Path(path.into())
    }

    pub fn stream<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        DocumentInput::Stream(Box::new(reader))
    }

    /// In-memory document bytes.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::stream(Cursor::new(bytes.into()))
    }

    /// Build from the optional pair a caller might hold. Exactly one must be
    /// present; otherwise `InvalidArgument`, with nothing read or created.
    pub fn from_parts(
        filename: Option<PathBuf>,
        file: Option<DocumentStream>,
    ) -> Result<Self, PartitionError> {
        match (filename, file) {
            (Some(path), None) => Ok(DocumentInput::Path(path)),
            (None, Some(stream)) => Ok(DocumentInput::Stream(stream)),
            (Some(_), Some(_)) => Err(PartitionError::InvalidArgument(
                "exactly one of filename or file must be specified, got both".into(),
            )),
            (None, None) => Err(PartitionError::InvalidArgument(
                "exactly one of filename or file must be specified, got neither".into(),
            )),
        }
    }
}

/// The input as a local file, plus what is needed to clean it up.
#[derive(Debug)]
pub struct ResolvedSource {
    path: PathBuf,
    caller_path: Option<PathBuf>,
    temp: Option<TempPath>,
}

impl ResolvedSource {
    /// The local file to convert.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as the caller gave it, for path input.
    pub fn caller_path(&self) -> Option<&Path> {
        self.caller_path.as_deref()
    }

    /// True while a temp file owned by this source exists.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }

    /// Filename to stamp on elements: the override if any, else the caller's
    /// path verbatim, else the local (temp) path.
    pub fn provenance(&self, override_name: Option<&str>) -> String {
        if let Some(name) = override_name {
            return name.to_string();
        }
        self.caller_path
            .as_deref()
            .unwrap_or(&self.path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Resolve `input` to a local file.
///
/// Path input is checked, not copied: missing → `FileNotFound`, unreadable
/// → `PermissionDenied`, a directory → `InvalidArgument`. Stream input is
/// copied to a new temp file under `config.temp_root`.
pub async fn resolve_input(
    input: DocumentInput,
    config: &PartitionConfig,
) -> Result<ResolvedSource, PartitionError> {
    match input {
        DocumentInput::Path(path) => resolve_local(path).await,
        DocumentInput::Stream(stream) => spool_stream(stream, config).await,
    }
}

async fn resolve_local(path: PathBuf) -> Result<ResolvedSource, PartitionError> {
    if path.as_os_str().is_empty() {
        return Err(PartitionError::InvalidArgument(
            "filename must not be empty".into(),
        ));
    }

    let meta = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => PartitionError::PermissionDenied {
            path: path.clone(),
        },
        _ => PartitionError::FileNotFound { path: path.clone() },
    })?;

    if meta.is_dir() {
        return Err(PartitionError::InvalidArgument(format!(
            "'{}' is a directory, not a document",
            path.display()
        )));
    }

    // Metadata succeeds on a mode-000 file; only an open tells us it is readable.
    tokio::fs::File::open(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => PartitionError::PermissionDenied {
            path: path.clone(),
        },
        _ => PartitionError::FileNotFound { path: path.clone() },
    })?;

    debug!("Resolved local document: {}", path.display());
    Ok(ResolvedSource {
        path: path.clone(),
        caller_path: Some(path),
        temp: None,
    })
}

async fn spool_stream(
    mut stream: DocumentStream,
    config: &PartitionConfig,
) -> Result<ResolvedSource, PartitionError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(STREAM_PREFIX).suffix(STREAM_SUFFIX);
    let named = match config.temp_root {
        Some(ref root) => builder.tempfile_in(root),
        None => builder.tempfile(),
    }
    .map_err(|e| PartitionError::temp_storage("create stream temp file", e))?;

    // The TempPath removes the file on drop, including on the error paths below.
    let (std_file, temp_path) = named.into_parts();
    let mut file = tokio::fs::File::from_std(std_file);

    let written = tokio::io::copy(&mut stream, &mut file)
        .await
        .map_err(|e| PartitionError::temp_storage("write stream to temp file", e))?;
    file.flush()
        .await
        .map_err(|e| PartitionError::temp_storage("flush stream temp file", e))?;
    drop(file);

    info!(
        "Spooled {} bytes of stream input to {}",
        written,
        temp_path.display()
    );

    if config.keep_stream_temp_file {
        let path = temp_path
            .keep()
            .map_err(|e| PartitionError::temp_storage("keep stream temp file", e.error))?;
        debug!("Keeping stream temp file {}", path.display());
        return Ok(ResolvedSource {
            path,
            caller_path: None,
            temp: None,
        });
    }

    Ok(ResolvedSource {
        path: temp_path.to_path_buf(),
        caller_path: None,
        temp: Some(temp_path),
    })
}
