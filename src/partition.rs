//! Partitioning entry points: legacy document in, elements out.
//!
//! ```text
//! DocumentInput ──▶ resolve ──▶ [ workspace ─▶ convert ─▶ parse ─▶ remove ] ──▶ Vec<Element>
//!  (path/stream)   (temp file)   └──────────── spawn_blocking ────────────┘
//! ```
//!
//! The bracketed section runs on tokio's blocking pool: the converter is a
//! synchronous external process and the parser does file I/O. The
//! conversion directory is created and removed inside that section, so it
//! exists exactly as long as the convert-then-parse step.

use crate::config::PartitionConfig;
use crate::element::{elements_to_text, Element};
use crate::error::PartitionError;
use crate::pipeline::convert::{ContainerFormat, LegacyConverter};
use crate::pipeline::input::{self, DocumentInput};
use crate::pipeline::parse::StructuralParser;
use crate::pipeline::workspace::{self, ConversionWorkspace};
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Partition a legacy `.doc` into elements.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input`  — a path on disk or a byte stream
/// * `config` — converter, parser, temp location and provenance settings
///
/// # Errors
/// - `InvalidArgument`: the path is empty, a directory, or has no file name
/// - `FileNotFound` / `PermissionDenied`: the input path is unusable
/// - `ConversionFailed`: the converter is missing or reported failure
/// - anything the parser returns, unchanged
///
/// # Example
/// ```rust,no_run
/// use edgequake_docpart::{partition_doc, DocumentInput, PartitionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let elements = partition_doc(
///     DocumentInput::path("reports/q3.doc"),
///     &PartitionConfig::default(),
/// )
/// .await?;
/// for el in &elements {
///     println!("{}: {}", el.kind, el.text);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn partition_doc(
    input: DocumentInput,
    config: &PartitionConfig,
) -> Result<Vec<Element>, PartitionError> {
    let result = run(input, config).await;
    if let (Err(e), Some(cb)) = (&result, &config.progress_callback) {
        cb.on_partition_error(e);
    }
    result
}

async fn run(input: DocumentInput, config: &PartitionConfig) -> Result<Vec<Element>, PartitionError> {
    let total_start = Instant::now();

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let resolved = input::resolve_input(input, config).await?;
    let source = resolved.path().to_path_buf();
    info!("Partitioning {}", source.display());
    if let Some(ref cb) = config.progress_callback {
        cb.on_input_resolved(&source);
    }

    // ── Step 2: Predict the converted name and provenance ────────────────
    let base_filename = workspace::base_filename(&source)?;
    let metadata_filename = resolved.provenance(config.metadata_filename.as_deref());
    debug!(
        "Base filename {:?}, provenance '{}'",
        base_filename, metadata_filename
    );

    // ── Step 3: Convert and parse inside a scoped directory ──────────────
    let job = ConvertJob {
        source,
        base_filename,
        metadata_filename,
        format: ContainerFormat::Docx,
        temp_root: config.temp_root.clone(),
        converter: config.resolve_converter(),
        parser: config.resolve_parser(),
        progress: config.progress_callback.clone(),
    };

    let elements = tokio::task::spawn_blocking(move || job.run())
        .await
        .map_err(|e| PartitionError::Internal(format!("Conversion task panicked: {}", e)))??;

    // The stream temp file (if any) goes away here, after the parser is done.
    drop(resolved);

    info!(
        "Partition complete: {} elements in {}ms",
        elements.len(),
        total_start.elapsed().as_millis()
    );
    Ok(elements)
}

/// Everything the blocking section needs, owned so it can cross threads.
struct ConvertJob {
    source: PathBuf,
    base_filename: OsString,
    metadata_filename: String,
    format: ContainerFormat,
    temp_root: Option<PathBuf>,
    converter: Arc<dyn LegacyConverter>,
    parser: Arc<dyn StructuralParser>,
    progress: Option<ProgressCallback>,
}

impl ConvertJob {
    fn run(self) -> Result<Vec<Element>, PartitionError> {
        let workspace = ConversionWorkspace::create(self.temp_root.as_deref())?;
        let result = self.convert_and_parse(&workspace);
        // A removal failure is logged by `close`; it does not mask the result.
        let _ = workspace.close();
        result
    }

    fn convert_and_parse(
        &self,
        workspace: &ConversionWorkspace,
    ) -> Result<Vec<Element>, PartitionError> {
        if let Some(ref cb) = self.progress {
            cb.on_conversion_start(&self.source);
        }

        let convert_start = Instant::now();
        self.converter
            .convert(&self.source, workspace.path(), self.format)?;
        let elapsed_ms = convert_start.elapsed().as_millis() as u64;

        let artifact = workspace.artifact_path(&self.base_filename, self.format);
        info!(
            "Converted {} → {} in {}ms",
            self.source.display(),
            artifact.display(),
            elapsed_ms
        );
        if let Some(ref cb) = self.progress {
            cb.on_conversion_complete(&artifact, elapsed_ms);
        }

        let elements = self
            .parser
            .parse(&artifact, Some(&self.metadata_filename))?;
        if let Some(ref cb) = self.progress {
            cb.on_parse_complete(elements.len());
        }
        Ok(elements)
    }
}

/// Synchronous wrapper around [`partition_doc`].
///
/// Creates a temporary tokio runtime internally; do not call from inside
/// an async context.
pub fn partition_doc_sync(
    input: DocumentInput,
    config: &PartitionConfig,
) -> Result<Vec<Element>, PartitionError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PartitionError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(partition_doc(input, config))
}

/// Partition a `.doc` held in memory.
///
/// The bytes are spooled to a managed temp file (removed on return unless
/// `keep_stream_temp_file` is set).
///
/// # Example
/// ```rust,no_run
/// use edgequake_docpart::{partition_doc_from_bytes, PartitionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("memo.doc")?;
/// let config = PartitionConfig::builder()
///     .metadata_filename("memo.doc")
///     .build()?;
/// let elements = partition_doc_from_bytes(bytes, &config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn partition_doc_from_bytes(
    bytes: impl Into<Vec<u8>>,
    config: &PartitionConfig,
) -> Result<Vec<Element>, PartitionError> {
    partition_doc(DocumentInput::bytes(bytes), config).await
}

/// Serialisation of partitioned elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array of elements. (default)
    #[default]
    Json,
    /// Element texts separated by blank lines.
    Text,
}

impl OutputFormat {
    pub fn render(&self, elements: &[Element]) -> Result<String, PartitionError> {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(elements)
                .map_err(|e| PartitionError::Internal(format!("JSON serialisation failed: {}", e))),
            OutputFormat::Text => Ok(elements_to_text(elements)),
        }
    }

    /// Default file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

/// Partition a document and write the result to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
/// Returns the number of elements written.
pub async fn partition_doc_to_file(
    input: DocumentInput,
    output_path: impl AsRef<Path>,
    format: OutputFormat,
    config: &PartitionConfig,
) -> Result<usize, PartitionError> {
    let elements = partition_doc(input, config).await?;
    let path = output_path.as_ref();
    let body = format.render(&elements)?;
    write_atomic(path, body.as_bytes()).await?;
    info!("Wrote {} elements to {}", elements.len(), path.display());
    Ok(elements.len())
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PartitionError> {
    let write_err = |e: std::io::Error| PartitionError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, bytes).await.map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        if let Err(rm) = tokio::fs::remove_file(&tmp_path).await {
            warn!("Failed to remove {}: {}", tmp_path.display(), rm);
        }
        return Err(write_err(e));
    }
    Ok(())
}
