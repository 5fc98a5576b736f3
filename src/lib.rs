//! # edgequake-docpart
//!
//! Partition legacy Word `.doc` files into typed document elements.
//!
//! The legacy binary format is converted to DOCX by an external converter
//! (LibreOffice in headless mode by default) inside a scoped temp directory,
//! and the DOCX is handed to a structural parser. Elements carry the
//! caller's original filename, not the temporary converted path.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .doc (path or stream)
//!  │
//!  ├─ 1. Input     use the path, or spool the stream to a temp file
//!  ├─ 2. Convert   soffice --convert-to docx into a scoped temp dir (spawn_blocking)
//!  ├─ 3. Parse     DOCX → Title / NarrativeText / ListItem / Table elements
//!  └─ 4. Cleanup   temp dir removed on every exit path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_docpart::{partition_doc, DocumentInput, PartitionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // soffice discovered from SOFFICE_PATH, PATH or standard install dirs
//!     let config = PartitionConfig::default();
//!     let elements = partition_doc(DocumentInput::path("memo.doc"), &config).await?;
//!     for el in &elements {
//!         println!("[{}] {}", el.kind, el.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docpart` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! edgequake-docpart = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod element;
pub mod error;
pub mod partition;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PartitionConfig, PartitionConfigBuilder};
pub use element::{elements_to_text, Element, ElementKind, ElementMetadata};
pub use error::{ErrorKind, PartitionError};
pub use partition::{
    partition_doc, partition_doc_from_bytes, partition_doc_sync, partition_doc_to_file,
    OutputFormat,
};
pub use pipeline::convert::{ContainerFormat, LegacyConverter, SofficeConverter};
pub use pipeline::docx::DocxPartitioner;
pub use pipeline::input::{DocumentInput, DocumentStream, ResolvedSource};
pub use pipeline::parse::StructuralParser;
pub use progress::{NoopProgressCallback, PartitionProgressCallback, ProgressCallback};
