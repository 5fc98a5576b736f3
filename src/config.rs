//! Configuration types for legacy-document partitioning.
//!
//! All partitioning behaviour is controlled through [`PartitionConfig`], built
//! via its [`PartitionConfigBuilder`]. The converter and parser are injected
//! here too, so tests and embedders can swap LibreOffice or the DOCX parser
//! for their own implementations.

use crate::error::PartitionError;
use crate::pipeline::convert::{LegacyConverter, SofficeConverter};
use crate::pipeline::docx::DocxPartitioner;
use crate::pipeline::parse::StructuralParser;
use crate::progress::PartitionProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for partitioning one legacy document.
///
/// Built via [`PartitionConfig::builder()`] or using
/// [`PartitionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_docpart::PartitionConfig;
///
/// let config = PartitionConfig::builder()
///     .soffice_program("/usr/bin/soffice")
///     .metadata_filename("quarterly-report.doc")
///     .build()
///     .unwrap();
/// assert!(config.isolate_profile);
/// ```
#[derive(Clone)]
pub struct PartitionConfig {
    /// Explicit LibreOffice executable. If None, discovered via
    /// `SOFFICE_PATH`, `PATH` and well-known install locations.
    pub soffice_program: Option<PathBuf>,

    /// Run each conversion with a private LibreOffice user profile inside the
    /// conversion directory. Default: true.
    ///
    /// LibreOffice locks its user profile; a second headless instance sharing
    /// the profile fails or waits. Turn this off only when a single conversion
    /// runs at a time and profile start-up cost matters.
    pub isolate_profile: bool,

    /// Parent directory for the stream temp file and the conversion directory.
    /// If None, uses the OS temp directory.
    pub temp_root: Option<PathBuf>,

    /// Keep the temp file created for stream input after the call returns.
    /// Default: false (removed on every exit path).
    pub keep_stream_temp_file: bool,

    /// Filename stamped on every element's metadata, overriding the caller's
    /// path or the stream temp file path.
    pub metadata_filename: Option<String>,

    /// Custom converter. Takes precedence over `soffice_program`.
    pub converter: Option<Arc<dyn LegacyConverter>>,

    /// Custom structural parser. If None, uses [`DocxPartitioner`].
    pub parser: Option<Arc<dyn StructuralParser>>,

    /// Stage notifications (input resolved, conversion, parse).
    pub progress_callback: Option<Arc<dyn PartitionProgressCallback>>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            soffice_program: None,
            isolate_profile: true,
            temp_root: None,
            keep_stream_temp_file: false,
            metadata_filename: None,
            converter: None,
            parser: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PartitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionConfig")
            .field("soffice_program", &self.soffice_program)
            .field("isolate_profile", &self.isolate_profile)
            .field("temp_root", &self.temp_root)
            .field("keep_stream_temp_file", &self.keep_stream_temp_file)
            .field("metadata_filename", &self.metadata_filename)
            .field(
                "converter",
                &self.converter.as_ref().map(|_| "<dyn LegacyConverter>"),
            )
            .field(
                "parser",
                &self.parser.as_ref().map(|_| "<dyn StructuralParser>"),
            )
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn PartitionProgressCallback>"),
            )
            .finish()
    }
}

impl PartitionConfig {
    /// Create a new builder for `PartitionConfig`.
    pub fn builder() -> PartitionConfigBuilder {
        PartitionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The converter to use: the injected one, else LibreOffice.
    pub(crate) fn resolve_converter(&self) -> Arc<dyn LegacyConverter> {
        if let Some(ref c) = self.converter {
            return Arc::clone(c);
        }
        let soffice = match self.soffice_program {
            Some(ref program) => SofficeConverter::with_program(program),
            None => SofficeConverter::new(),
        };
        Arc::new(soffice.isolate_profile(self.isolate_profile))
    }

    /// The parser to use: the injected one, else the built-in DOCX parser.
    pub(crate) fn resolve_parser(&self) -> Arc<dyn StructuralParser> {
        match self.parser {
            Some(ref p) => Arc::clone(p),
            None => Arc::new(DocxPartitioner::new()),
        }
    }
}

/// Builder for [`PartitionConfig`].
#[derive(Debug)]
pub struct PartitionConfigBuilder {
    config: PartitionConfig,
}

impl PartitionConfigBuilder {
    pub fn soffice_program(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.soffice_program = Some(path.into());
        self
    }

    pub fn isolate_profile(mut self, v: bool) -> Self {
        self.config.isolate_profile = v;
        self
    }

    pub fn temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_root = Some(dir.into());
        self
    }

    pub fn keep_stream_temp_file(mut self, v: bool) -> Self {
        self.config.keep_stream_temp_file = v;
        self
    }

    pub fn metadata_filename(mut self, name: impl Into<String>) -> Self {
        self.config.metadata_filename = Some(name.into());
        self
    }

    pub fn converter(mut self, converter: Arc<dyn LegacyConverter>) -> Self {
        self.config.converter = Some(converter);
        self
    }

    pub fn parser(mut self, parser: Arc<dyn StructuralParser>) -> Self {
        self.config.parser = Some(parser);
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn PartitionProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PartitionConfig, PartitionError> {
        let c = &self.config;
        if let Some(ref root) = c.temp_root {
            if !root.is_dir() {
                return Err(PartitionError::InvalidConfig(format!(
                    "temp_root '{}' is not an existing directory",
                    root.display()
                )));
            }
        }
        if let Some(ref program) = c.soffice_program {
            if program.as_os_str().is_empty() {
                return Err(PartitionError::InvalidConfig(
                    "soffice_program must not be empty".into(),
                ));
            }
        }
        if let Some(ref name) = c.metadata_filename {
            if name.trim().is_empty() {
                return Err(PartitionError::InvalidConfig(
                    "metadata_filename must not be blank".into(),
                ));
            }
        }
        Ok(self.config)
    }
}
