//! Progress-callback trait for partitioning stage events.
//!
//! Inject an [`Arc<dyn PartitionProgressCallback>`] via
//! [`crate::config::PartitionConfigBuilder::progress_callback`] to hear about
//! each stage of a partition call as it happens.
//!
//! # Example
//!
//! ```rust
//! use edgequake_docpart::{PartitionConfig, PartitionProgressCallback};
//! use std::sync::Arc;
//!
//! struct Announce;
//!
//! impl PartitionProgressCallback for Announce {
//!     fn on_conversion_complete(&self, artifact: &std::path::Path, elapsed_ms: u64) {
//!         eprintln!("converted to {} in {elapsed_ms} ms", artifact.display());
//!     }
//! }
//!
//! let config = PartitionConfig::builder()
//!     .progress_callback(Arc::new(Announce) as Arc<dyn PartitionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::PartitionError;
use std::path::Path;
use std::sync::Arc;

/// Called by the orchestrator at each stage of a partition call.
///
/// Methods run on whichever thread reaches the stage: input resolution on
/// the async task, conversion and parsing on a blocking-pool thread. All
/// methods have default no-op implementations.
pub trait PartitionProgressCallback: Send + Sync {
    /// The input is available as a local file at `path`.
    fn on_input_resolved(&self, path: &Path) {
        let _ = path;
    }

    /// The converter is about to run on `source`.
    fn on_conversion_start(&self, source: &Path) {
        let _ = source;
    }

    /// The converter returned successfully.
    ///
    /// # Arguments
    /// * `artifact`   — predicted path of the converted file
    /// * `elapsed_ms` — wall-clock conversion time
    fn on_conversion_complete(&self, artifact: &Path, elapsed_ms: u64) {
        let _ = (artifact, elapsed_ms);
    }

    /// The parser produced `element_count` elements.
    fn on_parse_complete(&self, element_count: usize) {
        let _ = element_count;
    }

    /// The call is about to fail with `error`.
    fn on_partition_error(&self, error: &PartitionError) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl PartitionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PartitionConfig`].
pub type ProgressCallback = Arc<dyn PartitionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl PartitionProgressCallback for Recorder {
        fn on_input_resolved(&self, path: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(format!("resolved {}", path.display()));
        }

        fn on_parse_complete(&self, element_count: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("parsed {element_count}"));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_input_resolved(Path::new("a.doc"));
        cb.on_conversion_start(Path::new("a.doc"));
        cb.on_conversion_complete(Path::new("/tmp/a.docx"), 12);
        cb.on_parse_complete(3);
        cb.on_partition_error(&PartitionError::Internal("boom".into()));
    }

    #[test]
    fn overridden_methods_receive_events() {
        let rec = Recorder::default();
        rec.on_input_resolved(Path::new("memo.doc"));
        rec.on_conversion_start(Path::new("memo.doc"));
        rec.on_parse_complete(7);
        assert_eq!(
            *rec.events.lock().unwrap(),
            vec!["resolved memo.doc".to_string(), "parsed 7".to_string()]
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_parse_complete(0);
    }
}
