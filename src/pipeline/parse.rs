//! The structural-parser seam.
//!
//! A [`StructuralParser`] turns a modern-container file into ordered
//! [`Element`]s. The crate ships [`crate::pipeline::docx::DocxPartitioner`];
//! callers can inject their own through
//! [`crate::config::PartitionConfigBuilder::parser`].

use crate::element::Element;
use crate::error::PartitionError;
use std::path::Path;

/// Extracts document elements from a converted file.
///
/// `metadata_filename` is the provenance string to stamp on every element in
/// place of `path`, which is usually a temporary copy. Errors are passed back
/// to the caller unmodified.
pub trait StructuralParser: Send + Sync {
    fn parse(
        &self,
        path: &Path,
        metadata_filename: Option<&str>,
    ) -> Result<Vec<Element>, PartitionError>;
}

impl<F> StructuralParser for F
where
    F: Fn(&Path, Option<&str>) -> Result<Vec<Element>, PartitionError> + Send + Sync,
{
    fn parse(
        &self,
        path: &Path,
        metadata_filename: Option<&str>,
    ) -> Result<Vec<Element>, PartitionError> {
        self(path, metadata_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use std::sync::Arc;

    fn stub(_: &Path, name: Option<&str>) -> Result<Vec<Element>, PartitionError> {
        Ok(vec![
            Element::new(ElementKind::Title, "Stub").with_filename(name.map(str::to_string))
        ])
    }

    #[test]
    fn plain_functions_are_parsers() {
        let parser: Arc<dyn StructuralParser> = Arc::new(stub);
        let els = parser
            .parse(Path::new("/tmp/x.docx"), Some("report.doc"))
            .unwrap();
        assert_eq!(els[0].metadata.filename.as_deref(), Some("report.doc"));
    }
}
