//! Output types: the ordered document elements produced by partitioning.
//!
//! An [`Element`] is one typed unit of document structure (a heading, a
//! paragraph, a list item, a table) plus [`ElementMetadata`] that ties it
//! back to the caller's original input. Elements serialise to the familiar
//! `{"type": "NarrativeText", "text": …, "metadata": {…}}` JSON shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of an extracted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Headings, document titles, subtitles.
    Title,
    /// Body paragraphs of running prose.
    NarrativeText,
    /// Bulleted or numbered list entries (bullet glyph stripped).
    ListItem,
    /// Text that fits no other category (captions, quotes, stray numbers).
    #[serde(rename = "UncategorizedText")]
    Text,
    /// A table; see [`ElementMetadata::text_as_html`].
    Table,
}

impl ElementKind {
    /// The serialised type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Title => "Title",
            ElementKind::NarrativeText => "NarrativeText",
            ElementKind::ListItem => "ListItem",
            ElementKind::Text => "UncategorizedText",
            ElementKind::Table => "Table",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance and layout details attached to every element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// The caller-facing filename of the source document.
    ///
    /// For path input this is the path exactly as supplied, never the
    /// temporary converted copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// 1-indexed page, counted from explicit page breaks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,

    /// Paragraph style name the element was classified from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,

    /// HTML rendering of a [`ElementKind::Table`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_as_html: Option<String>,
}

/// One ordered unit of extracted document structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub text: String,
    #[serde(default)]
    pub metadata: ElementMetadata,
}

impl Element {
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            metadata: ElementMetadata::default(),
        }
    }

    /// Builder-style provenance setter.
    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.metadata.filename = filename;
        self
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Join element texts with blank lines, the plain-text rendering used by the
/// CLI's `--format text`.
pub fn elements_to_text(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_with_type_tag() {
        let el = Element::new(ElementKind::NarrativeText, "Hello")
            .with_filename(Some("/a/b/report.doc".into()));
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "NarrativeText");
        assert_eq!(json["text"], "Hello");
        assert_eq!(json["metadata"]["filename"], "/a/b/report.doc");
        assert!(json["metadata"].get("page_number").is_none());
    }

    #[test]
    fn uncategorized_text_name() {
        let json = serde_json::to_value(Element::new(ElementKind::Text, "42")).unwrap();
        assert_eq!(json["type"], "UncategorizedText");
        assert_eq!(ElementKind::Text.to_string(), "UncategorizedText");
    }

    #[test]
    fn deserialises_without_metadata() {
        let el: Element = serde_json::from_str(r#"{"type":"Title","text":"Intro"}"#).unwrap();
        assert_eq!(el.kind, ElementKind::Title);
        assert_eq!(el.metadata, ElementMetadata::default());
    }

    #[test]
    fn text_rendering_joins_with_blank_lines() {
        let els = vec![
            Element::new(ElementKind::Title, "Intro"),
            Element::new(ElementKind::NarrativeText, "Body text."),
        ];
        assert_eq!(elements_to_text(&els), "Intro\n\nBody text.");
        assert_eq!(elements_to_text(&[]), "");
    }
}
