//! Built-in structural parser for DOCX (Office Open XML) documents.
//!
//! A DOCX file is a ZIP archive; the parts read here are:
//! - `word/document.xml`: body paragraphs and tables (required)
//! - `word/styles.xml`: style id → display name (optional)
//!
//! The body is walked once with a streaming `quick-xml` reader. Each
//! top-level paragraph becomes at most one [`Element`] (empty paragraphs
//! are dropped), each non-empty top-level table one [`ElementKind::Table`].
//! Page numbers advance on explicit breaks only (`w:br w:type="page"`,
//! `w:pageBreakBefore`); DOCX carries no reliable layout pagination.

use crate::element::{Element, ElementKind, ElementMetadata};
use crate::error::PartitionError;
use crate::pipeline::classify::{self, ParagraphHints};
use crate::pipeline::parse::StructuralParser;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Partitions `.docx` files into [`Element`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxPartitioner;

impl DocxPartitioner {
    pub fn new() -> Self {
        Self
    }

    /// Open and partition the DOCX at `path`.
    ///
    /// `metadata_filename` is stamped on every element; when `None`, the
    /// path itself is used.
    pub fn partition_file(
        &self,
        path: &Path,
        metadata_filename: Option<&str>,
    ) -> Result<Vec<Element>, PartitionError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PartitionError::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => PartitionError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => PartitionError::ParseFailed {
                path: path.to_path_buf(),
                detail: e.to_string(),
            },
        })?;

        let filename = metadata_filename
            .map(str::to_string)
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        self.partition_reader(file, path, Some(filename))
    }

    /// Partition a DOCX from any seekable reader. `path` is only used in
    /// error messages.
    pub fn partition_reader<R: Read + Seek>(
        &self,
        reader: R,
        path: &Path,
        filename: Option<String>,
    ) -> Result<Vec<Element>, PartitionError> {
        let parse_err = |detail: String| PartitionError::ParseFailed {
            path: path.to_path_buf(),
            detail,
        };

        let mut archive =
            ZipArchive::new(reader).map_err(|e| parse_err(format!("not a DOCX (ZIP) file: {e}")))?;

        let styles = match read_part(&mut archive, STYLES_PART).map_err(&parse_err)? {
            Some(xml) => parse_styles(&xml).map_err(&parse_err)?,
            None => HashMap::new(),
        };

        let document = read_part(&mut archive, DOCUMENT_PART)
            .map_err(&parse_err)?
            .ok_or_else(|| parse_err(format!("{DOCUMENT_PART} is missing")))?;

        let mut elements = walk_body(&document, &styles).map_err(&parse_err)?;
        for el in &mut elements {
            el.metadata.filename = filename.clone();
        }

        debug!("Parsed {} elements from {}", elements.len(), path.display());
        Ok(elements)
    }
}

impl StructuralParser for DocxPartitioner {
    fn parse(
        &self,
        path: &Path,
        metadata_filename: Option<&str>,
    ) -> Result<Vec<Element>, PartitionError> {
        self.partition_file(path, metadata_filename)
    }
}

// ── Archive helpers ──────────────────────────────────────────────────────────

/// Read a ZIP entry as UTF-8; `Ok(None)` if the entry does not exist.
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, String> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(format!("cannot open {name}: {e}")),
    };
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| format!("cannot read {name}: {e}"))?;
    Ok(Some(content))
}

/// Extract an attribute value by qualified key.
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(Result::ok)
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// `w:val` explicitly switches a toggle property off (`0`, `false`, `off`).
fn is_val_off(e: &BytesStart) -> bool {
    matches!(get_attr(e, b"w:val").as_deref(), Some("0" | "false" | "off"))
}

// ── styles.xml ───────────────────────────────────────────────────────────────

/// Map style ids (`Heading1`) to display names (`heading 1`).
fn parse_styles(xml: &str) -> Result<HashMap<String, String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut styles = HashMap::new();
    let mut current: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:style" => {
                current = get_attr(&e, b"w:styleId");
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:name" => {
                if let (Some(id), Some(name)) = (current.as_ref(), get_attr(&e, b"w:val")) {
                    styles.insert(id.clone(), name);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("malformed {STYLES_PART}: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(styles)
}

// ── document.xml ─────────────────────────────────────────────────────────────

/// State of the paragraph currently being collected.
#[derive(Debug, Default)]
struct ParagraphState {
    text: String,
    style_id: Option<String>,
    numbered: bool,
    runs_with_text: usize,
    bold_runs_with_text: usize,
    run_bold: bool,
    run_has_text: bool,
    page_break_after: bool,
}

/// State of the top-level table currently being collected.
#[derive(Debug, Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    page: usize,
}

/// Streaming walker over `w:body`.
struct BodyWalker<'s> {
    styles: &'s HashMap<String, String>,
    elements: Vec<Element>,
    page: usize,
    para_depth: usize,
    table_depth: usize,
    fallback_depth: usize,
    in_text: bool,
    in_run: bool,
    in_run_props: bool,
    para: ParagraphState,
    table: TableState,
}

impl<'s> BodyWalker<'s> {
    fn new(styles: &'s HashMap<String, String>) -> Self {
        Self {
            styles,
            elements: Vec::new(),
            page: 1,
            para_depth: 0,
            table_depth: 0,
            fallback_depth: 0,
            in_text: false,
            in_run: false,
            in_run_props: false,
            para: ParagraphState::default(),
            table: TableState::default(),
        }
    }

    /// Inside a body paragraph that is not part of a table.
    fn in_top_paragraph(&self) -> bool {
        self.para_depth >= 1 && self.table_depth == 0
    }

    fn start(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = TableState {
                        page: self.page,
                        ..TableState::default()
                    };
                }
            }
            b"w:tr" if self.table_depth == 1 => self.table.row.clear(),
            b"w:tc" if self.table_depth == 1 => self.table.cell.clear(),
            b"w:p" => {
                self.para_depth += 1;
                if self.para_depth == 1 && self.table_depth == 0 {
                    self.para = ParagraphState::default();
                }
            }
            b"w:r" if self.para_depth >= 1 => {
                self.in_run = true;
                if self.in_top_paragraph() {
                    self.para.run_bold = false;
                    self.para.run_has_text = false;
                }
            }
            b"w:rPr" if self.in_run => self.in_run_props = true,
            b"w:t" if self.in_run => self.in_text = true,
            _ => self.property(e),
        }
    }

    /// Handle elements that matter whether written as `<x/>` or `<x>…</x>`.
    fn property(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:pStyle" if self.para_depth == 1 && self.table_depth == 0 => {
                self.para.style_id = get_attr(e, b"w:val");
            }
            b"w:numPr" if self.para_depth == 1 && self.table_depth == 0 => {
                self.para.numbered = true;
            }
            b"w:numId" if self.para_depth == 1 && self.table_depth == 0 => {
                if get_attr(e, b"w:val").as_deref() == Some("0") {
                    self.para.numbered = false;
                }
            }
            b"w:pageBreakBefore" if self.para_depth == 1 && self.table_depth == 0 => {
                if !is_val_off(e) && !self.elements.is_empty() {
                    self.page += 1;
                }
            }
            b"w:b" if self.in_run_props && self.in_top_paragraph() => {
                self.para.run_bold = !is_val_off(e);
            }
            b"w:tab" if self.in_run => self.push_text("\t"),
            b"w:br" if self.in_run => {
                if get_attr(e, b"w:type").as_deref() == Some("page") {
                    self.page_break();
                } else {
                    self.push_text("\n");
                }
            }
            b"w:cr" if self.in_run => self.push_text("\n"),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"w:t" => self.in_text = false,
            b"w:rPr" => self.in_run_props = false,
            b"w:r" if self.in_run => {
                self.in_run = false;
                if self.in_top_paragraph() && self.para.run_has_text {
                    self.para.runs_with_text += 1;
                    if self.para.run_bold {
                        self.para.bold_runs_with_text += 1;
                    }
                }
            }
            b"w:p" if self.para_depth >= 1 => {
                if self.table_depth > 0 {
                    self.table.cell.push('\n');
                } else if self.para_depth == 1 {
                    self.finish_paragraph();
                } else {
                    self.para.text.push('\n');
                }
                self.para_depth -= 1;
            }
            b"w:tc" if self.table_depth == 1 => {
                let cell = classify::clean_text(&self.table.cell).replace('\n', " ");
                self.table.row.push(cell);
            }
            b"w:tc" if self.table_depth > 1 => self.table.cell.push(' '),
            b"w:tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.table.row);
                if !row.is_empty() {
                    self.table.rows.push(row);
                }
            }
            b"w:tbl" if self.table_depth >= 1 => {
                if self.table_depth == 1 {
                    self.finish_table();
                }
                self.table_depth -= 1;
            }
            _ => {}
        }
    }

    fn push_text(&mut self, s: &str) {
        if self.table_depth > 0 {
            self.table.cell.push_str(s);
        } else if self.para_depth >= 1 {
            self.para.text.push_str(s);
            if self.para_depth == 1 && !s.trim().is_empty() {
                self.para.run_has_text = true;
            }
        }
    }

    /// A page break before any visible text starts the paragraph on the next
    /// page; one after text moves the following content.
    fn page_break(&mut self) {
        if !self.in_top_paragraph() {
            return;
        }
        if self.para.text.trim().is_empty() {
            if !self.elements.is_empty() {
                self.page += 1;
            }
        } else {
            self.para.page_break_after = true;
        }
    }

    fn finish_paragraph(&mut self) {
        let para = std::mem::take(&mut self.para);
        let style_name = para
            .style_id
            .as_ref()
            .map(|id| self.styles.get(id).cloned().unwrap_or_else(|| id.clone()));
        let hints = ParagraphHints {
            numbered: para.numbered,
            all_bold: para.runs_with_text > 0 && para.bold_runs_with_text == para.runs_with_text,
        };

        if let Some((kind, text)) = classify::classify(&para.text, style_name.as_deref(), hints)
        {
            self.elements.push(Element {
                kind,
                text,
                metadata: ElementMetadata {
                    page_number: Some(self.page),
                    style_name,
                    ..ElementMetadata::default()
                },
            });
        }

        if para.page_break_after {
            self.page += 1;
        }
    }

    fn finish_table(&mut self) {
        let table = std::mem::take(&mut self.table);
        let text = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|c| !c.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return;
        }

        self.elements.push(Element {
            kind: ElementKind::Table,
            text,
            metadata: ElementMetadata {
                page_number: Some(table.page),
                text_as_html: Some(table_html(&table.rows)),
                ..ElementMetadata::default()
            },
        });
    }
}

/// Walk `word/document.xml` and collect elements in document order.
fn walk_body(xml: &str, styles: &HashMap<String, String>) -> Result<Vec<Element>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut walker = BodyWalker::new(styles);
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("malformed {DOCUMENT_PART}: {e}"))?;

        // Alternate-content fallbacks duplicate the preferred rendering.
        match event {
            Event::Start(e) if e.name().as_ref() == b"mc:Fallback" => walker.fallback_depth += 1,
            Event::End(e) if walker.fallback_depth > 0 && e.name().as_ref() == b"mc:Fallback" => {
                walker.fallback_depth -= 1
            }
            Event::Eof => break,
            _ if walker.fallback_depth > 0 => {}
            Event::Start(e) => walker.start(&e),
            Event::Empty(e) => walker.property(&e),
            Event::End(e) => walker.end(e.name().as_ref()),
            Event::Text(t) if walker.in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| format!("bad text in {DOCUMENT_PART}: {e}"))?;
                walker.push_text(&text);
            }
            Event::CData(t) if walker.in_text => {
                walker.push_text(&String::from_utf8_lossy(&t));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(walker.elements)
}

/// Minimal HTML rendering of table rows.
fn table_html(rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn build_docx(body: &str, styles: Option<&str>) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default();
        zip.start_file(DOCUMENT_PART, opts).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="{W_NS}" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"><w:body>{body}</w:body></w:document>"#
        )
        .unwrap();
        if let Some(styles) = styles {
            zip.start_file(STYLES_PART, opts).unwrap();
            write!(zip, r#"<w:styles xmlns:w="{W_NS}">{styles}</w:styles>"#).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn partition(body: &str, styles: Option<&str>) -> Vec<Element> {
        DocxPartitioner::new()
            .partition_reader(
                Cursor::new(build_docx(body, styles)),
                Path::new("test.docx"),
                Some("orig.doc".into()),
            )
            .unwrap()
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn single_paragraph() {
        let els = partition(&para("Hello"), None);
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].kind, ElementKind::NarrativeText);
        assert_eq!(els[0].text, "Hello");
        assert_eq!(els[0].metadata.filename.as_deref(), Some("orig.doc"));
        assert_eq!(els[0].metadata.page_number, Some(1));
    }

    #[test]
    fn empty_body_is_empty_result() {
        assert!(partition("<w:p/><w:p><w:r><w:t> </w:t></w:r></w:p>", None).is_empty());
    }

    #[test]
    fn runs_are_concatenated_with_tabs_and_breaks() {
        let body = r#"<w:p><w:r><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:t>world</w:t><w:tab/><w:t>again</w:t><w:br/><w:t>next</w:t></w:r></w:p>"#;
        let els = partition(body, None);
        assert_eq!(els[0].text, "Hello world again\nnext");
    }

    #[test]
    fn entities_are_unescaped() {
        let els = partition(&para("Fish &amp; Chips"), None);
        assert_eq!(els[0].text, "Fish & Chips");
    }

    #[test]
    fn heading_style_resolved_through_styles_xml() {
        let styles = r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>"#;
        let body = r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Overview of the plan.</w:t></w:r></w:p>"#;
        let els = partition(body, Some(styles));
        assert_eq!(els[0].kind, ElementKind::Title);
        assert_eq!(els[0].metadata.style_name.as_deref(), Some("heading 1"));
    }

    #[test]
    fn style_id_used_when_styles_missing() {
        let body = r#"<w:p><w:pPr><w:pStyle w:val="ListBullet"/></w:pPr><w:r><w:t>Milk</w:t></w:r></w:p>"#;
        let els = partition(body, None);
        assert_eq!(els[0].kind, ElementKind::ListItem);
    }

    #[test]
    fn numbered_paragraph_is_list_item() {
        let body = r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr><w:r><w:t>Step one.</w:t></w:r></w:p>"#;
        assert_eq!(partition(body, None)[0].kind, ElementKind::ListItem);

        let unnumbered = r#"<w:p><w:pPr><w:numPr><w:numId w:val="0"/></w:numPr></w:pPr><w:r><w:t>Step one.</w:t></w:r></w:p>"#;
        assert_eq!(
            partition(unnumbered, None)[0].kind,
            ElementKind::NarrativeText
        );
    }

    #[test]
    fn bold_runs_make_a_title() {
        let body = r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Introduction</w:t></w:r></w:p>"#;
        assert_eq!(partition(body, None)[0].kind, ElementKind::Title);

        let off = r#"<w:p><w:r><w:rPr><w:b w:val="0"/></w:rPr><w:t>Introduction</w:t></w:r></w:p>"#;
        assert_eq!(partition(off, None)[0].kind, ElementKind::NarrativeText);
    }

    #[test]
    fn paragraph_mark_bold_does_not_count() {
        let body = r#"<w:p><w:pPr><w:rPr><w:b/></w:rPr></w:pPr><w:r><w:t>Introduction</w:t></w:r></w:p>"#;
        assert_eq!(partition(body, None)[0].kind, ElementKind::NarrativeText);
    }

    #[test]
    fn table_becomes_single_element() {
        let body = format!(
            "<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            para("Name"),
            para("Qty"),
            para("Apples &lt;ripe&gt;"),
            para("3"),
            para("After the table.")
        );
        let els = partition(&body, None);
        assert_eq!(els.len(), 2);
        assert_eq!(els[0].kind, ElementKind::Table);
        assert_eq!(els[0].text, "Name Qty\nApples <ripe> 3");
        assert_eq!(
            els[0].metadata.text_as_html.as_deref(),
            Some("<table><tr><td>Name</td><td>Qty</td></tr><tr><td>Apples &lt;ripe&gt;</td><td>3</td></tr></table>")
        );
        assert_eq!(els[1].text, "After the table.");
    }

    #[test]
    fn nested_table_text_stays_in_outer_cell() {
        let body = format!(
            "<w:tbl><w:tr><w:tc>{}<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>",
            para("Outer"),
            para("in1"),
            para("in2")
        );
        let els = partition(&body, None);
        assert_eq!(els.len(), 1);
        assert_eq!(els[0].text, "Outer in1 in2");
    }

    #[test]
    fn page_breaks_advance_page_number() {
        let body = format!(
            r#"{}<w:p><w:r><w:br w:type="page"/><w:t>Second page.</w:t></w:r></w:p><w:p><w:r><w:t>Still two.</w:t><w:br w:type="page"/></w:r></w:p><w:p><w:pPr><w:pageBreakBefore/></w:pPr><w:r><w:t>Four.</w:t></w:r></w:p>"#,
            para("First page.")
        );
        let pages: Vec<_> = partition(&body, None)
            .iter()
            .map(|e| e.metadata.page_number)
            .collect();
        assert_eq!(pages, vec![Some(1), Some(2), Some(2), Some(4)]);
    }

    #[test]
    fn fallback_content_is_skipped() {
        let body = r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:t>Boxed</w:t></mc:Choice><mc:Fallback><w:t>Boxed</w:t></mc:Fallback></mc:AlternateContent></w:r></w:p>"#;
        let els = partition(body, None);
        assert_eq!(els[0].text, "Boxed");
    }

    #[test]
    fn tab_stops_in_properties_are_not_text() {
        let body = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Body</w:t></w:r></w:p>"#;
        assert_eq!(partition(body, None)[0].text, "Body");
    }

    #[test]
    fn missing_document_part_is_parse_failure() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = DocxPartitioner::new()
            .partition_reader(Cursor::new(bytes), Path::new("broken.docx"), None)
            .unwrap_err();
        match err {
            PartitionError::ParseFailed { detail, .. } => {
                assert!(detail.contains(DOCUMENT_PART), "got: {detail}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_zip_is_parse_failure() {
        let err = DocxPartitioner::new()
            .partition_reader(
                Cursor::new(b"plain text".to_vec()),
                Path::new("x.docx"),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, PartitionError::ParseFailed { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = DocxPartitioner::new()
            .parse(Path::new("/definitely/not/here.docx"), Some("orig.doc"))
            .unwrap_err();
        assert!(matches!(err, PartitionError::FileNotFound { .. }));
    }

    #[test]
    fn file_path_is_default_provenance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.docx");
        std::fs::write(&path, build_docx(&para("Hi there"), None)).unwrap();

        let els = DocxPartitioner::new().parse(&path, None).unwrap();
        assert_eq!(
            els[0].metadata.filename.as_deref(),
            Some(path.to_string_lossy().as_ref())
        );
    }

    #[test]
    fn parsing_is_deterministic() {
        let body = format!("{}{}", para("One."), para("Two."));
        assert_eq!(partition(&body, None), partition(&body, None));
    }
}
