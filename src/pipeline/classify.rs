//! Text cleanup and element-type classification for DOCX paragraphs.
//!
//! Paragraph style wins when it is one of the well-known Word styles
//! (`Heading 1`, `Title`, `List Bullet`, `Quote`, …). Everything else,
//! which in converted legacy documents is mostly `Normal`, is classified
//! from the text itself plus two layout hints the parser collects: whether
//! the paragraph is numbered and whether all of its runs are bold.
//!
//! ## Rule order for unmapped styles
//!
//! 1. Leading bullet glyph → `ListItem`, glyph stripped
//! 2. Numbered paragraph (`w:numPr`) → `ListItem`
//! 3. Short, unpunctuated, bold or ALL-CAPS → `Title`
//! 4. Contains at least one alphabetic word → `NarrativeText`
//! 5. Anything else (numbers, symbols) → `Text`

use crate::element::ElementKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest text (in words) still considered a heading candidate.
const TITLE_MAX_WORDS: usize = 12;

/// Longest text (in chars) still considered a heading candidate.
const TITLE_MAX_CHARS: usize = 120;

/// Layout facts about a paragraph that text alone does not reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphHints {
    /// Paragraph carries list numbering (`w:numPr`).
    pub numbered: bool,
    /// Every text-bearing run is bold.
    pub all_bold: bool,
}

// ── Cleanup ──────────────────────────────────────────────────────────────────

static RE_INVISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{200B}\u{200C}\u{200D}\u{2060}\u{FEFF}\u{00AD}]").unwrap());

static RE_HSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}\u{3000}]+").unwrap());

/// Strip invisible characters, collapse horizontal whitespace, trim each
/// line and drop empty lines. Explicit line breaks survive as `\n`.
pub fn clean_text(raw: &str) -> String {
    let s = raw.replace("\r\n", "\n").replace('\r', "\n");
    let s = RE_INVISIBLE.replace_all(&s, "");
    let s = RE_HSPACE.replace_all(&s, " ");
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Style mapping ────────────────────────────────────────────────────────────

/// Lowercase with whitespace removed, so `Heading 1`, `heading 1` and the
/// style id `Heading1` all compare equal.
fn normalise_style(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

static RE_HEADING_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^heading[1-9]$").unwrap());

/// Element kind implied by a well-known Word paragraph style.
pub fn style_kind(style_name: &str) -> Option<ElementKind> {
    let key = normalise_style(style_name);
    if RE_HEADING_STYLE.is_match(&key) {
        return Some(ElementKind::Title);
    }
    match key.as_str() {
        "title" | "subtitle" | "tocheading" | "contentsheading" => Some(ElementKind::Title),
        "list" | "list2" | "list3" | "listbullet" | "listbullet2" | "listbullet3"
        | "listcontinue" | "listcontinue2" | "listcontinue3" | "listnumber" | "listnumber2"
        | "listnumber3" | "listparagraph" => Some(ElementKind::ListItem),
        "caption" | "intensequote" | "quote" | "macrotext" | "nospacing" => {
            Some(ElementKind::Text)
        }
        _ => None,
    }
}

// ── Text heuristics ──────────────────────────────────────────────────────────

static RE_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^[\u{2022}\u{2023}\u{2043}\u{204C}\u{204D}\u{2219}\u{25A0}\u{25AA}\u{25CB}\u{25CF}\u{25D8}\u{25E6}\u{2619}\u{2765}\u{2767}\u{29BE}\u{29BF}\u{F0B7}\u{00B7}*\u{2013}-]\s+(.+)$",
    )
    .unwrap()
});

static RE_SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?;,]["'\u{201D}\u{2019})\]]*$"#).unwrap());

static RE_ALPHA_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Alphabetic}{2,}").unwrap());

/// The text after a leading bullet glyph, if there is one.
pub fn strip_bullet(text: &str) -> Option<&str> {
    RE_BULLET
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// True when every alphabetic character is uppercase and there are at least two.
pub fn is_all_caps(text: &str) -> bool {
    let mut letters = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if !c.is_uppercase() {
            return false;
        }
        letters += 1;
    }
    letters >= 2
}

/// Short, single-line, alphabetic and not ending like a sentence.
pub fn is_possible_title(text: &str) -> bool {
    !text.is_empty()
        && !text.contains('\n')
        && text.chars().count() <= TITLE_MAX_CHARS
        && text.split_whitespace().count() <= TITLE_MAX_WORDS
        && RE_ALPHA_WORD.is_match(text)
        && !RE_SENTENCE_END.is_match(text)
}

/// Contains at least one alphabetic word of two or more letters.
pub fn is_possible_narrative(text: &str) -> bool {
    RE_ALPHA_WORD.is_match(text)
}

// ── Classification ───────────────────────────────────────────────────────────

/// Classify cleaned paragraph text. Returns the kind and the text to emit
/// (bullet glyph removed for list items), or `None` for empty paragraphs.
pub fn classify(
    text: &str,
    style_name: Option<&str>,
    hints: ParagraphHints,
) -> Option<(ElementKind, String)> {
    let text = clean_text(text);
    if text.is_empty() {
        return None;
    }

    if let Some(kind) = style_name.and_then(style_kind) {
        let text = match kind {
            ElementKind::ListItem => strip_bullet(&text).map(str::to_string).unwrap_or(text),
            _ => text,
        };
        return Some((kind, text));
    }

    if let Some(item) = strip_bullet(&text) {
        return Some((ElementKind::ListItem, item.to_string()));
    }
    if hints.numbered {
        return Some((ElementKind::ListItem, text));
    }
    if is_possible_title(&text) && (hints.all_bold || is_all_caps(&text)) {
        return Some((ElementKind::Title, text));
    }
    if is_possible_narrative(&text) {
        return Some((ElementKind::NarrativeText, text));
    }
    Some((ElementKind::Text, text))
}

// ── Tests ────────────────────────────────────────────────────────────────────
