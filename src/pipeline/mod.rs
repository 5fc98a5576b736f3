//! Pipeline stages for legacy-document partitioning.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ workspace ──▶ convert ──▶ docx ──▶ classify
//! (path/stream) (temp dir)  (soffice)  (zip+xml)  (element kinds)
//! ```
//!
//! 1. [`input`]     — resolve a path or spool a stream to a local file
//! 2. [`workspace`] — scoped temp directory for one conversion
//! 3. [`convert`]   — [`convert::LegacyConverter`] seam and the LibreOffice
//!    implementation; blocking, runs in `spawn_blocking`
//! 4. [`parse`]     — [`parse::StructuralParser`] seam
//! 5. [`docx`]      — built-in DOCX parser
//! 6. [`classify`]  — text cleanup and element-type heuristics used by [`docx`]

pub mod classify;
pub mod convert;
pub mod docx;
pub mod input;
pub mod parse;
pub mod workspace;
