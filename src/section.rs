//! Content section normalization.
//!
//! A post manifest declares its body as an ordered list of sections. Each
//! section is an open JSON record whose `type` tag selects the
//! interpretation:
//!
//! - `markdown` — the body lives in a Markdown file next to the manifest
//! - `expander` — a collapsible block, either file-backed or inline text
//! - `p`, `html`, anything else — already renderable, passed through
//!
//! Normalization rewrites file-backed sections into their rendered forms
//! (`html`, `expander_html`) so templates only ever see pre-rendered
//! content. The schema is open-ended on purpose: sections have grown margin
//! images, margin notes, and chapter titles over time, and templates evolve
//! independently of this module. Every key in [`PRESERVED_FIELDS`] is copied
//! from input to output verbatim, in every branch, regardless of whether the
//! branch taken understands it.

use crate::markdown::{self, MarkdownOptions};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An open section record, as declared in a manifest or as normalized.
pub type Section = serde_json::Map<String, Value>;

/// Keys carried from raw to normalized sections unchanged.
///
/// This list is part of the manifest contract: adding a key here is how a
/// new per-section field reaches the templates without touching the
/// normalization branches. Keys not on the list do not survive
/// normalization of file-backed sections.
pub const PRESERVED_FIELDS: &[&str] = &[
    // per-section margin images and notes
    "left_margin_image",
    "left_margin_alt",
    "left_margin_caption",
    "right_margin_image",
    "right_margin_alt",
    "right_margin_caption",
    "left_note",
    "left_note_html",
    "right_note",
    "right_note_html",
    // expander label
    "label",
    // chapter title and explicit chapter slug
    "title",
    "section_slug",
];

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{section_type} section is missing required field `{field}`")]
    MissingField {
        section_type: String,
        field: &'static str,
    },
}

/// String accessor for a section field.
pub fn field_str<'a>(section: &'a Section, key: &str) -> Option<&'a str> {
    section.get(key).and_then(Value::as_str)
}

/// Closed interpretation of a raw section's `type` tag.
///
/// Everything the normalizer doesn't recognize — including a missing
/// `type` — maps to `Passthrough` rather than an error, so manifests can
/// carry section kinds this build doesn't know about yet.
enum SectionKind<'a> {
    Markdown { file: &'a str },
    ExpanderFile { file: &'a str, label: Option<&'a str> },
    Passthrough,
}

fn classify(raw: &Section) -> Result<SectionKind<'_>, SectionError> {
    match field_str(raw, "type") {
        Some("markdown") => {
            let file = field_str(raw, "file").ok_or_else(|| SectionError::MissingField {
                section_type: "markdown".to_string(),
                field: "file",
            })?;
            Ok(SectionKind::Markdown { file })
        }
        Some("expander") => Ok(match field_str(raw, "file") {
            Some(file) => SectionKind::ExpanderFile {
                file,
                label: field_str(raw, "label"),
            },
            // Inline expander: text is already in the record.
            None => SectionKind::Passthrough,
        }),
        _ => Ok(SectionKind::Passthrough),
    }
}

/// Normalize one raw section, resolving file references against `post_dir`.
///
/// The preserved-field copy runs last in every branch so type-specific
/// output never clobbers a declared field, and fields absent on the input
/// are never invented.
pub fn normalize_section(
    post_dir: &Path,
    raw: &Section,
    options: &MarkdownOptions,
) -> Result<Section, SectionError> {
    let mut normalized = match classify(raw)? {
        SectionKind::Markdown { file } => {
            let html = render_referenced(post_dir, file, options)?;
            let mut out = Section::new();
            out.insert("type".to_string(), Value::String("html".to_string()));
            out.insert("html".to_string(), Value::String(html));
            out
        }
        SectionKind::ExpanderFile { file, label } => {
            let html = render_referenced(post_dir, file, options)?;
            let mut out = Section::new();
            out.insert(
                "type".to_string(),
                Value::String("expander_html".to_string()),
            );
            out.insert(
                "label".to_string(),
                Value::String(label.unwrap_or("More").to_string()),
            );
            out.insert("html".to_string(), Value::String(html));
            out
        }
        SectionKind::Passthrough => raw.clone(),
    };

    for key in PRESERVED_FIELDS {
        if let Some(value) = raw.get(*key) {
            normalized.insert((*key).to_string(), value.clone());
        }
    }

    Ok(normalized)
}

fn render_referenced(
    post_dir: &Path,
    file: &str,
    options: &MarkdownOptions,
) -> Result<String, SectionError> {
    let path = post_dir.join(file);
    let text = fs::read_to_string(&path).map_err(|source| SectionError::Read { path, source })?;
    Ok(markdown::render(&text, options))
}
