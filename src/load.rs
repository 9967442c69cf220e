//! Post discovery and loading.
//!
//! Two layouts coexist under the posts root, for backward compatibility
//! with content written before posts became folders:
//!
//! ```text
//! content/posts/
//! ├── field-notes/              # folder post
//! │   ├── post.json             # manifest
//! │   ├── intro.md              # referenced by a markdown section
//! │   └── appendix.md
//! ├── old-essay.json            # legacy flat post (sections as declared)
//! └── scratch/                  # no post.json — silently ignored
//! ```
//!
//! Folder posts get the full treatment: sections are normalized with the
//! folder as the base path and each one is assigned a `section_slug` for
//! its chapter page. Legacy flat posts have no folder to resolve files
//! against, so their sections pass through as declared.
//!
//! The two strategies are deliberately separate functions feeding one
//! common assembly path, so the legacy one can be retired without touching
//! the other.

use crate::markdown::MarkdownOptions;
use crate::section::{self, Section, SectionError, field_str};
use crate::slug::slugify;
use crate::types::{Post, PostSource};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest filename marking a subdirectory as a folder post.
pub const POST_MANIFEST: &str = "post.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Section(#[from] SectionError),
}

/// Discover, normalize, filter, and order every post under `posts_root`.
///
/// A missing posts root is an empty site, not an error. Draft posts are
/// dropped entirely. The result is newest-first by declared date, with
/// missing/unparsable dates sorting as the epoch (end of the list).
pub fn load_posts(posts_root: &Path, options: &MarkdownOptions) -> Result<Vec<Post>, LoadError> {
    if !posts_root.exists() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(posts_root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    let mut posts = Vec::new();
    for entry in &entries {
        if entry.is_dir() {
            if entry.join(POST_MANIFEST).exists() {
                posts.push(load_folder_post(entry, options)?);
            }
            // directories without a manifest are not posts
        } else if is_legacy_manifest(entry) {
            posts.push(load_legacy_post(entry)?);
        }
    }

    posts.retain(|p| !p.draft);
    // stable: equal dates keep directory order
    posts.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));
    Ok(posts)
}

/// Strategy 1: a subdirectory with a `post.json` manifest.
fn load_folder_post(post_dir: &Path, options: &MarkdownOptions) -> Result<Post, LoadError> {
    let mut post = parse_manifest(&post_dir.join(POST_MANIFEST))?;
    post.source = PostSource::Folder;

    let mut sections = Vec::with_capacity(post.sections.len());
    for (position, raw) in post.sections.iter().enumerate() {
        let mut normalized = section::normalize_section(post_dir, raw, options)?;
        let slug = section_slug(&normalized, position);
        normalized.insert("section_slug".to_string(), Value::String(slug));
        sections.push(normalized);
    }
    post.sections = sections;
    Ok(post)
}

/// Strategy 2: a loose `*.json` file directly in the posts root.
///
/// No per-post directory exists, so sections are used exactly as declared —
/// no file resolution, no chapter slugs.
fn load_legacy_post(path: &Path) -> Result<Post, LoadError> {
    let mut post = parse_manifest(path)?;
    post.source = PostSource::Legacy;
    Ok(post)
}

fn is_legacy_manifest(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
        && path.file_name().map(|n| n != POST_MANIFEST).unwrap_or(false)
}

fn parse_manifest(path: &Path) -> Result<Post, LoadError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Chapter slug for the section at `position` (0-based).
///
/// Declared `section_slug` wins, then the section title, both run through
/// the slug normalizer; untitled sections get a positional fallback.
fn section_slug(section: &Section, position: usize) -> String {
    if let Some(declared) = field_str(section, "section_slug") {
        slugify(declared)
    } else if let Some(title) = field_str(section, "title") {
        slugify(title)
    } else {
        format!("section-{}", position + 1)
    }
}
