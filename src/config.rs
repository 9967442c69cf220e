//! Site configuration.
//!
//! Loaded once per build from `site.json` in the content root and shared
//! read-only by every emitter. A missing file is not an error — the stock
//! defaults produce a working (if blandly titled) site — but a file that
//! exists and fails to parse aborts the build.
//!
//! ```json
//! {
//!   "title": "A Commonplace Book",
//!   "description": "Essays and marginalia",
//!   "base_url": "https://example.com",
//!   "cname": "example.com",
//!   "language": "en"
//! }
//! ```
//!
//! Keys beyond the known set are tolerated: the config schema has grown over
//! time and older builds must keep working against newer content trees.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Site config filename inside the content root.
pub const SITE_CONFIG: &str = "site.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid site config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Site-wide settings shared by every emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, used on the index page and as the RSS channel title.
    pub title: String,
    /// One-line site description (index page, RSS channel).
    pub description: String,
    /// Absolute URL the site is served from, used for feed and sitemap
    /// links. May be empty for relative-only builds.
    pub base_url: String,
    /// Custom domain; when set, a `CNAME` file is emitted.
    pub cname: Option<String>,
    /// BCP 47 language tag for `<html lang>` and the RSS channel.
    pub language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            base_url: String::new(),
            cname: None,
            language: "en".to_string(),
        }
    }
}

impl SiteConfig {
    /// Absolute URL for a site-relative page path.
    ///
    /// `page_url("posts/foo/")` → `https://example.com/posts/foo/`, with the
    /// base URL's trailing slash normalized away first.
    pub fn page_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Load `site.json` from the content root, falling back to defaults when the
/// file does not exist.
pub fn load_config(content_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = content_root.join(SITE_CONFIG);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let text = fs::read_to_string(&path)?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json { path, source })
}
