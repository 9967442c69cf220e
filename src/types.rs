//! Shared types flowing from the loader to every emitter.

use crate::section::{Section, field_str};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Which discovery strategy produced a post.
///
/// Folder posts (a directory with a manifest) resolve section file
/// references against their directory and get chapter pages. Legacy flat
/// posts (a single manifest file in the posts root) have no directory to
/// resolve against, so their sections are used as declared and only a
/// landing page is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSource {
    #[default]
    Folder,
    Legacy,
}

/// A fully-loaded post: manifest fields plus normalized sections.
///
/// Immutable after loading; every emitter reads the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL slug: the landing page lands at `posts/<slug>/`.
    pub slug: String,
    pub title: String,
    /// ISO-8601 date string as declared. Parsing is deferred so the
    /// original value still reaches templates; see [`Post::sort_date`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Short summary for the index page and RSS item description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Draft posts are dropped by the loader and appear nowhere.
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(skip)]
    pub source: PostSource,
}

impl Post {
    /// Date used for newest-first ordering.
    ///
    /// Missing or unparsable dates sort as the Unix epoch, so malformed
    /// dates sink to the end of the list instead of floating to the top.
    pub fn sort_date(&self) -> DateTime<Utc> {
        self.date
            .as_deref()
            .and_then(parse_iso8601)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// RFC 2822 publication date for the RSS item, when the declared date
    /// parses. Malformed dates yield no pubDate rather than a fake one.
    pub fn pub_date(&self) -> Option<String> {
        self.date
            .as_deref()
            .and_then(parse_iso8601)
            .map(|dt| dt.to_rfc2822())
    }

    /// Whether this post expands into chapter pages.
    pub fn chaptered(&self) -> bool {
        self.source == PostSource::Folder && !self.sections.is_empty()
    }

    /// Whether the landing page should show a chapter table of contents.
    pub fn is_series(&self) -> bool {
        self.source == PostSource::Folder && self.sections.len() > 1
    }
}

/// Accept the ISO-8601 shapes manifests actually contain: a full RFC 3339
/// timestamp, a naive datetime, or a bare date.
fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Link to a neighboring chapter. Derived at emit time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterLink {
    pub slug: String,
    pub title: String,
}

/// Build the link for the chapter at `position` (0-based).
///
/// Chapters without a declared title get a positional one, `"Chapter <n>"`
/// with n 1-based, so navigation labels never come out empty.
pub fn chapter_link(sections: &[Section], position: usize) -> ChapterLink {
    let section = &sections[position];
    ChapterLink {
        slug: field_str(section, "section_slug").unwrap_or_default().to_string(),
        title: field_str(section, "title")
            .map(str::to_string)
            .unwrap_or_else(|| format!("Chapter {}", position + 1)),
    }
}

/// Previous and next links for the chapter at `index`.
///
/// `prev` is `None` at the first chapter, `next` is `None` at the last.
pub fn chapter_neighbors(
    sections: &[Section],
    index: usize,
) -> (Option<ChapterLink>, Option<ChapterLink>) {
    let prev = index.checked_sub(1).map(|i| chapter_link(sections, i));
    let next = (index + 1 < sections.len()).then(|| chapter_link(sections, index + 1));
    (prev, next)
}
