//! Full site assembly.
//!
//! The batch pipeline: clean the output directory, copy static assets,
//! load the site config and posts, then drive every emitter. A run either
//! completes or aborts on the first fatal error; the output directory is
//! clobbered at the start of each run, so a failed build is repaired by the
//! next successful one.
//!
//! ## Output Layout
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── about.html                      # only if content/about.md exists
//! ├── posts/
//! │   └── field-notes/
//! │       ├── index.html              # landing page / table of contents
//! │       ├── the-premise/index.html  # chapter pages (folder posts only)
//! │       └── the-turn/index.html
//! ├── feed.xml
//! ├── sitemap.xml
//! ├── CNAME                           # only if site.json sets cname
//! └── static/                         # verbatim copy
//! ```

use crate::config::{self, ConfigError, SiteConfig};
use crate::feed;
use crate::load::{self, LoadError};
use crate::markdown::{self, MarkdownOptions};
use crate::render;
use crate::sitemap;
use crate::types::{Post, chapter_neighbors};
use crate::section::field_str;
use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

/// Input and output locations for one build.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Content root: `site.json`, `about.md`, `posts/`.
    pub content: PathBuf,
    /// Static asset directory, copied verbatim to `<output>/static/`.
    pub static_dir: PathBuf,
    /// Output root. Deleted and rebuilt on every run.
    pub output: PathBuf,
}

/// What a build produced, for CLI reporting.
#[derive(Debug)]
pub struct BuildSummary {
    pub posts: usize,
    pub pages: usize,
}

/// Run the full build.
pub fn build(paths: &BuildPaths) -> Result<BuildSummary, BuildError> {
    clean_output(&paths.output)?;
    copy_static(&paths.static_dir, &paths.output)?;

    let site = config::load_config(&paths.content)?;
    let options = MarkdownOptions::default();
    let posts = load::load_posts(&paths.content.join("posts"), &options)?;
    let about_html = load_about(&paths.content, &options)?;

    let mut pages = 0;

    write_page(&paths.output.join("index.html"), render::render_index(&site, &posts))?;
    pages += 1;

    if let Some(body) = &about_html {
        write_page(
            &paths.output.join("about.html"),
            render::render_about_page(&site, body),
        )?;
        pages += 1;
    }

    for post in &posts {
        pages += emit_post(&paths.output, &site, post)?;
    }

    fs::write(paths.output.join("feed.xml"), feed::feed_xml(&site, &posts))?;
    fs::write(
        paths.output.join("sitemap.xml"),
        sitemap::sitemap_xml(&site, &posts, about_html.is_some()),
    )?;

    if let Some(cname) = &site.cname {
        fs::write(paths.output.join("CNAME"), format!("{cname}\n"))?;
    }

    Ok(BuildSummary {
        posts: posts.len(),
        pages,
    })
}

/// Emit the landing page plus, for folder posts, one page per chapter.
///
/// A post with N sections produces N+1 pages. Chapter URLs come from the
/// loader-assigned `section_slug`, so reordering unrelated sections leaves
/// untouched chapter permalinks intact.
fn emit_post(output: &Path, site: &SiteConfig, post: &Post) -> Result<usize, BuildError> {
    let post_dir = output.join("posts").join(&post.slug);

    write_page(&post_dir.join("index.html"), render::render_post_page(site, post))?;
    let mut pages = 1;

    if post.chaptered() {
        for (index, section) in post.sections.iter().enumerate() {
            let (prev, next) = chapter_neighbors(&post.sections, index);
            let slug = field_str(section, "section_slug").unwrap_or_default();
            let page = render::render_chapter_page(site, post, index, prev.as_ref(), next.as_ref());
            write_page(&post_dir.join(slug).join("index.html"), page)?;
            pages += 1;
        }
    }

    println!("Generated posts/{} ({} pages)", post.slug, pages);
    Ok(pages)
}

/// Render `content/about.md` if present; an absent file means no about page.
fn load_about(
    content_root: &Path,
    options: &MarkdownOptions,
) -> Result<Option<String>, BuildError> {
    let path = content_root.join("about.md");
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    Ok(Some(markdown::render(&text, options)))
}

fn clean_output(output: &Path) -> Result<(), BuildError> {
    if output.exists() {
        fs::remove_dir_all(output)?;
    }
    fs::create_dir_all(output)?;
    Ok(())
}

/// Copy the static directory verbatim to `<output>/static/`.
///
/// A missing static directory is fine — not every site has assets.
fn copy_static(static_dir: &Path, output: &Path) -> Result<(), BuildError> {
    if !static_dir.exists() {
        return Ok(());
    }
    let dest_root = output.join("static");
    for entry in WalkDir::new(static_dir) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(static_dir).unwrap();
        let dest = dest_root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

fn write_page(path: &Path, markup: Markup) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())?;
    Ok(())
}
