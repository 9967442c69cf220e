//! HTML page rendering.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! malformed markup is a build error, interpolation is auto-escaped, and
//! there is no template directory to ship or get out of sync. Collaborator
//! HTML (rendered Markdown, pre-rendered note fragments) is the only thing
//! injected with `PreEscaped`.
//!
//! ## Generated Pages
//!
//! - **Index** (`/index.html`): newest-first post list
//! - **Post landing** (`/posts/{slug}/index.html`): full post, plus a
//!   chapter table of contents for multi-section series
//! - **Chapter** (`/posts/{slug}/{chapter}/index.html`): one section with
//!   prev/next navigation
//! - **About** (`/about.html`): optional markdown page
//!
//! Section markup mirrors the content model: the main column renders the
//! section body, margin images and notes hang off asides on either side.

use crate::config::SiteConfig;
use crate::section::{Section, field_str};
use crate::types::{ChapterLink, Post, chapter_link};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Renders the base HTML document structure shared by every page.
fn base_document(site: &SiteConfig, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/style.css";
                link rel="alternate" type="application/rss+xml" title=(site.title) href="/feed.xml";
            }
            body {
                header.site-header {
                    a.site-title href="/" { (site.title) }
                }
                (content)
            }
        }
    }
}

fn page_title(site: &SiteConfig, title: &str) -> String {
    format!("{} · {}", title, site.title)
}

// ============================================================================
// Sections
// ============================================================================

/// Renders one normalized section: margin asides around the body column.
pub fn render_section(section: &Section) -> Markup {
    html! {
        div.section {
            @if let Some(aside) = margin_aside(section, "left") { (aside) }
            div.section-body { (section_body(section)) }
            @if let Some(aside) = margin_aside(section, "right") { (aside) }
        }
    }
}

fn section_body(section: &Section) -> Markup {
    match field_str(section, "type") {
        Some("html") => html! {
            @if let Some(body) = field_str(section, "html") { (PreEscaped(body)) }
        },
        Some("expander_html") => html! {
            details.expander {
                summary { (field_str(section, "label").unwrap_or("More")) }
                div.expander-body {
                    @if let Some(body) = field_str(section, "html") { (PreEscaped(body)) }
                }
            }
        },
        // inline expander: plain text body, never a file reference
        Some("expander") => html! {
            details.expander {
                summary { (field_str(section, "label").unwrap_or("More")) }
                div.expander-body {
                    p { (field_str(section, "text").unwrap_or_default()) }
                }
            }
        },
        Some("p") | None => html! {
            @if let Some(text) = field_str(section, "text") { p { (text) } }
        },
        // unrecognized section kinds are omitted, not an error
        Some(_) => html! {},
    }
}

/// Margin aside for one side: an optional captioned image plus an optional
/// note (pre-rendered `*_note_html` wins over plain `*_note`).
fn margin_aside(section: &Section, side: &str) -> Option<Markup> {
    let image = field_str(section, &format!("{side}_margin_image"));
    let alt = field_str(section, &format!("{side}_margin_alt"));
    let caption = field_str(section, &format!("{side}_margin_caption"));
    let note_html = field_str(section, &format!("{side}_note_html"));
    let note = field_str(section, &format!("{side}_note"));

    if image.is_none() && note_html.is_none() && note.is_none() {
        return None;
    }

    Some(html! {
        aside class={ "margin margin-" (side) } {
            @if let Some(src) = image {
                figure {
                    img src=(src) alt=(alt.unwrap_or(""));
                    @if let Some(text) = caption { figcaption { (text) } }
                }
            }
            @if let Some(body) = note_html {
                div.margin-note { (PreEscaped(body)) }
            } @else if let Some(text) = note {
                div.margin-note { (text) }
            }
        }
    })
}

// ============================================================================
// Pages
// ============================================================================

/// Renders the index page: site masthead and newest-first post list.
pub fn render_index(site: &SiteConfig, posts: &[Post]) -> Markup {
    let content = html! {
        main.index-page {
            h1 { (site.title) }
            @if !site.description.is_empty() {
                p.site-description { (site.description) }
            }
            ul.post-list {
                @for post in posts {
                    li {
                        a href={ "/posts/" (post.slug) "/" } { (post.title) }
                        @if let Some(date) = &post.date {
                            " "
                            time.post-date datetime=(date) { (date) }
                        }
                        @if let Some(description) = &post.description {
                            p.post-summary { (description) }
                        }
                    }
                }
            }
        }
    };
    base_document(site, &site.title, content)
}

/// Renders a post landing page: the whole post in reading order, with a
/// chapter table of contents when the post is a multi-section series.
pub fn render_post_page(site: &SiteConfig, post: &Post) -> Markup {
    let content = html! {
        main.post-page {
            article.post {
                header.post-header {
                    h1 { (post.title) }
                    @if let Some(date) = &post.date {
                        time.post-date datetime=(date) { (date) }
                    }
                }
                @if post.is_series() {
                    nav.chapter-toc {
                        h2 { "Chapters" }
                        ol {
                            @for i in 0..post.sections.len() {
                                @let link = chapter_link(&post.sections, i);
                                li { a href={ (link.slug) "/" } { (link.title) } }
                            }
                        }
                    }
                }
                @for section in &post.sections {
                    (render_section(section))
                }
            }
        }
    };
    base_document(site, &page_title(site, &post.title), content)
}

/// Renders one chapter page with prev/next navigation.
///
/// `index` is the section's 0-based position; `prev`/`next` are `None` at
/// the series edges.
pub fn render_chapter_page(
    site: &SiteConfig,
    post: &Post,
    index: usize,
    prev: Option<&ChapterLink>,
    next: Option<&ChapterLink>,
) -> Markup {
    let section = &post.sections[index];
    let chapter_title = field_str(section, "title")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Chapter {}", index + 1));

    let content = html! {
        main.chapter-page {
            article.chapter {
                header.chapter-header {
                    p.chapter-series { a href="../" { (post.title) } }
                    h1 { (chapter_title) }
                }
                (render_section(section))
            }
            nav.chapter-nav {
                @if let Some(link) = prev {
                    a.chapter-prev href={ "../" (link.slug) "/" } { "\u{2190} " (link.title) }
                }
                @if let Some(link) = next {
                    a.chapter-next href={ "../" (link.slug) "/" } { (link.title) " \u{2192}" }
                }
            }
        }
    };
    base_document(site, &page_title(site, &chapter_title), content)
}

/// Renders the about page from pre-rendered markdown HTML.
pub fn render_about_page(site: &SiteConfig, body_html: &str) -> Markup {
    let content = html! {
        main.about-page {
            article.about-content {
                (PreEscaped(body_html))
            }
        }
    };
    base_document(site, &page_title(site, "About"), content)
}
