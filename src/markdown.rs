//! Markdown rendering via pulldown-cmark.
//!
//! This is a thin collaborator wrapper: raw text plus an extension set in,
//! HTML fragment out. The extension set is explicit rather than hardcoded
//! because different builds want different capabilities (a site heavy on
//! data posts turns tables on, a plain diary doesn't need footnotes).

use pulldown_cmark::{Options, Parser, html};

/// Which CommonMark extensions to enable when rendering.
///
/// The default enables everything — matching what essay-style content
/// actually uses — and each flag maps 1:1 onto a pulldown-cmark option, so
/// the set can grow alongside the parser without touching call sites.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// GitHub-style pipe tables.
    pub tables: bool,
    /// Footnote references and definitions.
    pub footnotes: bool,
    /// `~~strikethrough~~` spans.
    pub strikethrough: bool,
    /// Smart typography: curly quotes, en/em dashes, ellipses.
    pub smart_punctuation: bool,
    /// `{#id .class}` annotations on headings, used for anchor links.
    pub heading_attributes: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            smart_punctuation: true,
            heading_attributes: true,
        }
    }
}

impl MarkdownOptions {
    fn to_cmark(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        if self.heading_attributes {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}

/// Render Markdown text to an HTML fragment.
pub fn render(text: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(text, options.to_cmark());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
