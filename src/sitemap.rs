//! Sitemap generation.
//!
//! Lists the top-level emitted pages (root, about when present, post
//! landing pages) for search engine indexing. Chapter pages are reachable
//! from their landing page and stay out of the sitemap.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!   </url>
//! </urlset>
//! ```

use crate::config::SiteConfig;
use crate::types::Post;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Generate the sitemap XML for the emitted top-level pages.
pub fn sitemap_xml(site: &SiteConfig, posts: &[Post], has_about: bool) -> String {
    let mut locs = Vec::with_capacity(posts.len() + 2);
    locs.push(site.page_url(""));
    if has_about {
        locs.push(site.page_url("about.html"));
    }
    for post in posts {
        locs.push(site.page_url(&format!("posts/{}/", post.slug)));
    }

    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');
    for loc in locs {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
