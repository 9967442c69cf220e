//! URL slug normalization.
//!
//! Chapter URLs are derived from content (a declared `section_slug` or the
//! chapter title), so every derivation path funnels through [`slugify`] to
//! guarantee the result is a stable, URL-safe path segment.

/// Convert arbitrary text to a URL-safe slug.
///
/// Lowercases, drops apostrophes (both `'` and the typographic `’`), keeps
/// only ASCII letters, digits, whitespace, and hyphens, then collapses
/// whitespace and hyphen runs into single hyphens with no leading/trailing
/// hyphen. Total: never fails, and an input with nothing usable (empty
/// string, punctuation only) yields the literal `"chapter"`.
///
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
///
/// # Examples
///
/// ```
/// use marginalia::slug::slugify;
///
/// assert_eq!(slugify("Chapter One"), "chapter-one");
/// assert_eq!(slugify("  What’s in a Name?  "), "whats-in-a-name");
/// assert_eq!(slugify("!!!"), "chapter");
/// ```
pub fn slugify(text: &str) -> String {
    let slug = text
        .trim()
        .to_lowercase()
        .replace(['\u{2019}', '\''], "")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect::<String>()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "chapter".to_string()
    } else {
        slug
    }
}
