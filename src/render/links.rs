//! Inline `[label](url)` link syntax.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("inline link pattern is valid")
});

/// Replace every `[label](url)` in `text` with an anchor opening in a new tab.
///
/// Label and url are inserted verbatim; text without link syntax is returned
/// unchanged and unallocated.
///
/// # Examples
///
/// ```
/// use gazette::render::format_links;
///
/// assert_eq!(
///     format_links("See [the docs](https://example.com)."),
///     r#"See <a href="https://example.com" target="_blank" rel="noopener noreferrer">the docs</a>."#
/// );
/// assert_eq!(format_links("no links here"), "no links here");
/// ```
pub fn format_links(text: &str) -> Cow<'_, str> {
    INLINE_LINK.replace_all(text, |caps: &Captures<'_>| {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            &caps[2], &caps[1]
        )
    })
}
