/*!
 * Markup cleanup for translated text.
 *
 * The external service occasionally wraps words in HTML tags (`<g id="1">`,
 * `<b>` and friends). Everything the relay returns goes through
 * [`strip_html_tags`] first.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything shaped like a tag: `<`, then no `>`, then `>`
static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap()
});

/// Remove every tag-shaped substring from the text.
///
/// Unbalanced brackets are left alone: `a < b` has no closing `>` and stays.
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG_REGEX.replace_all(text, "").into_owned()
}
