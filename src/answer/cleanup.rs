//! Post-processing for completed answers.
//!
//! Some model outputs wrap the whole answer in an ```` ```html ```` fence, which
//! stops it from rendering as markup. This strips that one wrapper and nothing
//! else; it is not a Markdown parser.

const OPEN_FENCE: &str = "```html";
const CLOSE_FENCE: &str = "```";

/// Strip an enclosing ```` ```html ```` fence, or just trim when there is none.
///
/// The result never itself matches the fence pattern, so applying this twice
/// gives the same text as applying it once.
pub fn clean_response(raw: &str) -> String {
    let mut text = raw.trim();
    while let Some(inner) = strip_html_fence(text) {
        text = inner.trim();
    }
    text.to_string()
}

fn strip_html_fence(text: &str) -> Option<&str> {
    text.strip_prefix(OPEN_FENCE)?.strip_suffix(CLOSE_FENCE)
}
