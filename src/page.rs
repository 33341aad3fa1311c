use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::name::PasteName;

/// The edit page, with `{{title}}`, `{{action}}` and `{{content}}` slots.
const PASTE_PAGE: &str = include_str!("../assets/paste.html");

/// Body served for any request whose path is not a valid paste name.
pub const INVALID_URL: &str = "Invalid URL!";

/// Render the edit page for a paste.
///
/// The textarea in the template is followed by a newline, which browsers
/// discard, so content that itself starts with a newline keeps it.
pub fn render_paste(name: &PasteName, content: &str) -> String {
    let path = name.path();

    // content goes in last so that text resembling a slot is left alone
    PASTE_PAGE
        .replace("{{title}}", &encode_text(&path))
        .replace("{{action}}", &encode_double_quoted_attribute(&path))
        .replace("{{content}}", &encode_text(content))
}

/// The raw (still escaped) text inside the page's textarea.
#[cfg(test)]
pub(crate) fn textarea(page: &str) -> &str {
    const OPEN: &str = "id=\"pastearea\">\n";
    let start = page.find(OPEN).expect("no textarea in page") + OPEN.len();
    let end = page[start..].find("</textarea>").expect("unclosed textarea");
    &page[start..start + end]
}
