//! Minimal HTML helpers for server-rendered pages.

use axum::response::Html;

const SHELL: &str = include_str!("../../templates/shell.html");

/// Escape text for use in element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `body` (already escaped) in the document shell.
pub fn document(title: &str, body: &str) -> Html<String> {
    Html(
        SHELL
            .replace("{{TITLE}}", &escape(title))
            .replace("{{BODY}}", body),
    )
}
