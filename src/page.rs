//! Host page snapshot for prompt enrichment
//!
//! The page can change under the widget at any time, so the snapshot is taken
//! fresh for every message and never cached.

mod html;

pub use html::HtmlPage;

/// Upper bound on page content characters sent with a prompt
pub const MAX_CONTENT_CHARS: usize = 3000;

/// Marker appended to truncated content
pub const ELLIPSIS: &str = "...";

/// The page hosting the widget
pub trait HostPage: Send + Sync {
    fn title(&self) -> String;

    fn url(&self) -> String;

    /// Rendered text content of the document body
    fn text(&self) -> String;

    /// Full document markup
    fn outer_html(&self) -> String;
}

/// Normalized snapshot of the host page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub title: String,
    pub content: String,
    pub url: String,
}

impl PageContext {
    pub fn extract(page: &dyn HostPage) -> Self {
        let content = truncate_chars(&normalize_text(&page.text()), MAX_CONTENT_CHARS);
        Self {
            title: page.title(),
            content,
            url: page.url(),
        }
    }

    /// First `max_chars` characters of the content, without the ellipsis marker
    pub fn excerpt(&self, max_chars: usize) -> &str {
        prefix_chars(&self.content, max_chars)
    }
}

/// Trim every line, drop empty lines, and rejoin with `\n`
pub fn normalize_text(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut to `max_chars` characters and append [`ELLIPSIS`] if anything was dropped
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let prefix = prefix_chars(text, max_chars);
    if prefix.len() == text.len() {
        text.to_string()
    } else {
        format!("{prefix}{ELLIPSIS}")
    }
}

fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text.get(..byte_idx).unwrap_or(text),
        None => text,
    }
}
