//! Host page backed by a markup string
//!
//! Approximates the rendered text of a document: script/style/head bodies are
//! removed, block-level tags become line breaks, remaining tags are stripped and
//! the common entities decoded. Good enough for prompt context, not a renderer.

use super::HostPage;
use regex::Regex;
use std::sync::LazyLock;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));

/// Elements whose content is never rendered, `head` first so its nested
/// scripts and title go with it. One pattern per tag keeps open and close paired.
static HIDDEN_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["head", "script", "style", "noscript", "template"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).expect("valid regex")
        })
        .collect()
});

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(br|/?p|/?div|/?li|/?ul|/?ol|/?tr|/?h[1-6]|/?section|/?article|/?header|/?footer|/?nav|/?table|/?blockquote|/?pre)\b[^>]*>")
        .expect("valid regex")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// A page whose content comes from an HTML document
#[derive(Debug, Clone)]
pub struct HtmlPage {
    markup: String,
    url: String,
}

impl HtmlPage {
    pub fn new(markup: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            url: url.into(),
        }
    }
}

impl HostPage for HtmlPage {
    fn title(&self) -> String {
        TITLE_RE
            .captures(&self.markup)
            .and_then(|c| c.get(1))
            .map(|m| decode_entities(m.as_str().trim()))
            .unwrap_or_default()
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn text(&self) -> String {
        let mut text = COMMENT_RE.replace_all(&self.markup, "").into_owned();
        for hidden in HIDDEN_RES.iter() {
            text = hidden.replace_all(&text, "").into_owned();
        }
        let text = BLOCK_RE.replace_all(&text, "\n");
        let text = TAG_RE.replace_all(&text, "");
        decode_entities(&text)
    }

    fn outer_html(&self) -> String {
        self.markup.clone()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
