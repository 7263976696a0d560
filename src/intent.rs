//! Keyword-based intent classification
//!
//! Matching is plain substring containment on the lower-cased message. There is
//! no tokenization, so "findings" still reads as a search request.

use std::fmt;

const COPY_HTML_KEYWORDS: &[&str] = &[
    "复制网页",
    "复制html",
    "复制页面",
    "导出html",
    "获取html",
    "网页源码",
    "页面代码",
    "copy page",
    "copy html",
    "export html",
    "get html",
    "page source",
    "page code",
];

const EXPLAIN_KEYWORDS: &[&str] = &[
    "解释",
    "说明",
    "什么意思",
    "是什么",
    "讲解",
    "翻译",
    "explain",
    "meaning",
    "mean",
    "translate",
];

const SEARCH_KEYWORDS: &[&str] = &[
    "找",
    "搜索",
    "查找",
    "寻找",
    "在页面",
    "在网页",
    "页面里",
    "网页里",
    "有没有",
    "哪里有",
    "find",
    "search",
    "locate",
    "where is",
];

const SUMMARIZE_KEYWORDS: &[&str] = &[
    "总结",
    "摘要",
    "概括",
    "归纳",
    "这个网页",
    "这个页面",
    "当前页面",
    "当前网页",
    "网页内容",
    "页面内容",
    "summarize",
    "summary",
    "overview",
    "this page",
    "current page",
];

/// Classified purpose of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Copy the page markup to the clipboard, answered locally
    CopyHtml,
    /// Explain the currently held selection
    ExplainSelection,
    /// Find something in the page content
    SearchPage,
    /// Summarize the page content
    SummarizePage,
    /// Forward the message unchanged
    Plain,
}

impl Intent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CopyHtml => "copy_html",
            Self::ExplainSelection => "explain_selection",
            Self::SearchPage => "search_page",
            Self::SummarizePage => "summarize_page",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Classify a message; the first matching rule wins.
#[must_use]
pub fn classify(message: &str, has_selection: bool) -> Intent {
    let lower = message.to_lowercase();

    if contains_any(&lower, COPY_HTML_KEYWORDS) {
        Intent::CopyHtml
    } else if has_selection && contains_any(&lower, EXPLAIN_KEYWORDS) {
        Intent::ExplainSelection
    } else if contains_any(&lower, SEARCH_KEYWORDS) {
        Intent::SearchPage
    } else if contains_any(&lower, SUMMARIZE_KEYWORDS) {
        Intent::SummarizePage
    } else {
        Intent::Plain
    }
}
