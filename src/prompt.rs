//! Intent-specific prompt construction
//!
//! Each intent maps to exactly one payload. Page context is snapshotted here,
//! at build time, so a page that changed since the last message is picked up.

use crate::intent::Intent;
use crate::page::{HostPage, PageContext, ELLIPSIS};
use crate::selection::SelectionState;

/// Characters of page content included alongside an explained selection
pub const EXPLAIN_EXCERPT_CHARS: usize = 500;

/// Question sent by the selection hint shortcut
pub const EXPLAIN_PRESET: &str = "解释这段文字";

const EXPLAIN_INSTRUCTION: &str = "你是一个专业的解释助手。请用简洁易懂的语言解释用户选中的文本。

输出格式：
📖 解释：
- 基本含义：[简明解释]
- 在本文中：[结合上下文的理解]";

const EXPLAIN_TRANSLATION_LINE: &str = "- 翻译：[如果是外语]";

const EXPLAIN_FOOTER: &str = "注意：简洁明了，避免过度扩展。";

const SEARCH_INSTRUCTION: &str = "你是一个智能搜索助手。请从网页内容中找到用户需要的信息。

输出格式：
🔍 搜索结果：

✅ 找到相关内容：
\"[引用原文相关段落]\"

💡 解答：
[基于找到的内容回答用户问题]

📍 位置提示：
[告诉用户这部分内容的大致位置]

注意：必须引用原文，如果没找到明确告知用户。";

/// Payload chosen for one send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Answer locally by copying the page markup; nothing goes over the network
    CopyHtml,
    /// Send this message to the chat endpoint
    Remote(String),
}

/// Build the outgoing payload for a classified message.
///
/// `ExplainSelection` consumes the held selection.
pub fn build(
    intent: Intent,
    message: &str,
    selection: &mut SelectionState,
    page: &dyn HostPage,
) -> Outgoing {
    match intent {
        Intent::CopyHtml => Outgoing::CopyHtml,
        Intent::ExplainSelection => match selection.take() {
            Some(selected) => {
                Outgoing::Remote(explain_prompt(message, &selected, &PageContext::extract(page)))
            }
            None => {
                tracing::warn!("Explain intent without a held selection, sending as is");
                Outgoing::Remote(message.to_string())
            }
        },
        Intent::SearchPage => Outgoing::Remote(search_prompt(message, &PageContext::extract(page))),
        Intent::SummarizePage => {
            Outgoing::Remote(summarize_prompt(message, &PageContext::extract(page)))
        }
        Intent::Plain => Outgoing::Remote(message.to_string()),
    }
}

fn explain_prompt(message: &str, selected: &str, page: &PageContext) -> String {
    let mut instruction = EXPLAIN_INSTRUCTION.to_string();
    if selected.chars().any(|c| c.is_ascii_alphabetic()) {
        instruction.push('\n');
        instruction.push_str(EXPLAIN_TRANSLATION_LINE);
    }

    format!(
        "{instruction}

{EXPLAIN_FOOTER}

网页上下文：
标题：{title}
内容片段：{excerpt}{ELLIPSIS}

选中的文本：
\"{selected}\"

用户问题：{message}",
        title = page.title,
        excerpt = page.excerpt(EXPLAIN_EXCERPT_CHARS),
    )
}

fn search_prompt(message: &str, page: &PageContext) -> String {
    format!(
        "{SEARCH_INSTRUCTION}

网页内容：
标题：{title}
链接：{url}

内容：
{content}

用户搜索：{message}",
        title = page.title,
        url = page.url,
        content = page.content,
    )
}

fn summarize_prompt(message: &str, page: &PageContext) -> String {
    format!(
        "请总结以下网页内容：

网页标题：{title}
网页链接：{url}

网页内容：
{content}

用户问题：{message}",
        title = page.title,
        url = page.url,
        content = page.content,
    )
}

/// Locally synthesized reply after the page markup was copied
pub fn copy_html_confirmation(char_count: usize, title: &str, url: &str) -> String {
    format!(
        "✅ 网页 HTML 已复制到剪贴板！

📊 统计信息：
- 总字符数：{count}
- 页面标题：{title}
- URL：{url}

💡 你现在可以：
1. 粘贴到文本编辑器中
2. 保存为 .html 文件
3. 在浏览器中打开查看效果",
        count = group_thousands(char_count),
    )
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MAX_CONTENT_CHARS;
    use crate::testing::StaticPage;

    fn page() -> StaticPage {
        StaticPage::new("Acme Pricing", "https://acme.test/pricing")
            .with_text("Basic: $10\n\n  Pro: $30  \nContact: sales@acme.test")
    }

    fn remote(outgoing: Outgoing) -> String {
        match outgoing {
            Outgoing::Remote(text) => text,
            Outgoing::CopyHtml => panic!("expected a remote payload"),
        }
    }

    #[test]
    fn test_plain_passes_through() {
        let mut sel = SelectionState::new();
        sel.capture("held");
        let out = build(Intent::Plain, "hello", &mut sel, &page());
        assert_eq!(out, Outgoing::Remote("hello".to_string()));
        // Plain does not consume the selection
        assert!(sel.is_held());
    }

    #[test]
    fn test_copy_html_is_local() {
        let mut sel = SelectionState::new();
        assert_eq!(build(Intent::CopyHtml, "复制网页", &mut sel, &page()), Outgoing::CopyHtml);
    }

    #[test]
    fn test_explain_consumes_selection() {
        let mut sel = SelectionState::new();
        sel.capture("定价策略");
        let text = remote(build(Intent::ExplainSelection, "解释这段文字", &mut sel, &page()));

        assert!(!sel.is_held());
        assert!(text.contains("\"定价策略\""));
        assert!(text.contains("标题：Acme Pricing"));
        assert!(text.contains("Basic: $10\nPro: $30"));
        assert!(text.ends_with("用户问题：解释这段文字"));
        assert!(!text.contains(EXPLAIN_TRANSLATION_LINE));
    }

    #[test]
    fn test_explain_translation_line_for_latin_text() {
        let mut sel = SelectionState::new();
        sel.capture("serendipity");
        let text = remote(build(Intent::ExplainSelection, "explain", &mut sel, &page()));
        assert!(text.contains(EXPLAIN_TRANSLATION_LINE));
    }

    #[test]
    fn test_explain_excerpt_is_bounded() {
        let long = StaticPage::new("Long", "https://x.test").with_text("z".repeat(MAX_CONTENT_CHARS));
        let mut sel = SelectionState::new();
        sel.capture("z");
        let text = remote(build(Intent::ExplainSelection, "meaning?", &mut sel, &long));
        let excerpt = format!("内容片段：{}{ELLIPSIS}\n", "z".repeat(EXPLAIN_EXCERPT_CHARS));
        assert!(text.contains(&excerpt));
        assert!(!text.contains(&"z".repeat(EXPLAIN_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn test_explain_without_selection_falls_back() {
        let mut sel = SelectionState::new();
        let out = build(Intent::ExplainSelection, "解释", &mut sel, &page());
        assert_eq!(out, Outgoing::Remote("解释".to_string()));
    }

    #[test]
    fn test_search_includes_full_page() {
        let mut sel = SelectionState::new();
        let text = remote(build(Intent::SearchPage, "找一下联系方式", &mut sel, &page()));
        assert!(text.starts_with(SEARCH_INSTRUCTION));
        assert!(text.contains("链接：https://acme.test/pricing"));
        assert!(text.contains("Contact: sales@acme.test"));
        assert!(text.ends_with("用户搜索：找一下联系方式"));
    }

    #[test]
    fn test_summarize_includes_full_page() {
        let mut sel = SelectionState::new();
        sel.capture("untouched");
        let text = remote(build(Intent::SummarizePage, "总结这个页面", &mut sel, &page()));
        assert!(text.starts_with("请总结以下网页内容："));
        assert!(text.contains("网页标题：Acme Pricing"));
        assert!(text.ends_with("用户问题：总结这个页面"));
        assert!(sel.is_held());
    }

    #[test]
    fn test_copy_confirmation() {
        let text = copy_html_confirmation(1_234_567, "Acme", "https://acme.test");
        assert!(text.contains("总字符数：1,234,567"));
        assert!(text.contains("页面标题：Acme"));
        assert!(text.contains("URL：https://acme.test"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_345), "12,345");
    }
}
