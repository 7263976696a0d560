//! Terminal front end for the page chat widget
//!
//! Loads an HTML file as the host page and chats about it from stdin.
//!
//! Commands: `/select <text>` sets the page selection, `/explain` explains it,
//! `/quit` exits. Anything else is sent as a message.

use page_chat::{ChatView, FileClipboard, HtmlPage, HttpChatWidget, MessageId, Role, WidgetConfig};
use std::io::Write;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Renders the widget into the terminal
struct TerminalView {
    /// Text currently shown for the streaming message
    streaming: Mutex<String>,
}

impl TerminalView {
    fn new() -> Self {
        Self {
            streaming: Mutex::new(String::new()),
        }
    }

    fn write(text: &str) {
        if let Err(e) = write_flushed(&mut std::io::stdout().lock(), text) {
            tracing::debug!(error = %e, "Failed to write to stdout");
        }
    }
}

fn write_flushed<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

impl ChatView for TerminalView {
    fn render_message(&self, role: Role, text: &str) {
        Self::write(&format!("{}> {text}\n", role.as_str()));
    }

    fn begin_assistant_message(&self) -> MessageId {
        self.streaming
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
        Self::write("assistant> ");
        MessageId(0)
    }

    fn update_message(&self, _id: MessageId, text: &str) {
        let mut shown = self
            .streaming
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Updates carry the full text; print only what is new when possible
        match text.strip_prefix(shown.as_str()) {
            Some(suffix) => Self::write(suffix),
            None => Self::write(&format!("\nassistant> {text}")),
        }
        text.clone_into(&mut *shown);
    }

    fn show_thinking(&self) {
        Self::write("AI 正在思考...");
    }

    fn hide_thinking(&self) {
        Self::write("\r\x1b[2K");
    }

    fn set_send_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "Send control toggled");
    }

    fn set_input(&self, text: &str) {
        if !text.is_empty() {
            Self::write(&format!("> {text}\n"));
        }
    }

    fn set_window_open(&self, open: bool) {
        tracing::debug!(open, "Window toggled");
    }

    fn show_selection_hint(&self) {
        Self::write("💡 点击解释这段文字 (/explain)\n");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "page_chat=info".into());
    if std::env::var_os("PAGE_CHAT_LOG_JSON").is_some() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }

    // Configuration
    let mut args = std::env::args().skip(1);
    let page_path = args
        .next()
        .ok_or("usage: page-chat <page.html> [page-url]")?;
    let page_url = args
        .next()
        .unwrap_or_else(|| format!("file://{page_path}"));
    let clipboard_path = std::env::var("PAGE_CHAT_CLIPBOARD")
        .unwrap_or_else(|_| "page-chat-clipboard.html".to_string());

    let config = WidgetConfig::from_env();
    tracing::info!(api_base = %config.api_base, page = %page_path, "Starting page chat");

    let markup = tokio::fs::read_to_string(&page_path).await?;
    let widget = HttpChatWidget::connect(
        &config,
        TerminalView::new(),
        HtmlPage::new(markup, page_url),
        FileClipboard::new(clipboard_path),
    )?;

    widget.open();
    widget.greet();

    // The session is created eagerly, alongside reading the first input
    let prewarm = async {
        if let Err(e) = widget.prewarm_session().await {
            tracing::warn!(error = %e.message, "Session prewarm failed");
        }
    };

    let input_loop = async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line == "/quit" {
                break;
            } else if line == "/explain" {
                widget.explain_selection().await;
            } else if let Some(selected) = line.strip_prefix("/select") {
                widget.on_selection_changed(selected);
                continue;
            } else {
                widget.send(line).await;
            }
            TerminalView::write("\n");
        }
    };

    tokio::join!(prewarm, input_loop);
    widget.close();

    Ok(())
}
