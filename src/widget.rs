//! Send orchestration
//!
//! One `ChatWidget` is one embedded widget: it owns the session, the selection
//! slot, the open/closed flag and the send gate. Sends are gated, not queued:
//! a send attempted while another is outstanding is dropped.

use crate::api::{ChatApi, ChatStreamRequest, CreateSessionRequest, HttpChatApi, LoggingChatApi};
use crate::clipboard::Clipboard;
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::intent::{classify, Intent};
use crate::page::HostPage;
use crate::prompt::{self, Outgoing, EXPLAIN_PRESET};
use crate::selection::{SelectionChange, SelectionState};
use crate::session::{SessionManager, SessionState};
use crate::stream::{self, StreamSummary};
use crate::view::{ChatView, Role};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const GREETING: &str = "你好!我是AI助手,有什么可以帮助你的吗?😊

💡 我可以帮你：
• 📄 总结网页 - \"总结这个页面\"
• 🔍 搜索内容 - \"找XXX信息\"
• 📝 解释文本 - 选中文字后点击气泡
• 📋 复制HTML - \"复制网页HTML\"";

/// Result of one send attempt
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// Empty after trimming; nothing happened
    Rejected,
    /// Another send was in flight; dropped, not queued
    Dropped,
    /// Page markup copied locally
    Copied { chars: usize },
    /// Reply streamed to completion
    Completed(StreamSummary),
    /// Aborted; a failure message was rendered
    Failed(WidgetError),
}

/// Widget backed by the HTTP API with call logging
pub type HttpChatWidget<V, P, C> = ChatWidget<LoggingChatApi<HttpChatApi>, V, P, C>;

pub struct ChatWidget<A, V, P, C>
where
    A: ChatApi,
    V: ChatView,
    P: HostPage,
    C: Clipboard,
{
    api: Arc<A>,
    sessions: SessionManager<A>,
    view: V,
    page: P,
    clipboard: C,
    selection: Mutex<SelectionState>,
    sending: AtomicBool,
    open: AtomicBool,
}

impl<V, P, C> HttpChatWidget<V, P, C>
where
    V: ChatView,
    P: HostPage,
    C: Clipboard,
{
    /// # Errors
    ///
    /// Returns a config error if the configuration is invalid.
    pub fn connect(config: &WidgetConfig, view: V, page: P, clipboard: C) -> Result<Self, WidgetError> {
        let api = LoggingChatApi::new(HttpChatApi::new(config)?);
        Ok(Self::new(config, api, view, page, clipboard))
    }
}

impl<A, V, P, C> ChatWidget<A, V, P, C>
where
    A: ChatApi,
    V: ChatView,
    P: HostPage,
    C: Clipboard,
{
    pub fn new(config: &WidgetConfig, api: A, view: V, page: P, clipboard: C) -> Self {
        let api = Arc::new(api);
        let sessions = SessionManager::new(
            api.clone(),
            CreateSessionRequest::new(&config.session_title, &config.session_mode),
        );
        Self {
            api,
            sessions,
            view,
            page,
            clipboard,
            selection: Mutex::new(SelectionState::new()),
            sending: AtomicBool::new(false),
            open: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn session_state(&self) -> SessionState {
        self.sessions.state()
    }

    /// Render the welcome message
    pub fn greet(&self) {
        self.view.render_message(Role::Assistant, GREETING);
    }

    /// Start session creation ahead of the first send
    ///
    /// # Errors
    ///
    /// Returns `SessionUnavailable` if creation failed; later sends fail the same way.
    pub async fn prewarm_session(&self) -> Result<String, WidgetError> {
        self.sessions.ensure_session().await
    }

    // ------------------------------------------------------------------------
    // Window
    // ------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
        self.view.set_window_open(true);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        self.view.set_window_open(false);
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    fn selection(&self) -> MutexGuard<'_, SelectionState> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection().text().map(str::to_string)
    }

    /// Feed a selection event from the host page
    pub fn on_selection_changed(&self, raw: &str) -> SelectionChange {
        let change = self.selection().capture(raw);
        match change {
            SelectionChange::Captured => {
                tracing::debug!(chars = raw.trim().chars().count(), "Selection captured");
                self.view.show_selection_hint();
            }
            SelectionChange::Cleared => self.view.hide_selection_hint(),
            SelectionChange::Ignored => {}
        }
        change
    }

    /// Selection hint shortcut: open the window and ask to explain the selection
    pub async fn explain_selection(&self) -> SendOutcome {
        if !self.selection().is_held() {
            return SendOutcome::Rejected;
        }
        self.view.hide_selection_hint();
        if !self.is_open() {
            self.open();
        }
        self.view.set_input(EXPLAIN_PRESET);
        self.send(EXPLAIN_PRESET).await
    }

    // ------------------------------------------------------------------------
    // Send
    // ------------------------------------------------------------------------

    /// Send one user message
    ///
    /// Failures are rendered into the transcript and reported in the outcome.
    pub async fn send(&self, input: &str) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Rejected;
        }

        let Some(_gate) = SendGate::acquire(&self.sending, &self.view) else {
            tracing::debug!("Send dropped, another send is in flight");
            return SendOutcome::Dropped;
        };

        match self.run_send(message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(kind = ?e.kind, error = %e.message, "Send failed");
                self.view.hide_thinking();
                self.view.render_message(Role::Assistant, e.user_message());
                SendOutcome::Failed(e)
            }
        }
    }

    async fn run_send(&self, message: &str) -> Result<SendOutcome, WidgetError> {
        let session_id = self.sessions.ensure_session().await?;

        self.view.render_message(Role::User, message);
        self.view.clear_input();

        let (intent, outgoing) = {
            let mut selection = self.selection();
            let intent = classify(message, selection.is_held());
            (intent, prompt::build(intent, message, &mut selection, &self.page))
        };

        let payload = match outgoing {
            Outgoing::CopyHtml => return Ok(self.copy_page_html().await),
            Outgoing::Remote(payload) => payload,
        };
        if intent == Intent::ExplainSelection {
            self.view.hide_selection_hint();
        }

        self.view.show_thinking();
        tracing::info!(%intent, payload_chars = payload.chars().count(), "Sending message");

        let body = self
            .api
            .chat_stream(&ChatStreamRequest::new(session_id, payload))
            .await?;
        self.view.hide_thinking();

        let placeholder = self.view.begin_assistant_message();
        let summary = stream::consume(body, |text| self.view.update_message(placeholder, text)).await?;

        tracing::info!(
            records = summary.records,
            content_updates = summary.content_updates,
            malformed = summary.malformed,
            "Reply stream finished"
        );
        Ok(SendOutcome::Completed(summary))
    }

    async fn copy_page_html(&self) -> SendOutcome {
        let html = self.page.outer_html();
        match self.clipboard.write_text(&html).await {
            Ok(()) => {
                let chars = html.chars().count();
                tracing::info!(chars, "Page HTML copied");
                self.view.render_message(
                    Role::Assistant,
                    &prompt::copy_html_confirmation(chars, &self.page.title(), &self.page.url()),
                );
                SendOutcome::Copied { chars }
            }
            Err(e) => {
                tracing::warn!(error = %e.message, "Clipboard write failed");
                self.view.render_message(Role::Assistant, e.user_message());
                SendOutcome::Failed(e)
            }
        }
    }
}

/// Disables sending while held; re-enables on every exit path
struct SendGate<'a, V: ChatView> {
    flag: &'a AtomicBool,
    view: &'a V,
}

impl<'a, V: ChatView> SendGate<'a, V> {
    fn acquire(flag: &'a AtomicBool, view: &'a V) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        view.set_send_enabled(false);
        Some(Self { flag, view })
    }
}

impl<V: ChatView> Drop for SendGate<'_, V> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        self.view.set_send_enabled(true);
    }
}
