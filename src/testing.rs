//! Mock implementations for testing
//!
//! These mocks let the widget run end to end without a network, clipboard or page.

use crate::api::{ByteStream, ChatApi, ChatStreamRequest, CreateSessionRequest, SessionCreated};
use crate::clipboard::Clipboard;
use crate::error::WidgetError;
use crate::page::HostPage;
use crate::view::{ChatView, MessageId, Role};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

type Chunks = Vec<Result<Vec<u8>, WidgetError>>;

// ============================================================================
// Mock Chat API
// ============================================================================

/// Chat API returning queued outcomes and recording every request
#[allow(dead_code)]
pub struct MockChatApi {
    sessions: Mutex<VecDeque<Result<String, WidgetError>>>,
    chats: Mutex<VecDeque<Result<Chunks, WidgetError>>>,
    session_requests: Mutex<Vec<CreateSessionRequest>>,
    chat_requests: Mutex<Vec<ChatStreamRequest>>,
    session_delay: Option<Duration>,
    hold_chat: bool,
    /// Notified when a session creation starts
    pub session_started: Notify,
    /// Notified when a chat request is issued
    pub chat_started: Notify,
    /// Lets a held chat request return
    pub chat_release: Notify,
}

#[allow(dead_code)]
impl MockChatApi {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(VecDeque::new()),
            chats: Mutex::new(VecDeque::new()),
            session_requests: Mutex::new(Vec::new()),
            chat_requests: Mutex::new(Vec::new()),
            session_delay: None,
            hold_chat: false,
            session_started: Notify::new(),
            chat_started: Notify::new(),
            chat_release: Notify::new(),
        }
    }

    /// Keep each chat request in flight until `chat_release` is notified
    pub fn with_chat_hold(mut self) -> Self {
        self.hold_chat = true;
        self
    }

    /// Hold each session creation in flight for `delay`
    pub fn with_session_delay(mut self, delay: Duration) -> Self {
        self.session_delay = Some(delay);
        self
    }

    pub fn queue_session(&self, outcome: Result<&str, WidgetError>) {
        self.sessions
            .lock()
            .unwrap()
            .push_back(outcome.map(str::to_string));
    }

    /// Queue a successful chat response whose body arrives in these reads
    pub fn queue_chat_chunks(&self, chunks: &[&str]) {
        self.queue_chat_stream(chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect());
    }

    pub fn queue_chat_stream(&self, chunks: Chunks) {
        self.chats.lock().unwrap().push_back(Ok(chunks));
    }

    /// Queue a chat request that fails before any body is read
    pub fn queue_chat_error(&self, error: WidgetError) {
        self.chats.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_session_requests(&self) -> Vec<CreateSessionRequest> {
        self.session_requests.lock().unwrap().clone()
    }

    pub fn session_request_count(&self) -> usize {
        self.session_requests.lock().unwrap().len()
    }

    pub fn recorded_chat_requests(&self) -> Vec<ChatStreamRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub fn chat_request_count(&self) -> usize {
        self.chat_requests.lock().unwrap().len()
    }
}

impl Default for MockChatApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<SessionCreated, WidgetError> {
        self.session_requests.lock().unwrap().push(request.clone());
        self.session_started.notify_one();
        if let Some(delay) = self.session_delay {
            tokio::time::sleep(delay).await;
        }
        let outcome = self
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WidgetError::session_unavailable("No mock session queued")));
        outcome.map(|session_id| SessionCreated { session_id })
    }

    async fn chat_stream(&self, request: &ChatStreamRequest) -> Result<ByteStream, WidgetError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.chat_started.notify_one();
        if self.hold_chat {
            self.chat_release.notified().await;
        }
        let chunks = self
            .chats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WidgetError::request_failed("No mock chat response queued")))?;
        Ok(futures::stream::iter(chunks).boxed())
    }
}

// ============================================================================
// Recording View
// ============================================================================

/// Everything the widget asked the view to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Message(Role, String),
    Placeholder(usize),
    Update(usize, String),
    Thinking(bool),
    SendEnabled(bool),
    Input(String),
    WindowOpen(bool),
    SelectionHint(bool),
}

#[derive(Default)]
struct ViewState {
    events: Vec<ViewEvent>,
    messages: Vec<(Role, String)>,
    updates: Vec<String>,
    thinking: bool,
    send_enabled: bool,
}

/// View that records calls and keeps a replace-semantics transcript
pub struct RecordingView {
    state: Mutex<ViewState>,
}

#[allow(dead_code)]
impl RecordingView {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewState {
                send_enabled: true,
                ..Default::default()
            }),
        }
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Messages as currently displayed
    pub fn transcript(&self) -> Vec<(Role, String)> {
        self.state.lock().unwrap().messages.clone()
    }

    /// Every streamed update, in arrival order
    pub fn updates(&self) -> Vec<String> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn is_thinking(&self) -> bool {
        self.state.lock().unwrap().thinking
    }

    pub fn send_enabled(&self) -> bool {
        self.state.lock().unwrap().send_enabled
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for RecordingView {
    fn render_message(&self, role: Role, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.events.push(ViewEvent::Message(role, text.to_string()));
        state.messages.push((role, text.to_string()));
    }

    fn begin_assistant_message(&self) -> MessageId {
        let mut state = self.state.lock().unwrap();
        let id = state.messages.len();
        state.messages.push((Role::Assistant, String::new()));
        state.events.push(ViewEvent::Placeholder(id));
        MessageId(id)
    }

    fn update_message(&self, id: MessageId, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.events.push(ViewEvent::Update(id.0, text.to_string()));
        state.updates.push(text.to_string());
        if let Some(message) = state.messages.get_mut(id.0) {
            message.1 = text.to_string();
        }
    }

    fn show_thinking(&self) {
        let mut state = self.state.lock().unwrap();
        state.thinking = true;
        state.events.push(ViewEvent::Thinking(true));
    }

    fn hide_thinking(&self) {
        let mut state = self.state.lock().unwrap();
        state.thinking = false;
        state.events.push(ViewEvent::Thinking(false));
    }

    fn set_send_enabled(&self, enabled: bool) {
        let mut state = self.state.lock().unwrap();
        state.send_enabled = enabled;
        state.events.push(ViewEvent::SendEnabled(enabled));
    }

    fn set_input(&self, text: &str) {
        self.state
            .lock()
            .unwrap()
            .events
            .push(ViewEvent::Input(text.to_string()));
    }

    fn set_window_open(&self, open: bool) {
        self.state.lock().unwrap().events.push(ViewEvent::WindowOpen(open));
    }

    fn show_selection_hint(&self) {
        self.state.lock().unwrap().events.push(ViewEvent::SelectionHint(true));
    }

    fn hide_selection_hint(&self) {
        self.state.lock().unwrap().events.push(ViewEvent::SelectionHint(false));
    }
}

// ============================================================================
// Static Page / Clipboard
// ============================================================================

/// Host page with fixed title, URL, text and markup
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    title: String,
    url: String,
    text: String,
    html: String,
}

#[allow(dead_code)]
impl StaticPage {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }
}

impl HostPage for StaticPage {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn outer_html(&self) -> String {
        self.html.clone()
    }
}

/// Clipboard that always refuses the write
pub struct DenyingClipboard;

#[async_trait]
impl Clipboard for DenyingClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), WidgetError> {
        Err(WidgetError::clipboard_denied("Clipboard write not permitted"))
    }
}
