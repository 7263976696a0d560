//! Rendering surface driven by the widget
//!
//! Implementations own all presentation (window chrome, bubbles, hint placement).
//! The widget only tells them what happened.

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Handle to a message whose text is still being streamed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub usize);

pub trait ChatView: Send + Sync {
    /// Append a complete message to the transcript
    fn render_message(&self, role: Role, text: &str);

    /// Append an empty assistant message to be filled by [`ChatView::update_message`]
    fn begin_assistant_message(&self) -> MessageId;

    /// Replace the whole text of a streaming message
    fn update_message(&self, id: MessageId, text: &str);

    fn show_thinking(&self);

    /// Must be safe to call when no indicator is shown
    fn hide_thinking(&self);

    fn set_send_enabled(&self, enabled: bool);

    fn set_input(&self, text: &str);

    fn clear_input(&self) {
        self.set_input("");
    }

    /// Show or hide the chat window; opening also focuses the input
    fn set_window_open(&self, open: bool);

    fn show_selection_hint(&self) {}

    fn hide_selection_hint(&self) {}
}
