//! Widget error types

use thiserror::Error;

/// Shown for any session or request failure; raw detail never reaches the transcript.
pub const GENERIC_FAILURE_MESSAGE: &str = "抱歉,出现了错误,请稍后重试。";

/// Shown when the host environment refuses the clipboard write.
pub const CLIPBOARD_DENIED_MESSAGE: &str =
    "❌ 复制失败，请确保浏览器支持剪贴板 API，或者检查权限设置。";

/// Widget error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct WidgetError {
    pub kind: ErrorKind,
    pub message: String,
}

impl WidgetError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn session_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionUnavailable, message)
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestFailed, message)
    }

    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedRecord, message)
    }

    pub fn clipboard_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClipboardDenied, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Text rendered into the transcript for this error
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

/// Error classification for propagation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Session creation failed or never completed - aborts the send
    SessionUnavailable,
    /// Non-2xx status or transport failure on the chat call - aborts the send
    RequestFailed,
    /// A stream line failed to parse - swallowed by the consumer
    MalformedRecord,
    /// Clipboard write rejected - surfaces a remediation hint
    ClipboardDenied,
    /// Invalid widget configuration
    Config,
}

impl ErrorKind {
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::ClipboardDenied => CLIPBOARD_DENIED_MESSAGE,
            Self::SessionUnavailable
            | Self::RequestFailed
            | Self::MalformedRecord
            | Self::Config => GENERIC_FAILURE_MESSAGE,
        }
    }
}
