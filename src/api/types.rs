//! Wire types for the conversational API

use serde::{Deserialize, Serialize};

/// Body of `POST /sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub mode: String,
}

impl CreateSessionRequest {
    pub fn new(title: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mode: mode.into(),
        }
    }
}

/// Response of `POST /sessions`; extra fields (title, mode) are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

/// Body of `POST /chat/stream`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatStreamRequest {
    pub session_id: String,
    pub message: String,
    pub stream: bool,
}

impl ChatStreamRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            stream: true,
        }
    }
}
