//! Lazily created conversation session
//!
//! State machine: `Absent -> Pending -> {Present, Failed}`. Creation is attempted
//! exactly once per manager. Callers arriving while it is pending await the same
//! attempt, and a failed attempt is final: later calls fail immediately.

use crate::api::{ChatApi, CreateSessionRequest};
use crate::error::WidgetError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Observable session lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Pending,
    Present(String),
    Failed,
}

/// Owns the widget's single session id
pub struct SessionManager<A: ChatApi> {
    api: Arc<A>,
    request: CreateSessionRequest,
    started: AtomicBool,
    outcome: OnceCell<Result<String, WidgetError>>,
}

impl<A: ChatApi> SessionManager<A> {
    pub fn new(api: Arc<A>, request: CreateSessionRequest) -> Self {
        Self {
            api,
            request,
            started: AtomicBool::new(false),
            outcome: OnceCell::new(),
        }
    }

    /// Return the session id, creating the session on first use
    ///
    /// # Errors
    ///
    /// Returns `SessionUnavailable` if the single creation attempt failed.
    pub async fn ensure_session(&self) -> Result<String, WidgetError> {
        let outcome = self
            .outcome
            .get_or_init(|| async {
                self.started.store(true, Ordering::SeqCst);
                self.create().await
            })
            .await;

        match outcome {
            Ok(id) => Ok(id.clone()),
            Err(e) => {
                tracing::debug!(error = %e.message, "Session unavailable, not retrying");
                Err(e.clone())
            }
        }
    }

    async fn create(&self) -> Result<String, WidgetError> {
        tracing::debug!(title = %self.request.title, mode = %self.request.mode, "Creating session");
        match self.api.create_session(&self.request).await {
            Ok(created) if !created.session_id.trim().is_empty() => Ok(created.session_id),
            Ok(_) => Err(WidgetError::session_unavailable(
                "Session response carried an empty session id",
            )),
            Err(e) => Err(WidgetError::session_unavailable(e.message)),
        }
    }

    pub fn state(&self) -> SessionState {
        match self.outcome.get() {
            Some(Ok(id)) => SessionState::Present(id.clone()),
            Some(Err(_)) => SessionState::Failed,
            None if self.started.load(Ordering::SeqCst) => SessionState::Pending,
            None => SessionState::Absent,
        }
    }

    /// The session id, if creation already succeeded
    pub fn session_id(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(Ok(id)) => Some(id.as_str()),
            _ => None,
        }
    }
}
