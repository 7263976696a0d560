//! Remote conversational API
//!
//! Provides the interface to the session and streaming chat endpoints.

mod http;
mod types;

pub use http::HttpChatApi;
pub use types::*;

use crate::error::WidgetError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

/// Response body of the streaming chat endpoint, one read per item
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, WidgetError>>;

/// Interface to the conversational backend
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /sessions`
    async fn create_session(&self, request: &CreateSessionRequest)
        -> Result<SessionCreated, WidgetError>;

    /// `POST /chat/stream`, returning the NDJSON body once the status is OK
    async fn chat_stream(&self, request: &ChatStreamRequest) -> Result<ByteStream, WidgetError>;
}

#[async_trait]
impl<T: ChatApi + ?Sized> ChatApi for Arc<T> {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<SessionCreated, WidgetError> {
        (**self).create_session(request).await
    }

    async fn chat_stream(&self, request: &ChatStreamRequest) -> Result<ByteStream, WidgetError> {
        (**self).chat_stream(request).await
    }
}

/// Logging wrapper for chat APIs
pub struct LoggingChatApi<A> {
    inner: A,
}

impl<A: ChatApi> LoggingChatApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: ChatApi> ChatApi for LoggingChatApi<A> {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<SessionCreated, WidgetError> {
        let start = std::time::Instant::now();
        let result = self.inner.create_session(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(created) => {
                tracing::info!(
                    session_id = %created.session_id,
                    duration_ms = %duration.as_millis(),
                    "Session created"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    "Session creation failed"
                );
            }
        }

        result
    }

    async fn chat_stream(&self, request: &ChatStreamRequest) -> Result<ByteStream, WidgetError> {
        let start = std::time::Instant::now();
        let result = self.inner.chat_stream(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    session_id = %request.session_id,
                    message_chars = request.message.chars().count(),
                    duration_ms = %duration.as_millis(),
                    "Chat stream opened"
                );
            }
            Err(e) => {
                tracing::error!(
                    session_id = %request.session_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    "Chat request failed"
                );
            }
        }

        result
    }
}
