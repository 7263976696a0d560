//! HTTP implementation of the chat API

use super::{ByteStream, ChatApi, ChatStreamRequest, CreateSessionRequest, SessionCreated};
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

/// Chat API over HTTP
pub struct HttpChatApi {
    client: Client,
    sessions_url: String,
    chat_stream_url: String,
}

impl HttpChatApi {
    /// # Errors
    ///
    /// Returns a config error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &WidgetConfig) -> Result<Self, WidgetError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| WidgetError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            sessions_url: config.endpoint("sessions"),
            chat_stream_url: config.endpoint("chat/stream"),
        })
    }

    fn describe_send_error(e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("Request timeout: {e}")
        } else if e.is_connect() {
            format!("Connection failed: {e}")
        } else {
            format!("Request failed: {e}")
        }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<SessionCreated, WidgetError> {
        let response = self
            .client
            .post(&self.sessions_url)
            .json(request)
            .send()
            .await
            .map_err(|e| WidgetError::session_unavailable(Self::describe_send_error(&e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            WidgetError::session_unavailable(format!("Failed to read response: {e}"))
        })?;

        // Status is not checked on its own: any body without a session id is a failure
        serde_json::from_str(&body).map_err(|e| {
            WidgetError::session_unavailable(format!(
                "Unexpected session response (HTTP {status}): {e} - body: {body}"
            ))
        })
    }

    async fn chat_stream(&self, request: &ChatStreamRequest) -> Result<ByteStream, WidgetError> {
        let response = self
            .client
            .post(&self.chat_stream_url)
            .json(request)
            .send()
            .await
            .map_err(|e| WidgetError::request_failed(Self::describe_send_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WidgetError::request_failed(format!("HTTP {status}: {body}")));
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| {
                chunk.map(|bytes| bytes.to_vec()).map_err(|e| {
                    WidgetError::request_failed(format!("Failed to read stream: {e}"))
                })
            })
            .boxed())
    }
}
