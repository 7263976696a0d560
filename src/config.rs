//! Widget configuration
//!
//! Options are merged over defaults, so a host page only has to pass the
//! fields it wants to change (typically just `api_base`).

use crate::error::WidgetError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Corner of the viewport the button and window are anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "bottom-right" => Some(Self::BottomRight),
            "bottom-left" => Some(Self::BottomLeft),
            "top-right" => Some(Self::TopRight),
            "top-left" => Some(Self::TopLeft),
            _ => None,
        }
    }
}

/// Configuration for a chat widget instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Base URL of the conversational API (e.g., `http://localhost:8000/api`)
    pub api_base: String,
    pub position: Position,
    pub button_size: u32,
    pub button_color: String,
    pub max_width: u32,
    pub max_height: u32,
    pub z_index: u32,
    /// Title sent when the session is created
    pub session_title: String,
    /// Mode sent when the session is created
    pub session_mode: String,
    pub request_timeout_secs: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000/api".to_string(),
            position: Position::default(),
            button_size: 60,
            button_color: "#6366f1".to_string(),
            max_width: 400,
            max_height: 600,
            z_index: 9999,
            session_title: "嵌入式对话".to_string(),
            session_mode: "embedded".to_string(),
            request_timeout_secs: 300,
        }
    }
}

impl WidgetConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) JSON options object, merged over defaults
    ///
    /// # Errors
    ///
    /// Returns a config error if the JSON is malformed or the result fails validation.
    pub fn from_json(options: &str) -> Result<Self, WidgetError> {
        let config: Self = serde_json::from_str(options)
            .map_err(|e| WidgetError::config(format!("Invalid widget options: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_base) = std::env::var("PAGE_CHAT_API_BASE") {
            config.api_base = api_base;
        }
        if let Some(position) = std::env::var("PAGE_CHAT_POSITION")
            .ok()
            .and_then(|p| Position::parse(&p))
        {
            config.position = position;
        }
        if let Ok(title) = std::env::var("PAGE_CHAT_SESSION_TITLE") {
            config.session_title = title;
        }
        if let Some(secs) = std::env::var("PAGE_CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.request_timeout_secs = secs;
        }
        config
    }

    /// # Errors
    ///
    /// Returns a config error if `api_base` is empty or not an http(s) URL.
    pub fn validate(&self) -> Result<(), WidgetError> {
        let base = self.api_base.trim();
        if base.is_empty() {
            return Err(WidgetError::config("api_base is required"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(WidgetError::config(format!(
                "api_base must be an http(s) URL, got {base}"
            )));
        }
        Ok(())
    }

    /// Join an API path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
