//! NDJSON response consumer
//!
//! The chat endpoint streams one JSON object per line. Every `content` record
//! carries the full text generated so far, so callers must replace what they
//! rendered, never append to it.

use crate::error::WidgetError;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::Value;

/// One decoded line of the response body
///
/// Only `type` has to decode; the payload fields are kept as raw JSON so an
/// unexpected sibling value never costs a renderable record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "type")]
    pub kind: String,
    /// Full accumulated text for `content` records
    #[serde(default)]
    pub content: Option<Value>,
    /// Error detail for `error` records
    #[serde(default)]
    pub message: Option<Value>,
}

impl StreamRecord {
    /// Renderable text, present only on `content` records with a string body
    pub fn content_text(&self) -> Option<&str> {
        if self.kind == "content" {
            self.content.as_ref().and_then(Value::as_str)
        } else {
            None
        }
    }

    /// Error detail as text, whatever JSON type the server sent
    pub fn error_detail(&self) -> String {
        match &self.message {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// Splits a byte stream into NDJSON records across arbitrary read boundaries
///
/// Bytes are buffered undecoded, so a multi-byte character split between two
/// reads is reassembled before UTF-8 decoding.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one read; returns every complete line decoded from it
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<StreamRecord, WidgetError>> {
        self.buffer.extend_from_slice(chunk);

        let Some(last_newline) = self.buffer.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };
        let remainder = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, remainder);

        complete
            .split(|&b| b == b'\n')
            .filter_map(decode_line)
            .collect()
    }

    /// Decode whatever is left once the stream is exhausted
    pub fn finish(self) -> Option<Result<StreamRecord, WidgetError>> {
        decode_line(&self.buffer)
    }

    /// Bytes held back waiting for a newline
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

fn decode_line(line: &[u8]) -> Option<Result<StreamRecord, WidgetError>> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(e) => {
            return Some(Err(WidgetError::malformed_record(format!(
                "Invalid UTF-8 in stream line: {e}"
            ))))
        }
    };
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).map_err(|e| {
        WidgetError::malformed_record(format!("Failed to parse stream line: {e} - line: {text}"))
    }))
}

/// Counters for one consumed response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub records: usize,
    pub content_updates: usize,
    pub malformed: usize,
    /// Text of the last content update, i.e. the final rendered reply
    pub final_text: Option<String>,
}

/// Drive a response body to exhaustion, calling `on_content` with the full
/// text of every `content` record.
///
/// Malformed lines are logged and skipped. A transport error ends consumption.
/// A final line left without a newline is still decoded once the body ends;
/// the deployed browser widget discards that segment instead.
///
/// # Errors
///
/// Returns the first error yielded by the byte stream itself.
pub async fn consume<S, F>(mut body: S, mut on_content: F) -> Result<StreamSummary, WidgetError>
where
    S: Stream<Item = Result<Vec<u8>, WidgetError>> + Unpin,
    F: FnMut(&str),
{
    let mut decoder = NdjsonDecoder::new();
    let mut summary = StreamSummary::default();

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for decoded in decoder.push(&chunk) {
            handle_record(decoded, &mut summary, &mut on_content);
        }
    }

    if decoder.buffered() > 0 {
        tracing::debug!(bytes = decoder.buffered(), "Stream ended without trailing newline");
    }
    if let Some(decoded) = decoder.finish() {
        handle_record(decoded, &mut summary, &mut on_content);
    }

    Ok(summary)
}

fn handle_record<F: FnMut(&str)>(
    decoded: Result<StreamRecord, WidgetError>,
    summary: &mut StreamSummary,
    on_content: &mut F,
) {
    let record = match decoded {
        Ok(record) => record,
        Err(e) => {
            summary.malformed += 1;
            tracing::warn!(error = %e.message, "Dropping malformed stream record");
            return;
        }
    };
    summary.records += 1;

    if let Some(text) = record.content_text() {
        summary.content_updates += 1;
        on_content(text);
        summary.final_text = Some(text.to_string());
        return;
    }

    match record.kind.as_str() {
        "error" => tracing::warn!(
            detail = %record.error_detail(),
            "Server reported a stream error"
        ),
        kind => tracing::debug!(kind, "Ignoring non-content stream record"),
    }
}
