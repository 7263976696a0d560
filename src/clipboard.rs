//! Clipboard access for the copy-HTML intent

use crate::error::WidgetError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

/// Write access to the host clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError>;
}

/// Clipboard kept in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard that writes copied text to a file
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError> {
        tokio::fs::write(&self.path, text).await.map_err(|e| {
            WidgetError::clipboard_denied(format!(
                "Failed to write {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.write_text("<html></html>").await.unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("<html></html>"));
    }

    #[tokio::test]
    async fn test_file_clipboard_writes() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = FileClipboard::new(dir.path().join("page.html"));
        clipboard.write_text("<p>hi</p>").await.unwrap();
        let written = std::fs::read_to_string(clipboard.path()).unwrap();
        assert_eq!(written, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_file_clipboard_failure_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = FileClipboard::new(dir.path().join("missing").join("page.html"));
        let err = clipboard.write_text("x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ClipboardDenied);
    }
}
