//! Page Chat - conversational core of an embeddable page chat widget
//!
//! Classifies each user message by keyword, rewrites it into a prompt enriched
//! with the host page's content, sends it over a lazily created session and
//! renders the streamed NDJSON reply incrementally.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod intent;
pub mod page;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod stream;
pub mod view;
pub mod widget;

#[cfg(test)]
mod testing;

pub use api::{ChatApi, HttpChatApi, LoggingChatApi};
pub use clipboard::{Clipboard, FileClipboard, MemoryClipboard};
pub use config::{Position, WidgetConfig};
pub use error::{ErrorKind, WidgetError};
pub use intent::{classify, Intent};
pub use page::{HostPage, HtmlPage, PageContext};
pub use session::{SessionManager, SessionState};
pub use view::{ChatView, MessageId, Role};
pub use widget::{ChatWidget, HttpChatWidget, SendOutcome};
