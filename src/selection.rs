//! Text selection slot
//!
//! Written by the host's selection events, read and cleared by the prompt builder.
//! Holds at most one value; the latest capture wins.

/// Selections of this many characters or more are ignored
pub const MAX_SELECTION_CHARS: usize = 500;

/// What a selection event did to the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// A new selection is held; the hint should be shown
    Captured,
    /// The selection went empty; the hint should be hidden
    Cleared,
    /// Too long to hold; the slot is left as it was
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    text: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a selection event with the raw selected text
    pub fn capture(&mut self, raw: &str) -> SelectionChange {
        let text = raw.trim();
        let chars = text.chars().count();
        if chars == 0 {
            self.text = None;
            SelectionChange::Cleared
        } else if chars < MAX_SELECTION_CHARS {
            self.text = Some(text.to_string());
            SelectionChange::Captured
        } else {
            SelectionChange::Ignored
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_held(&self) -> bool {
        self.text.is_some()
    }

    /// Remove and return the held selection
    pub fn take(&mut self) -> Option<String> {
        self.text.take()
    }
}
