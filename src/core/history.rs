//! Navigable history of visited states.
//!
//! The history is an append-only log of state ids plus a cursor marking the
//! entry that corresponds to the current state. Undo and redo move the
//! cursor; they never discard entries.

use super::config::StateId;
use serde::Serialize;

/// Append-only log of visited states with a navigation cursor.
///
/// The log is never empty and the cursor always points at an existing entry.
///
/// # Example
///
/// ```rust
/// use rewind::core::History;
///
/// let mut history = History::new("idle");
/// history.push("running");
/// history.move_cursor_to_end();
///
/// assert_eq!(history.current(), "running");
/// assert_eq!(history.previous(), Some("idle"));
/// assert!(history.can_undo());
/// assert!(!history.can_redo());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct History {
    entries: Vec<StateId>,
    cursor: usize,
}

impl History {
    /// Create a history holding only `seed`, with the cursor on it.
    pub fn new(seed: impl Into<StateId>) -> Self {
        Self {
            entries: vec![seed.into()],
            cursor: 0,
        }
    }

    /// Discard every entry and start over from `seed`.
    pub fn reseed(&mut self, seed: impl Into<StateId>) {
        self.entries.clear();
        self.entries.push(seed.into());
        self.cursor = 0;
    }

    /// Append an entry at the tail. The cursor is left where it is.
    pub fn push(&mut self, state: impl Into<StateId>) {
        self.entries.push(state.into());
    }

    /// Entry under the cursor.
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[StateId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the history always holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the newest entry.
    pub fn last_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Entry just before the cursor, if the cursor is not at the start.
    pub fn previous(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .map(|index| self.entries[index].as_str())
    }

    /// Entry just after the cursor, if the cursor is not at the end.
    pub fn next(&self) -> Option<&str> {
        self.entries.get(self.cursor + 1).map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.last_index()
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.last_index();
    }

    /// Move the cursor one entry back. Returns `false` at the start.
    pub fn step_back(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor one entry forward. Returns `false` at the end.
    pub fn step_forward(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }
}
