//! Timestamped journal of effective state changes.
//!
//! Where [`History`](super::History) answers "where can the cursor go", the
//! journal answers "what actually happened": every change of the current
//! state is recorded with its cause and the time it occurred.

use super::config::{EventId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What caused a state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionCause {
    /// Direct jump via `change_state`
    Jump,
    /// Followed the transition registered for `event`
    Trigger { event: EventId },
    /// Moved back through history
    Undo,
    /// Moved forward through history
    Redo,
}

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use rewind::core::{TransitionCause, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle".to_string(),
///     to: "running".to_string(),
///     cause: TransitionCause::Trigger { event: "start".to_string() },
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// Why the change happened
    pub cause: TransitionCause,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
}

/// Number of records a journal keeps unless told otherwise.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1000;

fn default_capacity() -> usize {
    DEFAULT_JOURNAL_CAPACITY
}

/// Bounded, ordered log of transition records.
///
/// Once `capacity` records are held, recording a new one drops the oldest.
/// A capacity of zero disables the journal.
///
/// # Example
///
/// ```rust
/// use rewind::core::{TransitionCause, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let mut log = TransitionLog::new();
/// log.record(TransitionRecord {
///     from: "start".to_string(),
///     to: "middle".to_string(),
///     cause: TransitionCause::Jump,
///     timestamp: Utc::now(),
/// });
/// log.record(TransitionRecord {
///     from: "middle".to_string(),
///     to: "end".to_string(),
///     cause: TransitionCause::Jump,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.get_path(), ["start", "middle", "end"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: VecDeque<TransitionRecord>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl TransitionLog {
    /// Create a journal holding at most [`DEFAULT_JOURNAL_CAPACITY`] records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a journal holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the limit, dropping the oldest records if it shrank.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.trim();
    }

    /// Append a record, dropping the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        self.records.push_back(record);
        self.trim();
    }

    fn trim(&mut self) {
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> &VecDeque<TransitionRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first record followed by the `to`
    /// state of every record. Empty when nothing has been recorded.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time elapsed between the first and the last record.
    ///
    /// Returns `None` when the journal is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}
