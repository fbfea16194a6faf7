//! Rolling feedback log for the on-screen coaching messages
//!
//! Keeps only the most recent entries, oldest first.

use std::collections::VecDeque;

use serde::Serialize;

/// Number of feedback lines shown at once
pub const FEEDBACK_CAPACITY: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// One coaching message
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    pub message: String,
    pub severity: Severity,
}

impl FeedbackEntry {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Bounded log that evicts the oldest entry when full
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeedbackLog {
    entries: VecDeque<FeedbackEntry>,
    #[serde(skip)]
    capacity: usize,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::with_capacity(FEEDBACK_CAPACITY)
    }

    /// Capacity 0 is bumped to 1 so the latest message is always shown
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append an entry, evicting from the front past capacity
    pub fn push(&mut self, entry: FeedbackEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &FeedbackEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&FeedbackEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FeedbackLog {
    fn default() -> Self {
        Self::new()
    }
}
