//! History — the stack of executed reversible commands pending undo.

use switchboard_domain::command::Command;
use switchboard_domain::device::Transition;
use switchboard_domain::time::{Timestamp, now};

/// One pressed command, as it was executed.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Name the command was pressed under.
    pub name: String,
    pub command: Command,
    /// What the forward action did to the device.
    pub transition: Transition,
    pub executed_at: Timestamp,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, command: Command, transition: Transition) -> Self {
        Self {
            name: name.into(),
            command,
            transition,
            executed_at: now(),
        }
    }
}

/// LIFO record of executed commands, oldest first.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove the most recently executed entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in execution order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
