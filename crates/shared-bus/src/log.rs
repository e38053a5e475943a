//! # Event Log
//!
//! The append-only, ordered sink the transition guard writes within each
//! atomic operation. Observers read the log directly or have its entries
//! relayed onto the broadcast bus.

use crate::events::TraceEvent;

/// An ordered, append-only record of completed transitions.
///
/// Entries are never removed or reordered; the index of an entry is its
/// global sequence number. Appends happen only after an operation has
/// fully validated, so the log never contains effects of a failed call.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<TraceEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Returns its sequence number.
    pub fn append(&mut self, event: TraceEvent) -> u64 {
        self.entries.push(event);
        (self.entries.len() - 1) as u64
    }

    /// All entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[TraceEvent] {
        &self.entries
    }

    /// Entries appended at or after the given sequence number.
    #[must_use]
    pub fn since(&self, seq: u64) -> &[TraceEvent] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&TraceEvent> {
        self.entries.last()
    }

    /// Number of entries appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
