//! # Trace Events
//!
//! Defines all events that flow through the event log and the shared bus.
//! Every completed state-changing operation appends one or more of these,
//! tagged with the batch and the acting account.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, BatchId, BatchStatus, Capability};

/// All events that can be appended to the event log and published to the
/// bus.
///
/// Events are emitted only after an operation has fully committed; a failed
/// operation emits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    // =========================================================================
    // SUBSYSTEM 1: ROLE REGISTRY
    // =========================================================================
    /// A capability was granted to an account.
    CapabilityGranted {
        /// The capability granted.
        capability: Capability,
        /// The receiving account.
        account: AccountId,
        /// The admin who granted it.
        admin: AccountId,
    },

    /// A capability was revoked from an account.
    CapabilityRevoked {
        /// The capability revoked.
        capability: Capability,
        /// The account it was removed from.
        account: AccountId,
        /// The admin who revoked it.
        admin: AccountId,
    },

    // =========================================================================
    // SUBSYSTEM 2: CUSTODY LEDGER
    // =========================================================================
    /// Custody of a batch moved between accounts.
    ///
    /// Creation is reported with `from` set to the zero identity.
    CustodyTransferred {
        /// The batch that moved.
        id: BatchId,
        /// Previous custodian (zero on creation).
        from: AccountId,
        /// New custodian.
        to: AccountId,
    },

    /// A single-batch transfer approval was set.
    ApprovalSet {
        /// The batch the approval covers.
        id: BatchId,
        /// The current owner.
        owner: AccountId,
        /// The approved spender.
        spender: AccountId,
    },

    /// A blanket operator approval was enabled or disabled.
    OperatorApprovalSet {
        /// The granting owner.
        owner: AccountId,
        /// The operator account.
        operator: AccountId,
        /// Whether the approval is now active.
        approved: bool,
    },

    /// A consumed batch reached the archive vault.
    BatchArchived {
        /// The archived batch.
        id: BatchId,
        /// The archive vault identity.
        vault: AccountId,
    },

    // =========================================================================
    // SUBSYSTEM 3: BATCH LIFECYCLE
    // =========================================================================
    /// A new batch entered the chain.
    BatchCreated {
        /// The assigned batch id.
        id: BatchId,
        /// The producer who created it.
        creator: AccountId,
    },

    /// An inspector attested a batch.
    BatchInspected {
        /// The inspected batch.
        id: BatchId,
        /// The attesting inspector.
        inspector: AccountId,
    },

    /// A batch's content reference was replaced.
    ContentRefUpdated {
        /// The batch updated.
        id: BatchId,
        /// The inspector who updated it.
        updater: AccountId,
    },

    /// A batch's lifecycle status changed.
    StatusUpdated {
        /// The batch whose status changed.
        id: BatchId,
        /// Status before the transition.
        old_status: BatchStatus,
        /// Status after the transition.
        new_status: BatchStatus,
    },

    /// An admin recalled a batch.
    BatchRecalled {
        /// The recalled batch.
        id: BatchId,
        /// The admin who ordered the recall.
        admin: AccountId,
        /// The stated reason.
        reason: Vec<u8>,
    },
}

impl TraceEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CapabilityGranted { .. } | Self::CapabilityRevoked { .. } => {
                EventTopic::AccessControl
            }
            Self::CustodyTransferred { .. }
            | Self::ApprovalSet { .. }
            | Self::OperatorApprovalSet { .. }
            | Self::BatchArchived { .. } => EventTopic::Custody,
            Self::BatchCreated { .. }
            | Self::BatchInspected { .. }
            | Self::ContentRefUpdated { .. }
            | Self::StatusUpdated { .. }
            | Self::BatchRecalled { .. } => EventTopic::Lifecycle,
        }
    }

    /// Get the originating subsystem number.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self.topic() {
            EventTopic::AccessControl => 1,
            EventTopic::Custody => 2,
            EventTopic::Lifecycle => 3,
            EventTopic::All => 0,
        }
    }

    /// The batch this event concerns, if any.
    #[must_use]
    pub fn batch_id(&self) -> Option<BatchId> {
        match self {
            Self::CustodyTransferred { id, .. }
            | Self::ApprovalSet { id, .. }
            | Self::BatchArchived { id, .. }
            | Self::BatchCreated { id, .. }
            | Self::BatchInspected { id, .. }
            | Self::ContentRefUpdated { id, .. }
            | Self::StatusUpdated { id, .. }
            | Self::BatchRecalled { id, .. } => Some(*id),
            Self::CapabilityGranted { .. }
            | Self::CapabilityRevoked { .. }
            | Self::OperatorApprovalSet { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Role registry events (subsystem 1).
    AccessControl,
    /// Custody ledger events (subsystem 2).
    Custody,
    /// Batch lifecycle events (subsystem 3).
    Lifecycle,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source subsystems to include. Empty means all sources.
    pub source_subsystems: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_subsystems: Vec::new(),
        }
    }

    /// Create a filter for events from specific subsystems.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_subsystems: subsystems,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &TraceEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());

        topic_match && source_match
    }
}
