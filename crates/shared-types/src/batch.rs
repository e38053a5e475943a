//! # Batch Entities
//!
//! The tracked unit of goods and its lifecycle status.

use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// BATCH ID
// =============================================================================

/// Unique identifier for a batch. Assigned sequentially starting at 1,
/// never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BatchId(pub u64);

impl BatchId {
    /// Creates a batch id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BatchId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// =============================================================================
// BATCH STATUS
// =============================================================================

/// Lifecycle status of a batch.
///
/// Status only moves forward along
/// `Harvested → Inspecting → InTransit → Delivered → Retailed → Consumed`,
/// or sideways once into `Recalled` from any non-consumed, non-recalled
/// state. The discriminants are the wire codes reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BatchStatus {
    /// Freshly created by a producer; not yet transferable.
    Harvested = 1,
    /// Attested by an inspector; awaiting pickup by a carrier.
    Inspecting = 2,
    /// In a carrier's custody.
    InTransit = 3,
    /// In a retailer's custody; not yet on shelves.
    Delivered = 4,
    /// On shelves.
    Retailed = 5,
    /// Sold through; only archival custody remains.
    Consumed = 6,
    /// Pulled from circulation by an admin; only quarantine custody remains.
    Recalled = 7,
}

impl BatchStatus {
    /// The numeric code exposed to observers.
    #[must_use]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// The status reached by one retail advancement, if any.
    ///
    /// Only `Delivered` and `Retailed` have a retail successor.
    #[must_use]
    pub fn retail_successor(&self) -> Option<Self> {
        match self {
            Self::Delivered => Some(Self::Retailed),
            Self::Retailed => Some(Self::Consumed),
            _ => None,
        }
    }

    /// True if an admin recall is still possible from this status.
    #[must_use]
    pub fn is_recallable(&self) -> bool {
        !matches!(self, Self::Consumed | Self::Recalled)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Harvested => "HARVESTED",
            Self::Inspecting => "INSPECTING",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Retailed => "RETAILED",
            Self::Consumed => "CONSUMED",
            Self::Recalled => "RECALLED",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// BATCH RECORD
// =============================================================================

/// The lifecycle record kept per batch.
///
/// Custody (the current owner) is tracked by the custody ledger, not here;
/// this record carries the fields only the lifecycle cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// The batch identifier.
    pub id: BatchId,
    /// Current lifecycle status.
    pub status: BatchStatus,
    /// Content reference (e.g. a metadata URI). Never empty.
    pub content_ref: String,
    /// Whether the batch has ever been recalled. Monotonic.
    pub recalled: bool,
    /// Reason supplied with the recall, if any.
    pub recall_reason: Option<Vec<u8>>,
}

impl Batch {
    /// A new batch record at the start of the lifecycle.
    #[must_use]
    pub fn new(id: BatchId, content_ref: String) -> Self {
        Self {
            id,
            status: BatchStatus::Harvested,
            content_ref,
            recalled: false,
            recall_reason: None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
