//! # Batch Registry
//!
//! One lifecycle record per batch, keyed by sequentially assigned ids.
//! Records are never deleted; terminal batches stay queryable forever.

use crate::errors::BatchError;
use serde::{Deserialize, Serialize};
use shared_types::{Batch, BatchId, BatchStatus};
use std::collections::HashMap;

/// The per-batch record store and id allocator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRegistry {
    records: HashMap<BatchId, Batch>,
    /// Highest id assigned so far. Ids start at 1 and are never reused.
    high_water: u64,
}

impl BatchRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new batch record at the start of the lifecycle and return
    /// its assigned id.
    pub fn create(&mut self, content_ref: &str) -> Result<BatchId, BatchError> {
        if content_ref.is_empty() {
            return Err(BatchError::EmptyContentRef);
        }
        self.high_water += 1;
        let id = BatchId::new(self.high_water);
        self.records.insert(id, Batch::new(id, content_ref.to_string()));
        Ok(id)
    }

    /// Fetch a batch record.
    pub fn get(&self, id: BatchId) -> Result<&Batch, BatchError> {
        self.records.get(&id).ok_or(BatchError::UnknownBatch(id))
    }

    /// Current lifecycle status of a batch.
    pub fn status_of(&self, id: BatchId) -> Result<BatchStatus, BatchError> {
        Ok(self.get(id)?.status)
    }

    /// Move a batch to a new lifecycle status.
    pub fn set_status(&mut self, id: BatchId, status: BatchStatus) -> Result<(), BatchError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(BatchError::UnknownBatch(id))?;
        record.status = status;
        Ok(())
    }

    /// Replace a batch's content reference.
    pub fn set_content_ref(&mut self, id: BatchId, content_ref: &str) -> Result<(), BatchError> {
        if content_ref.is_empty() {
            return Err(BatchError::EmptyContentRef);
        }
        let record = self
            .records
            .get_mut(&id)
            .ok_or(BatchError::UnknownBatch(id))?;
        record.content_ref = content_ref.to_string();
        Ok(())
    }

    /// Flag a batch as recalled and store the reason. The flag is
    /// monotonic; callers enforce not-already-recalled before this point.
    pub fn mark_recalled(&mut self, id: BatchId, reason: &[u8]) -> Result<(), BatchError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(BatchError::UnknownBatch(id))?;
        record.status = BatchStatus::Recalled;
        record.recalled = true;
        record.recall_reason = Some(reason.to_vec());
        Ok(())
    }

    /// Number of batches created so far (also the highest assigned id).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.high_water
    }
}
