//! # Error Types
//!
//! Failures from batch registry operations.

use shared_types::BatchId;
use thiserror::Error;

/// Errors that can occur while maintaining batch records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// No record exists for the batch id.
    #[error("unknown batch: {0}")]
    UnknownBatch(BatchId),

    /// A content reference must be non-empty.
    #[error("content reference required")]
    EmptyContentRef,
}
