//! # Error Types
//!
//! Failures from custody ledger operations.

use shared_types::BatchId;
use thiserror::Error;

/// Errors that can occur while tracking custody.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The batch id is not tracked by the ledger.
    #[error("unknown batch: {0}")]
    UnknownBatch(BatchId),

    /// The zero identity was used where a real account is required.
    #[error("zero address is not a valid account")]
    ZeroAccount,

    /// The caller is neither the owner nor an approved operator.
    #[error("not owner nor operator")]
    NotOwnerNorOperator,

    /// An approval that would point back at its own holder.
    #[error("self-approval not permitted")]
    SelfApproval,
}
