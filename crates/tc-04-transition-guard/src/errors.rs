//! # Error Types
//!
//! The unified failure taxonomy for guard operations. Sub-registry errors
//! convert into flat variants here so callers match a single enum.
//!
//! Every failure is terminal and synchronous: the operation aborts with no
//! partial mutation and no event emission. Retry is a caller policy.

use shared_types::{BatchId, BatchStatus, Capability};
use tc_01_role_registry::RoleError;
use tc_02_custody_ledger::LedgerError;
use tc_03_batch_registry::BatchError;
use thiserror::Error;

/// Errors that can occur while executing a guard operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The caller does not hold the capability the operation requires.
    #[error("missing required role: {0}")]
    MissingRole(Capability),

    /// The caller holds the capability but is not the batch's custodian.
    #[error("not current holder")]
    NotCurrentHolder,

    /// The caller is neither owner, approved spender, nor operator.
    #[error("not owner nor approved")]
    NotOwnerNorApproved,

    /// Approval caller is neither the owner nor one of its operators.
    #[error("not owner nor operator")]
    NotOwnerNorOperator,

    /// No batch exists with this id.
    #[error("unknown batch: {0}")]
    UnknownBatch(BatchId),

    /// The operation is not legal from the batch's current status.
    #[error("operation not valid in {0} state")]
    InvalidState(BatchStatus),

    /// A content reference must be non-empty.
    #[error("content reference required")]
    EmptyContentRef,

    /// An approval that would point back at its own holder.
    #[error("self-approval not permitted")]
    SelfApproval,

    /// The zero identity was used where a real account is required.
    #[error("zero address is not a valid account")]
    InvalidAccount,

    /// Transfer recipient holds none of the supply-chain capabilities.
    #[error("recipient has no valid supply-chain role")]
    RecipientHasNoRole,

    /// An inspected batch may only move to a carrier.
    #[error("recipient must be a carrier")]
    RecipientMustBeCarrier,

    /// An in-transit batch may only move to a retailer.
    #[error("recipient must be a retailer")]
    RecipientMustBeRetailer,

    /// The batch's status forbids transfer outright.
    #[error("cannot transfer in {0} state")]
    TransferNotAllowed(BatchStatus),

    /// A recalled batch may only move to the quarantine vault.
    #[error("recalled batch can only transfer to the quarantine vault")]
    RecallDestinationOnly,

    /// A consumed batch may only move to the archive vault.
    #[error("consumed batch can only transfer to the archive vault")]
    ArchiveDestinationOnly,

    /// The batch was already recalled; the flag is monotonic.
    #[error("already recalled")]
    AlreadyRecalled,

    /// Consumed batches are beyond recall.
    #[error("cannot recall consumed batch")]
    AlreadyConsumed,

    /// Bootstrap was attempted after an admin already exists.
    #[error("admin already assigned")]
    AlreadyBootstrapped,

    /// The revoke would leave the registry with no admin holder.
    #[error("cannot revoke the last admin")]
    LastAdmin,
}

impl From<RoleError> for GuardError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::NotAdmin => Self::MissingRole(Capability::Admin),
            RoleError::AlreadyBootstrapped => Self::AlreadyBootstrapped,
            RoleError::LastAdmin => Self::LastAdmin,
            RoleError::InvalidAccount => Self::InvalidAccount,
        }
    }
}

impl From<LedgerError> for GuardError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownBatch(id) => Self::UnknownBatch(id),
            LedgerError::ZeroAccount => Self::InvalidAccount,
            LedgerError::NotOwnerNorOperator => Self::NotOwnerNorOperator,
            LedgerError::SelfApproval => Self::SelfApproval,
        }
    }
}

impl From<BatchError> for GuardError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::UnknownBatch(id) => Self::UnknownBatch(id),
            BatchError::EmptyContentRef => Self::EmptyContentRef,
        }
    }
}
