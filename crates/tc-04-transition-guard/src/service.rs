//! # Transition Guard Service
//!
//! Every public operation enters here. The guard reads the role registry,
//! custody ledger, and batch registry, validates the full operation, then
//! mutates and appends events — one synchronous, all-or-nothing step.
//!
//! ## Atomicity
//!
//! Operations follow a strict validate-then-mutate discipline: every check
//! that can fail runs before the first mutation, so a failure leaves all
//! three registries and the event log untouched. No rollback machinery is
//! needed. The hosting environment totally orders callers; the guard never
//! observes two in-flight operations.

use crate::errors::GuardError;
use crate::rules::{rule_for, TransferRule};
use shared_bus::{EventLog, TraceEvent};
use shared_types::{AccountId, BatchId, BatchStatus, Capability};
use tc_01_role_registry::RoleRegistry;
use tc_02_custody_ledger::CustodyLedger;
use tc_03_batch_registry::BatchRegistry;
use tracing::{debug, info};

/// The core state machine: validates and executes every custody and
/// lifecycle operation.
#[derive(Debug, Default)]
pub struct TransitionGuard {
    roles: RoleRegistry,
    ledger: CustodyLedger,
    batches: BatchRegistry,
    log: EventLog,
}

impl TransitionGuard {
    /// Create a guard with empty registries. Only
    /// [`bootstrap`](Self::bootstrap) is useful until an admin exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // BOOTSTRAP & ROLE ADMINISTRATION
    // =========================================================================

    /// Assign the first admin. Accepted only while no admin holder exists,
    /// so it runs at most once, before any other operation.
    pub fn bootstrap(&mut self, admin: AccountId) -> Result<(), GuardError> {
        self.roles.bootstrap(admin)?;
        self.log.append(TraceEvent::CapabilityGranted {
            capability: Capability::Admin,
            account: admin,
            admin,
        });
        info!(%admin, "Chain bootstrapped");
        Ok(())
    }

    /// Grant a capability to an account. Caller must hold admin.
    pub fn grant_role(
        &mut self,
        caller: AccountId,
        capability: Capability,
        account: AccountId,
    ) -> Result<(), GuardError> {
        let changed = self.roles.grant(caller, capability, account)?;
        if changed {
            self.log.append(TraceEvent::CapabilityGranted {
                capability,
                account,
                admin: caller,
            });
        }
        Ok(())
    }

    /// Revoke a capability from an account. Caller must hold admin.
    pub fn revoke_role(
        &mut self,
        caller: AccountId,
        capability: Capability,
        account: AccountId,
    ) -> Result<(), GuardError> {
        let changed = self.roles.revoke(caller, capability, account)?;
        if changed {
            self.log.append(TraceEvent::CapabilityRevoked {
                capability,
                account,
                admin: caller,
            });
        }
        Ok(())
    }

    // =========================================================================
    // LIFECYCLE OPERATIONS
    // =========================================================================

    /// Create a new batch owned by the caller, at the start of the
    /// lifecycle. Caller must hold the producer capability.
    pub fn create_batch(
        &mut self,
        caller: AccountId,
        content_ref: &str,
    ) -> Result<BatchId, GuardError> {
        self.require_role(Capability::Producer, caller)?;

        let id = self.batches.create(content_ref)?;
        self.ledger.track(id, caller);

        self.log.append(TraceEvent::BatchCreated { id, creator: caller });
        self.log.append(TraceEvent::CustodyTransferred {
            id,
            from: AccountId::ZERO,
            to: caller,
        });
        info!(%id, creator = %caller, "Batch created");
        Ok(id)
    }

    /// Attest a freshly created batch, optionally replacing its content
    /// reference. Caller must hold the inspector capability; the batch
    /// must still be in the harvested state. Custody is unchanged.
    pub fn inspect_batch(
        &mut self,
        caller: AccountId,
        id: BatchId,
        new_ref: Option<&str>,
    ) -> Result<(), GuardError> {
        self.require_role(Capability::Inspector, caller)?;

        let status = self.batches.status_of(id)?;
        if status != BatchStatus::Harvested {
            return Err(GuardError::InvalidState(status));
        }
        if new_ref.is_some_and(str::is_empty) {
            return Err(GuardError::EmptyContentRef);
        }

        self.batches.set_status(id, BatchStatus::Inspecting)?;
        if let Some(content_ref) = new_ref {
            self.batches.set_content_ref(id, content_ref)?;
        }

        self.log.append(TraceEvent::BatchInspected { id, inspector: caller });
        self.log.append(TraceEvent::StatusUpdated {
            id,
            old_status: BatchStatus::Harvested,
            new_status: BatchStatus::Inspecting,
        });
        info!(%id, inspector = %caller, "Batch inspected");
        Ok(())
    }

    /// Replace a batch's content reference at any point in the lifecycle.
    /// Caller must hold the inspector capability.
    pub fn update_content_ref(
        &mut self,
        caller: AccountId,
        id: BatchId,
        content_ref: &str,
    ) -> Result<(), GuardError> {
        self.require_role(Capability::Inspector, caller)?;
        self.batches.set_content_ref(id, content_ref)?;

        self.log.append(TraceEvent::ContentRefUpdated { id, updater: caller });
        debug!(%id, updater = %caller, "Content reference updated");
        Ok(())
    }

    // =========================================================================
    // APPROVALS
    // =========================================================================

    /// Set the approved spender for a batch. Caller must be the owner or
    /// one of the owner's operators; the zero identity clears the slot.
    pub fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        id: BatchId,
    ) -> Result<(), GuardError> {
        let owner = self.ledger.owner_of(id)?;
        self.ledger.approve(caller, spender, id)?;

        self.log.append(TraceEvent::ApprovalSet { id, owner, spender });
        Ok(())
    }

    /// Enable or disable a blanket operator for all of the caller's
    /// batches.
    pub fn set_operator_approval(
        &mut self,
        caller: AccountId,
        operator: AccountId,
        enabled: bool,
    ) -> Result<(), GuardError> {
        self.ledger.set_operator_approval(caller, operator, enabled)?;

        self.log.append(TraceEvent::OperatorApprovalSet {
            owner: caller,
            operator,
            approved: enabled,
        });
        Ok(())
    }

    // =========================================================================
    // TRANSFER
    // =========================================================================

    /// Move custody of a batch from its current owner to `to`.
    ///
    /// The caller must be the owner, the approved spender, or an operator
    /// of the owner, and `from` must name the current owner. Legality of
    /// the destination is dispatched on the batch's current status via the
    /// transfer decision table; see [`rule_for`].
    pub fn transfer(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        id: BatchId,
    ) -> Result<(), GuardError> {
        let status = self.batches.status_of(id)?;
        let owner = self.ledger.owner_of(id)?;

        if from != owner || !self.ledger.is_authorized(caller, id)? {
            return Err(GuardError::NotOwnerNorApproved);
        }

        // Status-first dispatch: terminal and initial statuses bypass the
        // recipient capability check entirely.
        let new_status = match rule_for(status) {
            TransferRule::VaultOnly {
                vault,
                wrong_destination,
            } => {
                if to != vault {
                    return Err(wrong_destination);
                }
                None
            }
            TransferRule::Forbidden(err) => return Err(err),
            TransferRule::Relay {
                required,
                wrong_recipient,
                next,
            } => {
                self.require_supply_chain_recipient(to)?;
                if !self.roles.has(required, to) {
                    return Err(wrong_recipient);
                }
                Some(next)
            }
            TransferRule::Blocked(err) => {
                self.require_supply_chain_recipient(to)?;
                return Err(err);
            }
        };

        // Fully validated; apply and report.
        self.ledger.record_transfer(from, to, id)?;
        self.log.append(TraceEvent::CustodyTransferred { id, from, to });
        if let Some(next) = new_status {
            self.batches.set_status(id, next)?;
            self.log.append(TraceEvent::StatusUpdated {
                id,
                old_status: status,
                new_status: next,
            });
        }
        if to == AccountId::ARCHIVE_VAULT {
            self.log.append(TraceEvent::BatchArchived { id, vault: to });
        }

        info!(%id, %from, %to, ?new_status, "Custody transferred");
        Ok(())
    }

    // =========================================================================
    // RETAIL ADVANCEMENT
    // =========================================================================

    /// Advance a delivered batch one retail step:
    /// delivered → retailed → consumed.
    ///
    /// The caller must hold the retailer capability *and* be the current
    /// holder; the two checks fail distinctly.
    pub fn advance_retail(&mut self, caller: AccountId, id: BatchId) -> Result<(), GuardError> {
        self.require_role(Capability::Retailer, caller)?;

        let status = self.batches.status_of(id)?;
        let owner = self.ledger.owner_of(id)?;
        if caller != owner {
            return Err(GuardError::NotCurrentHolder);
        }
        let next = status
            .retail_successor()
            .ok_or(GuardError::InvalidState(status))?;

        self.batches.set_status(id, next)?;
        self.log.append(TraceEvent::StatusUpdated {
            id,
            old_status: status,
            new_status: next,
        });
        info!(%id, retailer = %caller, from = %status, to = %next, "Retail status advanced");
        Ok(())
    }

    // =========================================================================
    // RECALL
    // =========================================================================

    /// Pull a batch from circulation. Caller must hold admin; consumed
    /// batches are beyond recall and a recall never repeats. Custody is
    /// unchanged — moving the batch to quarantine is a separate transfer.
    pub fn recall(
        &mut self,
        caller: AccountId,
        id: BatchId,
        reason: &[u8],
    ) -> Result<(), GuardError> {
        self.require_role(Capability::Admin, caller)?;

        let record = self.batches.get(id)?;
        if record.status == BatchStatus::Consumed {
            return Err(GuardError::AlreadyConsumed);
        }
        if record.recalled {
            return Err(GuardError::AlreadyRecalled);
        }
        let old_status = record.status;

        self.batches.mark_recalled(id, reason)?;
        self.log.append(TraceEvent::BatchRecalled {
            id,
            admin: caller,
            reason: reason.to_vec(),
        });
        self.log.append(TraceEvent::StatusUpdated {
            id,
            old_status,
            new_status: BatchStatus::Recalled,
        });
        info!(%id, admin = %caller, "Batch recalled");
        Ok(())
    }

    // =========================================================================
    // READ-ONLY QUERIES
    // =========================================================================

    /// Current custodian of a batch.
    pub fn owner_of(&self, id: BatchId) -> Result<AccountId, GuardError> {
        Ok(self.ledger.owner_of(id)?)
    }

    /// Number of batches an account currently holds.
    pub fn balance_of(&self, account: AccountId) -> Result<u64, GuardError> {
        Ok(self.ledger.balance_of(account)?)
    }

    /// Current lifecycle status of a batch.
    pub fn status_of(&self, id: BatchId) -> Result<BatchStatus, GuardError> {
        Ok(self.batches.status_of(id)?)
    }

    /// Current content reference of a batch.
    pub fn content_ref_of(&self, id: BatchId) -> Result<&str, GuardError> {
        Ok(&self.batches.get(id)?.content_ref)
    }

    /// The recall reason stored with a batch, if it was ever recalled.
    pub fn recall_reason_of(&self, id: BatchId) -> Result<Option<&[u8]>, GuardError> {
        Ok(self.batches.get(id)?.recall_reason.as_deref())
    }

    /// The approved spender for a batch, if any.
    pub fn approved_for(&self, id: BatchId) -> Result<Option<AccountId>, GuardError> {
        Ok(self.ledger.approved_for(id)?)
    }

    /// Whether `operator` may act for all of `owner`'s batches.
    #[must_use]
    pub fn is_operator_approved(&self, owner: AccountId, operator: AccountId) -> bool {
        self.ledger.is_operator_approved(owner, operator)
    }

    /// Whether an account holds a capability.
    #[must_use]
    pub fn has_role(&self, capability: Capability, account: AccountId) -> bool {
        self.roles.has(capability, account)
    }

    /// Number of batches created so far (also the highest assigned id).
    #[must_use]
    pub fn batch_count(&self) -> u64 {
        self.batches.count()
    }

    /// All events emitted so far, in order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        self.log.entries()
    }

    /// The append-only event log.
    #[must_use]
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    // =========================================================================
    // INTERNAL GUARDS
    // =========================================================================

    fn require_role(&self, capability: Capability, caller: AccountId) -> Result<(), GuardError> {
        if self.roles.has(capability, caller) {
            Ok(())
        } else {
            Err(GuardError::MissingRole(capability))
        }
    }

    /// The generic mid-chain recipient check: the destination must hold at
    /// least one supply-chain capability. Vaults and the zero identity
    /// hold none, so they are rejected here as well.
    fn require_supply_chain_recipient(&self, to: AccountId) -> Result<(), GuardError> {
        if self.roles.has_any(&Capability::SUPPLY_CHAIN, to) {
            Ok(())
        } else {
            Err(GuardError::RecipientHasNoRole)
        }
    }
}
