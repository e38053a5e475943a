//! # Custody Ledger
//!
//! Tracks the single current owner of every batch, plus the two approval
//! channels that let someone other than the owner move it: a per-batch
//! approved spender and per-owner blanket operators.
//!
//! The ledger answers authorization questions and applies custody moves;
//! whether a move is *legal* for the batch's lifecycle state is the
//! transition guard's decision, made before any mutation here.

use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, BatchId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Unique-owner-per-batch custody bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustodyLedger {
    /// Current owner per tracked batch.
    owners: HashMap<BatchId, AccountId>,
    /// Owned-batch count per account.
    balances: HashMap<AccountId, u64>,
    /// At most one approved spender per batch. Cleared on every transfer.
    approvals: HashMap<BatchId, AccountId>,
    /// Blanket operator approvals per owner. Unaffected by transfers.
    operators: HashMap<AccountId, HashSet<AccountId>>,
}

impl CustodyLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current owner of a batch.
    pub fn owner_of(&self, id: BatchId) -> Result<AccountId, LedgerError> {
        self.owners
            .get(&id)
            .copied()
            .ok_or(LedgerError::UnknownBatch(id))
    }

    /// Number of batches an account currently owns.
    ///
    /// The zero identity is rejected; the vaults are ordinary query
    /// targets.
    pub fn balance_of(&self, account: AccountId) -> Result<u64, LedgerError> {
        if account.is_zero() {
            return Err(LedgerError::ZeroAccount);
        }
        Ok(self.balances.get(&account).copied().unwrap_or(0))
    }

    /// Set the approved spender for a batch.
    ///
    /// The caller must be the owner or one of the owner's operators.
    /// Passing the zero identity clears the approval.
    pub fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        id: BatchId,
    ) -> Result<(), LedgerError> {
        let owner = self.owner_of(id)?;
        if spender == owner {
            return Err(LedgerError::SelfApproval);
        }
        if caller != owner && !self.is_operator_approved(owner, caller) {
            return Err(LedgerError::NotOwnerNorOperator);
        }
        if spender.is_zero() {
            self.approvals.remove(&id);
        } else {
            self.approvals.insert(id, spender);
        }
        debug!(%id, %owner, %spender, "Approval set");
        Ok(())
    }

    /// The approved spender for a batch, if one is set.
    pub fn approved_for(&self, id: BatchId) -> Result<Option<AccountId>, LedgerError> {
        if !self.owners.contains_key(&id) {
            return Err(LedgerError::UnknownBatch(id));
        }
        Ok(self.approvals.get(&id).copied())
    }

    /// Enable or disable a blanket operator for all of the caller's
    /// batches, present and future.
    pub fn set_operator_approval(
        &mut self,
        caller: AccountId,
        operator: AccountId,
        enabled: bool,
    ) -> Result<(), LedgerError> {
        if operator == caller {
            return Err(LedgerError::SelfApproval);
        }
        if operator.is_zero() {
            return Err(LedgerError::ZeroAccount);
        }
        if enabled {
            self.operators.entry(caller).or_default().insert(operator);
        } else if let Some(set) = self.operators.get_mut(&caller) {
            set.remove(&operator);
        }
        debug!(owner = %caller, %operator, enabled, "Operator approval updated");
        Ok(())
    }

    /// Whether `operator` may act for all of `owner`'s batches.
    #[must_use]
    pub fn is_operator_approved(&self, owner: AccountId, operator: AccountId) -> bool {
        self.operators
            .get(&owner)
            .is_some_and(|set| set.contains(&operator))
    }

    /// Whether `caller` may move a batch: owner, approved spender, or an
    /// operator of the owner.
    pub fn is_authorized(&self, caller: AccountId, id: BatchId) -> Result<bool, LedgerError> {
        let owner = self.owner_of(id)?;
        Ok(caller == owner
            || self.approvals.get(&id) == Some(&caller)
            || self.is_operator_approved(owner, caller))
    }

    /// Begin tracking a freshly created batch.
    ///
    /// Invoked by the transition guard once per id, right after the batch
    /// registry assigns it.
    pub fn track(&mut self, id: BatchId, owner: AccountId) {
        debug_assert!(!self.owners.contains_key(&id), "batch id reused");
        self.owners.insert(id, owner);
        *self.balances.entry(owner).or_insert(0) += 1;
    }

    /// Move custody of a batch and clear its approval.
    ///
    /// Invoked by the transition guard after full validation; `from` is
    /// the already-verified current owner.
    pub fn record_transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        id: BatchId,
    ) -> Result<(), LedgerError> {
        let owner = self.owner_of(id)?;
        debug_assert_eq!(owner, from, "transfer from non-owner");

        self.owners.insert(id, to);
        if let Some(balance) = self.balances.get_mut(&owner) {
            *balance = balance.saturating_sub(1);
        }
        *self.balances.entry(to).or_insert(0) += 1;
        self.approvals.remove(&id);

        debug!(%id, %from, %to, "Custody recorded");
        Ok(())
    }
}
