//! # Role Registry
//!
//! Authoritative capability membership. Every other subsystem treats this
//! registry as read-only; only admin-gated grant/revoke and the one-time
//! bootstrap mutate it.

use crate::errors::RoleError;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Capability};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Mapping from account identity to the set of capabilities it holds.
///
/// Invariant: once [`bootstrap`](Self::bootstrap) has run, at least one
/// account holds [`Capability::Admin`] at all times.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    memberships: HashMap<AccountId, HashSet<Capability>>,
}

impl RoleRegistry {
    /// Create an empty registry. No operation besides bootstrap is
    /// accepted until an admin exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the first admin. Callable only while no admin holder exists,
    /// which bounds it to at most one successful call.
    pub fn bootstrap(&mut self, admin: AccountId) -> Result<(), RoleError> {
        if admin.is_zero() {
            return Err(RoleError::InvalidAccount);
        }
        if self.bootstrapped() {
            return Err(RoleError::AlreadyBootstrapped);
        }
        self.memberships
            .entry(admin)
            .or_default()
            .insert(Capability::Admin);
        debug!(admin = %admin, "Registry bootstrapped");
        Ok(())
    }

    /// True once the bootstrap admin has been assigned.
    #[must_use]
    pub fn bootstrapped(&self) -> bool {
        self.admin_count() > 0
    }

    /// Grant a capability to an account. Caller must hold admin.
    ///
    /// Returns `true` if membership changed, `false` if the account
    /// already held the capability (no-op, so the caller can skip event
    /// emission).
    pub fn grant(
        &mut self,
        caller: AccountId,
        capability: Capability,
        account: AccountId,
    ) -> Result<bool, RoleError> {
        if !self.has(Capability::Admin, caller) {
            return Err(RoleError::NotAdmin);
        }
        if account.is_zero() {
            return Err(RoleError::InvalidAccount);
        }
        let changed = self.memberships.entry(account).or_default().insert(capability);
        if changed {
            debug!(%capability, %account, "Capability granted");
        }
        Ok(changed)
    }

    /// Revoke a capability from an account. Caller must hold admin.
    ///
    /// Returns `true` if membership changed. Revoking the final admin is
    /// rejected to keep the bootstrap invariant.
    pub fn revoke(
        &mut self,
        caller: AccountId,
        capability: Capability,
        account: AccountId,
    ) -> Result<bool, RoleError> {
        if !self.has(Capability::Admin, caller) {
            return Err(RoleError::NotAdmin);
        }
        if capability == Capability::Admin
            && self.has(Capability::Admin, account)
            && self.admin_count() == 1
        {
            return Err(RoleError::LastAdmin);
        }
        let changed = self
            .memberships
            .get_mut(&account)
            .is_some_and(|set| set.remove(&capability));
        if changed {
            debug!(%capability, %account, "Capability revoked");
        }
        Ok(changed)
    }

    /// Whether an account holds a capability. Total: unknown accounts hold
    /// nothing.
    #[must_use]
    pub fn has(&self, capability: Capability, account: AccountId) -> bool {
        self.memberships
            .get(&account)
            .is_some_and(|set| set.contains(&capability))
    }

    /// Whether an account holds any of the given capabilities.
    #[must_use]
    pub fn has_any(&self, capabilities: &[Capability], account: AccountId) -> bool {
        capabilities.iter().any(|cap| self.has(*cap, account))
    }

    fn admin_count(&self) -> usize {
        self.memberships
            .values()
            .filter(|set| set.contains(&Capability::Admin))
            .count()
    }
}
