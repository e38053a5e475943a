//! # Transfer Decision Table
//!
//! The authoritative mapping from a batch's current status to the rule its
//! transfer must satisfy. Status is consulted before the recipient's
//! capabilities: the two terminal statuses and the initial status have
//! closed recipient sets (or none at all) and bypass the capability check
//! entirely; the four mid-chain statuses share the generic
//! recipient-must-hold-a-role guard before their own specific rule.

use crate::errors::GuardError;
use shared_types::{AccountId, BatchStatus, Capability};

/// What a transfer must satisfy given the batch's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferRule {
    /// Only the named vault is a legal destination; status is unchanged.
    VaultOnly {
        /// The sole legal destination.
        vault: AccountId,
        /// Failure for any other destination.
        wrong_destination: GuardError,
    },

    /// No destination is legal; fails before any recipient check.
    Forbidden(GuardError),

    /// Mid-chain relay: recipient must hold a supply-chain capability,
    /// then the specific required one; success advances the status.
    Relay {
        /// The capability the recipient must hold.
        required: Capability,
        /// Failure when the recipient holds a role but not the required one.
        wrong_recipient: GuardError,
        /// Status after a successful relay.
        next: BatchStatus,
    },

    /// Recipient must hold a supply-chain capability, but even then the
    /// status categorically forbids transfer (advance or archive instead).
    Blocked(GuardError),
}

/// The rule governing transfers out of the given status.
#[must_use]
pub fn rule_for(status: BatchStatus) -> TransferRule {
    match status {
        BatchStatus::Recalled => TransferRule::VaultOnly {
            vault: AccountId::QUARANTINE_VAULT,
            wrong_destination: GuardError::RecallDestinationOnly,
        },
        BatchStatus::Consumed => TransferRule::VaultOnly {
            vault: AccountId::ARCHIVE_VAULT,
            wrong_destination: GuardError::ArchiveDestinationOnly,
        },
        BatchStatus::Harvested => {
            TransferRule::Forbidden(GuardError::TransferNotAllowed(status))
        }
        BatchStatus::Inspecting => TransferRule::Relay {
            required: Capability::Carrier,
            wrong_recipient: GuardError::RecipientMustBeCarrier,
            next: BatchStatus::InTransit,
        },
        BatchStatus::InTransit => TransferRule::Relay {
            required: Capability::Retailer,
            wrong_recipient: GuardError::RecipientMustBeRetailer,
            next: BatchStatus::Delivered,
        },
        BatchStatus::Delivered | BatchStatus::Retailed => {
            TransferRule::Blocked(GuardError::TransferNotAllowed(status))
        }
    }
}
