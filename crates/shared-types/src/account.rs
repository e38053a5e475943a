//! # Account Identity
//!
//! Immutable identity primitive for every participant in the supply chain.
//! Accounts are opaque 20-byte identities assigned by the hosting
//! environment; the core never derives or verifies them.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ACCOUNT ID (20 bytes)
// =============================================================================

/// A 20-byte account identity.
///
/// Participants (producers, inspectors, carriers, retailers, admins) and
/// the reserved vault identities all share this type. Vaults hold no
/// capabilities and are recognized only by the transition guard.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The zero identity (0x0000...0000). Never a valid custodian.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Reserved vault receiving recalled batches (0x0000...dead).
    pub const QUARANTINE_VAULT: Self = Self([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xde, 0xad,
    ]);

    /// Reserved vault receiving consumed batches (0x0000...aaaa).
    pub const ARCHIVE_VAULT: Self = Self([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xaa, 0xaa,
    ]);

    /// Creates an account id from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an account id from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Returns true if this is one of the reserved vault identities.
    #[must_use]
    pub fn is_vault(&self) -> bool {
        *self == Self::QUARANTINE_VAULT || *self == Self::ARCHIVE_VAULT
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<AccountId> for [u8; 20] {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
