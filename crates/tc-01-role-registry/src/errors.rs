//! # Error Types
//!
//! Failures from role registry operations.

use thiserror::Error;

/// Errors that can occur while managing capability membership.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// The caller does not hold the admin capability.
    #[error("missing required role: admin")]
    NotAdmin,

    /// Bootstrap was attempted after an admin already exists.
    #[error("admin already assigned")]
    AlreadyBootstrapped,

    /// The revoke would leave the registry with no admin holder.
    #[error("cannot revoke the last admin")]
    LastAdmin,

    /// The zero identity cannot hold capabilities.
    #[error("zero address is not a valid account")]
    InvalidAccount,
}
