//! # Capabilities
//!
//! Named permissions grantable by an admin holder. An account may hold any
//! combination; membership is checked by the role registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named permission in the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// May create new batches.
    Producer,
    /// May attest batches and maintain content references.
    Inspector,
    /// May receive custody of inspected batches for transport.
    Carrier,
    /// May receive delivered batches and advance them through retail.
    Retailer,
    /// May grant/revoke capabilities and recall batches.
    Admin,
}

impl Capability {
    /// The four non-admin tags a transfer recipient may satisfy.
    pub const SUPPLY_CHAIN: [Self; 4] = [
        Self::Producer,
        Self::Inspector,
        Self::Carrier,
        Self::Retailer,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Producer => "producer",
            Self::Inspector => "inspector",
            Self::Carrier => "carrier",
            Self::Retailer => "retailer",
            Self::Admin => "admin",
        };
        write!(f, "{name}")
    }
}
