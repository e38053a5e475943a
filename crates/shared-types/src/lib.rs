//! # Shared Types Crate
//!
//! This crate contains the domain value objects shared by every TraceChain
//! subsystem: identities, batch records, and capability tags.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Values, not behavior**: subsystem crates add behavior; this crate
//!   never grows registries or services of its own.

pub mod account;
pub mod batch;
pub mod capability;

pub use account::AccountId;
pub use batch::{Batch, BatchId, BatchStatus};
pub use capability::Capability;
