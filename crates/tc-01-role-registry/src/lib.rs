//! # tc-01-role-registry
//!
//! Capability membership subsystem for TraceChain.
//!
//! ## Role in System
//!
//! - **Leaf dependency**: every other subsystem consults membership here
//! - **Admin-gated mutation**: only admin holders grant or revoke
//! - **One-time bootstrap**: the first admin is assigned exactly once,
//!   before any other operation is accepted

pub mod errors;
pub mod registry;

pub use errors::RoleError;
pub use registry::RoleRegistry;
