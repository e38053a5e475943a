//! # tc-03-batch-registry
//!
//! Batch lifecycle record subsystem for TraceChain.
//!
//! ## Role in System
//!
//! - **Record store**: one record per batch, created once, never deleted
//! - **Id allocator**: sequential ids from 1, never reused
//! - **No policy**: which status changes are legal is decided by the
//!   transition guard; this registry only applies them

pub mod errors;
pub mod registry;

pub use errors::BatchError;
pub use registry::BatchRegistry;
