//! # tc-02-custody-ledger
//!
//! Unique-owner custody tracking subsystem for TraceChain.
//!
//! ## Role in System
//!
//! - **Custody authority**: the single source of truth for who holds
//!   which batch
//! - **Approval bookkeeping**: per-batch approved spenders and per-owner
//!   blanket operators
//! - **Mechanism, not policy**: lifecycle legality of a move is decided
//!   by the transition guard before the ledger mutates

pub mod errors;
pub mod ledger;

pub use errors::LedgerError;
pub use ledger::CustodyLedger;
