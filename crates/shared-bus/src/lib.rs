//! # Shared Bus - Event Sink and Observer Distribution
//!
//! Every completed transition appends to an ordered [`EventLog`]; external
//! observers either read the log directly or subscribe to the broadcast
//! bus the hosting environment relays log entries onto.
//!
//! ## Event Flow
//!
//! ```text
//! ┌──────────────────┐  append()   ┌───────────┐  relay   ┌─────────────┐
//! │ Transition Guard │ ──────────→ │ Event Log │ ───────→ │  Event Bus  │
//! └──────────────────┘             └───────────┘          └─────────────┘
//!                                                               │
//!                                                   subscribe() │
//!                                                               ↓
//!                                                         observers
//! ```
//!
//! The log append happens synchronously inside the guard's atomic step; a
//! failed operation appends nothing. Bus delivery is best-effort fan-out
//! for observers, never part of the core's commit path.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod log;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, TraceEvent};
pub use log::EventLog;
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
