//! Slot reconciliation subsystem.
//!
//! # Data Flow
//! ```text
//! register / unregister request
//!     → engine.rs (read current backend state over the runtime API)
//!     → selector.rs (pure decision: already registered? which slot?)
//!     → engine.rs (issue the set-address / set-state commands)
//!     → outcome reported to caller
//! ```
//!
//! # Design Decisions
//! - Every operation re-reads backend state; nothing is cached between calls,
//!   so changes made by other hosts are picked up on the next cycle.
//! - Selection logic is pure functions over parsed records, kept apart from
//!   the I/O so the decision rules are testable without a socket.

pub mod engine;
pub mod selector;

pub use engine::Reconciler;
