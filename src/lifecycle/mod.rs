//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Daemon (daemon.rs):
//!     register immediately → sleep interval → register → repeat
//!
//! Shutdown (shutdown.rs):
//!     Signal received → interrupt inter-cycle wait → leave loop
//!     → unregister exactly once → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - The loop observes shutdown only between commands; a round-trip already
//!   in flight finishes, since the protocol cannot roll back a sent command.
//! - The final unregister is best-effort: its failure is logged, never a
//!   reason to keep the process alive.

pub mod daemon;
pub mod shutdown;
pub mod signals;

pub use daemon::Daemon;
pub use shutdown::Shutdown;
