//! HAProxy runtime API subsystem.
//!
//! # Data Flow
//! ```text
//! Command string ("show servers state <backend>")
//!     → transport.rs (connect, write + CRLF, half-close, read to EOF)
//!     → raw response text
//!     → state.rs (preamble/header handling, positional field zip)
//!     → Vec<ServerRecord> filtered to the requested backend
//! ```
//!
//! # Design Decisions
//! - One command per connection; the runtime API signals end-of-response by
//!   closing the socket, so connections are never reused or pipelined.
//! - Rows are converted into typed records at the parse boundary; nothing
//!   downstream ever sees a raw string field where a number is meant.

pub mod state;
pub mod transport;

pub use state::{parse_backend_state, ServerRecord};
pub use transport::RuntimeSocket;
