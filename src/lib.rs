//! HAProxy backend self-registration agent.
//!
//! Keeps an HAProxy backend's membership in sync with this host's actual
//! network location by speaking the runtime API over its stats socket.
//!
//! ```text
//! CLI / daemon
//!     → discovery (what address am I?)
//!     → reconcile::engine (register / unregister)
//!         → runtime::transport (one command, one connection)
//!         → runtime::state (parse `show servers state`)
//!         → reconcile::selector (which slot?)
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod lifecycle;
pub mod reconcile;
pub mod runtime;

pub use error::{Error, Result};
pub use lifecycle::{Daemon, Shutdown};
pub use reconcile::Reconciler;
pub use runtime::RuntimeSocket;
