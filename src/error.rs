//! Crate-wide error taxonomy.
//!
//! Every failure the runtime client or reconciler can surface is one of the
//! variants below. The core never retries on its own; errors propagate to the
//! caller unmodified, and only the daemon loop turns a failed cycle into a
//! "log and try again next interval".

use thiserror::Error;

/// Errors surfaced by the runtime client and reconciliation engine.
#[derive(Debug, Error)]
pub enum Error {
    /// TCP connect to the runtime socket failed or timed out.
    #[error("connection to {endpoint} failed: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// Read or write on an established connection failed or timed out.
    #[error("I/O error talking to {endpoint}: {source}")]
    Io {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The server-state response could not be parsed.
    #[error("malformed server-state response: {0}")]
    Parse(String),

    /// The requested backend does not exist or reported no servers.
    #[error("backend '{0}' not found or empty")]
    BackendNotFound(String),

    /// No slot in the backend qualifies as free.
    #[error("no free slot available in backend '{0}'")]
    NoCapacity(String),

    /// The host appears registered but no active slot holds its address.
    #[error("address {ip} is present in backend '{backend}' but no enabled slot owns it")]
    SlotNotFound { backend: String, ip: String },

    /// Host IP discovery failed.
    #[error("could not discover host IP: {0}")]
    IpDiscovery(String),

    /// Configuration file could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
