//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, semantic checks)
//!     → AgentConfig (validated, immutable)
//!     → CLI flags override individual fields
//!     → effective settings handed to the reconciler/daemon
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; the agent is restarted to change it
//! - All fields have defaults so a pure-CLI invocation needs no file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{AgentConfig, DiscoveryConfig, EndpointConfig, TimeoutConfig};
