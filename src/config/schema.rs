//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file. Every
//! field has a default so a file can set only what it needs; CLI flags take
//! precedence over file values.

use serde::{Deserialize, Serialize};

/// Root configuration for the registration agent.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AgentConfig {
    /// HAProxy runtime API endpoint.
    pub haproxy: EndpointConfig,

    /// Backend whose slots this host registers into.
    pub backend: Option<String>,

    /// Daemon re-registration settings.
    pub daemon: DaemonConfig,

    /// Per-command timeout settings.
    pub timeouts: TimeoutConfig,

    /// IP discovery settings.
    pub discovery: DiscoveryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Runtime API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// HAProxy host to connect to.
    pub host: Option<String>,

    /// Runtime API TCP port.
    pub port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 1337,
        }
    }
}

/// Daemon loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Seconds between re-registration cycles.
    pub interval_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self { interval_secs: 10 }
    }
}

/// Timeouts applied to every runtime API command.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Full command/response timeout in seconds.
    pub response_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            response_secs: 10,
        }
    }
}

/// IP discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Fixed address to register, bypassing discovery.
    pub ip_override: Option<String>,

    /// Timeout for each instance-metadata request in milliseconds.
    pub metadata_timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ip_override: None,
            metadata_timeout_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = AgentConfig::default();
        assert_eq!(config.haproxy.port, 1337);
        assert_eq!(config.daemon.interval_secs, 10);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.timeouts.response_secs, 10);
        assert!(config.backend.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AgentConfig = toml::from_str(
            r#"
            backend = "web"

            [haproxy]
            host = "lb.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.as_deref(), Some("web"));
        assert_eq!(config.haproxy.host.as_deref(), Some("lb.internal"));
        assert_eq!(config.haproxy.port, 1337);
        assert_eq!(config.daemon.interval_secs, 10);
    }
}
