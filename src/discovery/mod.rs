//! Host IP discovery.
//!
//! # Data Flow
//! ```text
//! current_ip()
//!     → explicit override from config/CLI, if given
//!     → ec2.rs (DMI/hypervisor UUID probe → instance metadata lookup)
//!     → local.rs (routable local interface address)
//! ```
//!
//! # Design Decisions
//! - On EC2 the public address is preferred over the VPC-local one, so the
//!   load balancer gets the address other machines can actually reach.
//! - Discovery failures are fatal for the calling operation; registering an
//!   unknown or wrong address is worse than not registering.

pub mod ec2;
pub mod local;

use std::net::IpAddr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Discover the address this host should register.
///
/// An explicit `override_ip` wins unconditionally (after a syntax check). On
/// EC2, instance metadata is consulted; elsewhere the local routable
/// interface address is used.
pub async fn current_ip(override_ip: Option<&str>, metadata_timeout: Duration) -> Result<String> {
    if let Some(ip) = override_ip {
        ip.parse::<IpAddr>()
            .map_err(|_| Error::IpDiscovery(format!("'{ip}' is not a valid IP address")))?;
        return Ok(ip.to_string());
    }

    if ec2::is_ec2() {
        if let Some(ip) = ec2::metadata_ip(metadata_timeout).await {
            tracing::debug!(ip = %ip, "Using EC2 instance metadata address");
            return Ok(ip);
        }
        tracing::warn!("EC2 detected but instance metadata unreachable, trying local interface");
    }

    let ip = local::local_ip()
        .map_err(|e| Error::IpDiscovery(format!("local interface lookup failed: {e}")))?;
    tracing::debug!(ip = %ip, "Using local interface address");
    Ok(ip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn override_wins() {
        let ip = current_ip(Some("192.0.2.7"), Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(ip, "192.0.2.7");
    }

    #[tokio::test]
    async fn invalid_override_is_rejected() {
        let err = current_ip(Some("not-an-ip"), Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IpDiscovery(_)));
    }
}
