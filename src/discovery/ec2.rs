//! EC2 detection and instance metadata lookup.

use std::time::Duration;

/// Instance metadata service base URL (link-local, unauthenticated).
const METADATA_BASE: &str = "http://169.254.169.254/latest/meta-data";

/// Files whose UUID starts with "ec2" on EC2 instances.
const UUID_PATHS: &[&str] = &[
    "/sys/hypervisor/uuid",
    "/sys/devices/virtual/dmi/id/product_uuid",
];

/// Best-effort check for running on an EC2 instance.
///
/// Reads the hypervisor/DMI UUID; EC2 instances carry one starting with
/// `ec2`. Any read failure means "not EC2".
pub fn is_ec2() -> bool {
    UUID_PATHS.iter().any(|path| {
        std::fs::read_to_string(path)
            .map(|uuid| uuid.to_ascii_lowercase().starts_with("ec2"))
            .unwrap_or(false)
    })
}

/// Fetch the instance's address from metadata: public IPv4, then local IPv4.
///
/// Returns `None` when the metadata service is unreachable or reports
/// neither key within `timeout` per request.
pub async fn metadata_ip(timeout: Duration) -> Option<String> {
    let client = reqwest::Client::builder().timeout(timeout).build().ok()?;

    for key in ["public-ipv4", "local-ipv4"] {
        match client.get(format!("{METADATA_BASE}/{key}")).send().await {
            Ok(response) if response.status().is_success() => {
                if let Ok(body) = response.text().await {
                    let ip = body.trim();
                    if !ip.is_empty() {
                        return Some(ip.to_string());
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(key = %key, status = %response.status(), "Metadata key unavailable");
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Metadata request failed");
                // Service unreachable; the second key will not fare better.
                return None;
            }
        }
    }
    None
}
