//! Register/unregister orchestration over the runtime API.
//!
//! # Responsibilities
//! - Read current backend state before every decision
//! - Apply the selector's verdict and issue the mutating commands
//! - Keep command ordering safe for live traffic
//!
//! # Design Decisions
//! - Register sets the address before enabling the slot; unregister pulls the
//!   slot into maintenance before clearing the address. Either order keeps the
//!   window where traffic could reach a stale or empty address minimal.
//! - The two mutating commands are independent round-trips; the protocol has
//!   no transaction, so a failure between them leaves a half-claimed slot for
//!   the next cycle to repair.
//! - Two agents can race for the same free slot (read and claim are not
//!   atomic). The protocol offers no atomic claim, so the race is accepted;
//!   the losing agent sees the true state on its next read.

use crate::error::{Error, Result};
use crate::reconcile::selector;
use crate::runtime::{parse_backend_state, RuntimeSocket, ServerRecord};

/// Sentinel address meaning "slot has no server assigned".
pub const UNASSIGNED_ADDR: &str = "0.0.0.0";

/// Drives a backend's slots toward holding (or not holding) this host's IP.
#[derive(Debug, Clone)]
pub struct Reconciler {
    socket: RuntimeSocket,
}

impl Reconciler {
    /// Create a reconciler talking to the given runtime endpoint.
    pub fn new(socket: RuntimeSocket) -> Self {
        Self { socket }
    }

    /// Current state of `backend`, freshly read and filtered.
    async fn read_state(&self, backend: &str) -> Result<Vec<ServerRecord>> {
        let response = self
            .socket
            .execute(&format!("show servers state {backend}"))
            .await?;
        parse_backend_state(&response, backend)
    }

    /// Ensure `ip` is registered in `backend`. Idempotent.
    ///
    /// Claims the first free slot, sets its address, then marks it ready.
    /// Fails with [`Error::NoCapacity`] when no slot qualifies as free.
    pub async fn register(&self, backend: &str, ip: &str) -> Result<()> {
        let state = self.read_state(backend).await?;

        if selector::is_registered(&state, ip) {
            tracing::debug!(backend = %backend, ip = %ip, "Already registered");
            return Ok(());
        }

        let slot = selector::choose_free_slot(&state)
            .ok_or_else(|| Error::NoCapacity(backend.to_string()))?;
        let slot_name = slot.server_name.clone();

        tracing::info!(
            backend = %backend,
            slot = %slot_name,
            ip = %ip,
            "Claiming slot"
        );

        // Address first, traffic only once it is in place.
        self.socket
            .execute(&format!("set server {backend}/{slot_name} addr {ip}"))
            .await?;
        self.socket
            .execute(&format!("set server {backend}/{slot_name} state ready"))
            .await?;

        Ok(())
    }

    /// Ensure `ip` is no longer registered in `backend`. Idempotent.
    ///
    /// Pulls the owned slot into maintenance, then clears its address. Fails
    /// with [`Error::SlotNotFound`] when the address is present but only on
    /// maintenance-marked slots — an inconsistency left for the operator.
    pub async fn unregister(&self, backend: &str, ip: &str) -> Result<()> {
        let state = self.read_state(backend).await?;

        if !selector::is_registered(&state, ip) {
            tracing::debug!(backend = %backend, ip = %ip, "Not registered");
            return Ok(());
        }

        let slot = selector::choose_owned_slot(&state, ip).ok_or_else(|| Error::SlotNotFound {
            backend: backend.to_string(),
            ip: ip.to_string(),
        })?;
        let slot_name = slot.server_name.clone();

        tracing::info!(
            backend = %backend,
            slot = %slot_name,
            ip = %ip,
            "Releasing slot"
        );

        // Out of rotation before the address goes away.
        self.socket
            .execute(&format!("set server {backend}/{slot_name} state maint"))
            .await?;
        self.socket
            .execute(&format!(
                "set server {backend}/{slot_name} addr {UNASSIGNED_ADDR}"
            ))
            .await?;

        Ok(())
    }
}
