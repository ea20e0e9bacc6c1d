//! Pure slot selection rules.
//!
//! # Responsibilities
//! - Decide whether an address is already registered in a backend
//! - Pick the slot a registration should claim
//! - Pick the slot an unregistration should release
//!
//! # Design Decisions
//! - First match in the order the load balancer returned the rows wins; there
//!   is no secondary sort. Which physical slot a host lands on depends on this
//!   ordering, so it must stay stable.

use crate::runtime::ServerRecord;

/// Seconds a slot's server must have been down before the slot counts as
/// abandoned and reclaimable.
pub const DOWN_GRACE_SECS: u64 = 300;

/// Admin-state bit marking a slot as in maintenance.
pub const ADMIN_MAINT_BIT: u32 = 0x01;

/// True if any record currently holds `addr`.
pub fn is_registered(state: &[ServerRecord], addr: &str) -> bool {
    state.iter().any(|r| r.address == addr)
}

/// The first slot free for claiming, if any.
///
/// A slot is free when its server has been down longer than
/// [`DOWN_GRACE_SECS`], or when it is administratively in maintenance.
pub fn choose_free_slot(state: &[ServerRecord]) -> Option<&ServerRecord> {
    state.iter().find(|r| {
        (r.operational_state == 0 && r.seconds_since_change > DOWN_GRACE_SECS)
            || r.admin_state & ADMIN_MAINT_BIT != 0
    })
}

/// The slot this host actively owns: holding `addr` with maintenance clear.
///
/// A maintenance-marked slot holding our address was taken out of rotation by
/// someone else and is deliberately not treated as ours.
pub fn choose_owned_slot<'a>(state: &'a [ServerRecord], addr: &str) -> Option<&'a ServerRecord> {
    state
        .iter()
        .find(|r| r.address == addr && r.admin_state & ADMIN_MAINT_BIT == 0)
}
