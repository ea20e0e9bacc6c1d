//! Local interface address lookup.

use std::net::{IpAddr, UdpSocket};

/// The address the host would use to reach the public internet.
///
/// Connecting a UDP socket sends no packets; it only asks the kernel which
/// source address the routing table would pick for the given destination.
pub fn local_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:80")?;
    Ok(socket.local_addr()?.ip())
}
