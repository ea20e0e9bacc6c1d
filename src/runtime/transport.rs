//! Connection-per-command transport for the runtime API.
//!
//! # Responsibilities
//! - Open a TCP connection to the runtime socket for each command
//! - Write the command line with a CRLF terminator and half-close the write side
//! - Read the full response until the peer closes the connection
//!
//! # Design Decisions
//! - No connection reuse: the protocol ends a response by closing the socket,
//!   so a second command on the same connection can never be answered.
//! - Connect and response timeouts bound every command; an unresponsive peer
//!   must not hang the daemon indefinitely.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::{Error, Result};

/// Default connect timeout for a single command.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default end-to-end timeout for writing a command and draining its response.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Address and timeout policy for one runtime API endpoint.
///
/// Holds no open connection; every [`RuntimeSocket::execute`] call performs a
/// full connect/write/read/close cycle.
#[derive(Debug, Clone)]
pub struct RuntimeSocket {
    host: String,
    port: u16,
    connect_timeout: Duration,
    response_timeout: Duration,
}

impl RuntimeSocket {
    /// Create a transport for `host:port` with default timeouts.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }

    /// Override the connect and response timeouts.
    pub fn with_timeouts(mut self, connect: Duration, response: Duration) -> Self {
        self.connect_timeout = connect;
        self.response_timeout = response;
        self
    }

    /// The `host:port` this transport talks to, for log lines.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Run one command: connect, send `command` + CRLF, half-close, read to EOF.
    ///
    /// Returns the full response text. Fails with [`Error::Connection`] if the
    /// connect fails or times out, and [`Error::Io`] on any read/write failure
    /// or if the response does not complete within the response timeout.
    pub async fn execute(&self, command: &str) -> Result<String> {
        let endpoint = self.endpoint();

        let stream = match timeout(self.connect_timeout, TcpStream::connect(&endpoint)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(Error::Connection {
                    endpoint,
                    source: e,
                })
            }
            Err(_) => {
                return Err(Error::Connection {
                    endpoint,
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("connect timed out after {:?}", self.connect_timeout),
                    ),
                })
            }
        };

        tracing::trace!(endpoint = %endpoint, command = %command, "Runtime command");

        match timeout(self.response_timeout, Self::round_trip(stream, command)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(Error::Io {
                endpoint,
                source: e,
            }),
            Err(_) => Err(Error::Io {
                endpoint,
                source: std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("response not complete after {:?}", self.response_timeout),
                ),
            }),
        }
    }

    /// Write the command line, shut down the write half, drain the response.
    async fn round_trip(mut stream: TcpStream, command: &str) -> std::io::Result<String> {
        stream.write_all(command.as_bytes()).await?;
        stream.write_all(b"\r\n").await?;
        // Half-close tells the peer the command is complete.
        stream.shutdown().await?;

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}
