//! Connection Handler
//!
//! Handles one request/response exchange with the hook.

use std::io::ErrorKind;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::BytesMut;

use crate::config::ClientConfig;
use crate::error::{HookError, Result};
use crate::protocol::{read_until_close, write_query};

/// A single-use connection to the hook
///
/// Opened for one query, drained to end-of-stream, then shut down. Never
/// reused: the response has no length prefix, so the peer closing its end is
/// the only way to know the response is complete.
pub struct Connection {
    /// TCP stream to the hook
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a connection to the configured hook
    ///
    /// Tries each resolved address in turn and configures timeouts on the
    /// first one that connects.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let addr = config.addr();
        let candidates: Vec<SocketAddr> = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| HookError::connection(&addr, e))?
            .collect();

        let mut last_err = None;
        for candidate in candidates {
            match Self::connect_one(candidate, config.connect_timeout_ms) {
                Ok(stream) => {
                    let mut connection = Self {
                        stream,
                        peer_addr: candidate.to_string(),
                    };
                    connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;
                    tracing::debug!("Connected to hook at {}", connection.peer_addr);
                    return Ok(connection);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", candidate, e);
                    last_err = Some(e);
                }
            }
        }

        let source = last_err.unwrap_or_else(|| {
            std::io::Error::new(ErrorKind::NotFound, "address resolved to nothing")
        });
        Err(HookError::connection(addr, source))
    }

    fn connect_one(addr: SocketAddr, timeout_ms: u64) -> std::io::Result<TcpStream> {
        let stream = if timeout_ms > 0 {
            TcpStream::connect_timeout(&addr, Duration::from_millis(timeout_ms))?
        } else {
            TcpStream::connect(addr)?
        };
        // Disable Nagle's algorithm so the query leaves in one segment
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    /// Configure connection timeouts (0 leaves the operation blocking)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.stream
            .set_read_timeout(read)
            .map_err(|e| HookError::connection(&self.peer_addr, e))?;
        self.stream
            .set_write_timeout(write)
            .map_err(|e| HookError::connection(&self.peer_addr, e))?;

        Ok(())
    }

    /// Send one query and return every byte the hook writes before closing
    ///
    /// Consumes the connection; both directions are shut down afterwards.
    pub fn exchange(mut self, query: &str) -> Result<BytesMut> {
        tracing::trace!("Sending query to {}: {}", self.peer_addr, query);

        write_query(&mut self.stream, query).map_err(|e| {
            tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
            HookError::connection(&self.peer_addr, e)
        })?;

        let response = match read_until_close(&mut self.stream) {
            Ok(buffer) => buffer,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                // WouldBlock on Unix, TimedOut on Windows
                tracing::warn!("Read timeout waiting for {} to close", self.peer_addr);
                return Err(HookError::connection(&self.peer_addr, e));
            }
            Err(e) => {
                tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                return Err(HookError::connection(&self.peer_addr, e));
            }
        };

        tracing::trace!(
            "Received {} bytes from {}: {:?}",
            response.len(),
            self.peer_addr,
            String::from_utf8_lossy(&response)
        );

        self.close();
        Ok(response)
    }

    /// Shut down both directions
    fn close(&self) {
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => {}
            // The hook usually got there first
            Err(e) if e.kind() == ErrorKind::NotConnected => {}
            Err(e) => tracing::debug!("Shutdown of {} failed: {}", self.peer_addr, e),
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
