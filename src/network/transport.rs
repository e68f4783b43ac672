//! TCP transport
//!
//! Owns the single registry connection and performs deadline-bounded,
//! terminator-framed I/O on it.

use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::{Bytes, BytesMut};

use crate::error::{Result, RrpError};
use crate::protocol::{find_terminator, TERMINATOR};
use super::deadline::Deadline;

/// Bytes requested from the socket per read
const READ_CHUNK: usize = 4096;

/// One registry connection
///
/// ## Timeouts
/// `set_timeout` bounds each subsequent connect, send and receive call
/// individually (not a whole exchange). The bound is applied to the socket
/// itself, so a blocked call returns `Timeout` once it elapses.
#[derive(Debug, Default)]
pub struct Transport {
    /// Open stream, `None` while not connected
    stream: Option<TcpStream>,

    /// Received bytes not yet handed out
    pending: BytesMut,

    /// Per-call bound, `None` when disabled
    timeout: Option<Duration>,
}

impl Transport {
    /// Create an unconnected transport with deadlines disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-call timeout in seconds; 0 disables deadlines
    pub fn set_timeout(&mut self, seconds: u64) {
        self.timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.as_ref()?.peer_addr().ok()
    }

    /// Connect to `host:port` and consume the server greeting
    ///
    /// An already open connection is closed first.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        let addr = resolve_ipv4(host, port)?;

        if self.stream.is_some() {
            tracing::warn!("Replacing open connection to {:?}", self.peer_addr());
            let _ = self.close();
        }

        tracing::debug!("Connecting to {}", addr);

        let deadline = Deadline::after(self.timeout);
        let connected = match self.timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        };
        let stream = connected.map_err(|source| {
            if deadline.is_timeout(&source) {
                tracing::debug!("Connect to {} timed out", addr);
                RrpError::Timeout
            } else {
                RrpError::Connect { addr, source }
            }
        })?;

        stream.set_nodelay(true)?;
        self.stream = Some(stream);
        self.pending.clear();

        match self.receive_until_terminator() {
            Ok(greeting) => {
                tracing::debug!("Connected to {}, greeting of {} bytes", addr, greeting.len());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("No greeting from {}: {}", addr, e);
                self.stream = None;
                Err(e)
            }
        }
    }

    /// Write all of `request`
    ///
    /// A failed or timed out write drops the connection.
    pub fn send(&mut self, request: &[u8]) -> Result<()> {
        let result = self.write_request(request);
        self.drop_on_failure(result)
    }

    fn write_request(&mut self, request: &[u8]) -> Result<()> {
        let deadline = Deadline::after(self.timeout);
        let stream = self.stream.as_mut().ok_or(RrpError::NotConnected)?;

        let mut written = 0;
        while written < request.len() {
            stream.set_write_timeout(deadline.remaining()?)?;
            match stream.write(&request[written..]) {
                Ok(0) => {
                    return Err(RrpError::Io(io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("short write: {} of {} bytes", written, request.len()),
                    )))
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(deadline.classify(e)),
            }
        }

        stream.flush().map_err(|e| deadline.classify(e))?;
        tracing::trace!("Sent {} bytes", written);
        Ok(())
    }

    /// Read until `\r\n.\r\n` and return the message, terminator included
    ///
    /// Bytes that arrive after the terminator are kept for the next call.
    /// A failed or timed out read drops the connection, so a late reply
    /// can never be taken as the answer to a later request.
    pub fn receive_until_terminator(&mut self) -> Result<Bytes> {
        let result = self.read_message();
        self.drop_on_failure(result)
    }

    fn read_message(&mut self) -> Result<Bytes> {
        let deadline = Deadline::after(self.timeout);
        let stream = self.stream.as_mut().ok_or(RrpError::NotConnected)?;

        let mut chunk = [0u8; READ_CHUNK];
        let mut scanned = 0;

        loop {
            if let Some(len) = find_terminator(&self.pending[scanned..]) {
                let message = self.pending.split_to(scanned + len).freeze();
                tracing::trace!("Received {} bytes", message.len());
                return Ok(message);
            }
            // The terminator may straddle two reads
            scanned = self.pending.len().saturating_sub(TERMINATOR.len() - 1);

            stream.set_read_timeout(deadline.remaining()?)?;
            match stream.read(&mut chunk) {
                Ok(0) => {
                    return Err(RrpError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed before response terminator",
                    )))
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let err = deadline.classify(e);
                    if matches!(err, RrpError::Timeout) {
                        tracing::debug!("Receive timed out after {:?}", self.timeout);
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Tear the connection down after a timeout or I/O failure
    fn drop_on_failure<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e @ (RrpError::Timeout | RrpError::Io(_))) = &result {
            if let Some(stream) = self.stream.take() {
                tracing::debug!("Dropping connection after failure: {}", e);
                let _ = stream.shutdown(Shutdown::Both);
            }
            self.pending.clear();
        }
        result
    }

    /// Shut down and release the socket
    pub fn close(&mut self) -> Result<()> {
        let stream = self.stream.take().ok_or(RrpError::NotConnected)?;
        self.pending.clear();

        if let Err(e) = stream.shutdown(Shutdown::Both) {
            // Peer may already be gone; the socket is released either way
            tracing::debug!("Shutdown: {}", e);
        }
        tracing::debug!("Connection closed");
        Ok(())
    }
}

/// Dotted IPv4 literal first, then DNS (first IPv4 address)
fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddr> {
    if host.is_empty() {
        return Err(RrpError::BadParameter("empty host".to_string()));
    }

    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(SocketAddr::from((ip, port)));
    }

    (host, port)
        .to_socket_addrs()
        .map_err(|e| RrpError::InvalidHostName(format!("{}: {}", host, e)))?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| RrpError::InvalidHostName(host.to_string()))
}
