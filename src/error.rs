//! Error types for the RRP client
//!
//! Provides a unified error type for all operations, the numeric error
//! taxonomy with its fixed description table, and the per-session
//! "last error" slot.

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type alias using RrpError
pub type Result<T> = std::result::Result<T, RrpError>;

/// Unified error type for RRP client operations
#[derive(Debug, Error)]
pub enum RrpError {
    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid function parameter value: {0}")]
    BadParameter(String),

    #[error("No such property: {0}")]
    NoSuchProperty(String),

    #[error("Index {index} is out of bounds for list of length {len}")]
    InvalidIndex { index: usize, len: usize },

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Cannot resolve host name to IP address: {0}")]
    InvalidHostName(String),

    #[error("Cannot establish connection to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("No socket connection exists")]
    NotConnected,

    #[error("Socket operation timeout")]
    Timeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Invalid RRP response format: {0}")]
    ResponseFormat(String),

    #[error("Unknown internal error: {0}")]
    Unknown(String),
}

impl RrpError {
    /// The taxonomy entry this error is reported under
    pub fn kind(&self) -> ErrorKind {
        match self {
            RrpError::BadParameter(_) => ErrorKind::BadParameter,
            RrpError::NoSuchProperty(_) => ErrorKind::NoSuchProperty,
            RrpError::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            RrpError::InvalidHostName(_) => ErrorKind::InvalidHostName,
            RrpError::Connect { .. } => ErrorKind::Connect,
            RrpError::NotConnected => ErrorKind::NotConnected,
            RrpError::Timeout => ErrorKind::Timeout,
            RrpError::Io(_) => ErrorKind::Io,
            RrpError::ResponseFormat(_) => ErrorKind::ResponseFormat,
            RrpError::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

// =============================================================================
// Error Taxonomy
// =============================================================================

/// Error codes, numbered as the registry client libraries number them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ErrorKind {
    #[default]
    NoError = 0,
    Io = 1,
    BadParameter = 2,
    /// Kept for code compatibility; allocation failure aborts in Rust
    MemoryAllocation = 3,
    NoSuchProperty = 4,
    InvalidIndex = 5,
    InvalidHostName = 6,
    Connect = 7,
    NotConnected = 8,
    ResponseFormat = 9,
    Unknown = 10,
    Timeout = 11,
}

/// Descriptions indexed by `ErrorKind as u8`
const DESCRIPTIONS: [&str; 12] = [
    "No error has been set",
    "Input/output error",
    "Invalid function parameter value",
    "Error allocating memory",
    "No such property in RRPProperties",
    "Vector index is out of bounds",
    "Cannot resolve host name to IP address",
    "Cannot establish connection to host",
    "No socket connection exists",
    "Invalid RRP response format",
    "Unknown internal error",
    "Socket operation timeout",
];

const KINDS: [ErrorKind; 12] = [
    ErrorKind::NoError,
    ErrorKind::Io,
    ErrorKind::BadParameter,
    ErrorKind::MemoryAllocation,
    ErrorKind::NoSuchProperty,
    ErrorKind::InvalidIndex,
    ErrorKind::InvalidHostName,
    ErrorKind::Connect,
    ErrorKind::NotConnected,
    ErrorKind::ResponseFormat,
    ErrorKind::Unknown,
    ErrorKind::Timeout,
];

impl ErrorKind {
    /// Numeric code of this kind
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a kind by numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        KINDS.get(code as usize).copied()
    }

    /// Fixed description of this kind
    pub fn description(self) -> &'static str {
        DESCRIPTIONS[self as usize]
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Description for a raw numeric code; `None` when the code is out of range
pub fn describe_code(code: u8) -> Option<&'static str> {
    DESCRIPTIONS.get(code as usize).copied()
}

// =============================================================================
// Last-Error Slot
// =============================================================================

/// The most recent failure observed by a session
///
/// Overwritten on every failing operation, never accumulated. Reading it
/// does not reset it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorState {
    last: ErrorKind,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot
    pub fn set(&mut self, kind: ErrorKind) {
        self.last = kind;
    }

    /// Record the outcome of an operation, passing it through unchanged
    pub fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            self.last = e.kind();
        }
        result
    }

    pub fn last(&self) -> ErrorKind {
        self.last
    }

    pub fn description(&self) -> Option<&'static str> {
        describe_code(self.last.code())
    }
}
