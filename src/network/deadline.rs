//! Per-call deadlines
//!
//! A deadline is fixed when a blocking operation starts and re-armed on the
//! socket, with whatever time is left, before every syscall of that
//! operation.

use std::io;
use std::time::{Duration, Instant};

use crate::error::{Result, RrpError};

/// Point in time after which a blocking operation must give up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// Deadline `timeout` from now, or none when `timeout` is `None`
    pub fn after(timeout: Option<Duration>) -> Self {
        Self {
            expires_at: timeout.map(|t| Instant::now() + t),
        }
    }

    /// No deadline at all
    pub fn never() -> Self {
        Self { expires_at: None }
    }

    pub fn is_bounded(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Time left, suitable for `set_read_timeout` / `set_write_timeout`
    ///
    /// `Ok(None)` means unbounded; an expired deadline is `Err(Timeout)`.
    pub fn remaining(&self) -> Result<Option<Duration>> {
        match self.expires_at {
            None => Ok(None),
            Some(at) => {
                let now = Instant::now();
                if now >= at {
                    Err(RrpError::Timeout)
                } else {
                    Ok(Some(at - now))
                }
            }
        }
    }

    /// Whether `err` is the socket reporting this deadline
    pub fn is_timeout(&self, err: &io::Error) -> bool {
        self.is_bounded()
            && matches!(
                err.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            )
    }

    /// Map a failed socket call to `Timeout` or `Io`
    pub fn classify(&self, err: io::Error) -> RrpError {
        if self.is_timeout(&err) {
            RrpError::Timeout
        } else {
            RrpError::Io(err)
        }
    }
}
