//! Network Module
//!
//! TCP transport and the registry session built on it.
//!
//! ## Architecture
//! - `Transport`: one blocking TCP connection, terminator-framed reads
//! - `Deadline`: per-call bound re-armed on the socket before each syscall
//! - `Session`: encode → send → receive → parse, one command at a time

mod deadline;
mod transport;
mod session;

pub use deadline::Deadline;
pub use transport::Transport;
pub use session::Session;
