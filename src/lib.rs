//! # rrp-client
//!
//! A client for the Registry Registrar Protocol (RRP), the line-oriented
//! text protocol used to register and manage domains and name servers:
//! - Typed commands encoded to CRLF-delimited requests
//! - Reply parsing into code, description and multi-valued attributes
//! - One persistent TCP connection with per-call deadlines
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                               │
//! │          (one command at a time, last-error slot)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Transport  │
//!   │ encode/parse│          │ TCP+deadline│
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ Attributes  │
//!   │ List / Map  │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod attributes;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, Result, RrpError};
pub use config::ClientConfig;
pub use attributes::{AttributeMap, Changes, List};
pub use protocol::{Command, Response};
pub use network::Session;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rrp-client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
