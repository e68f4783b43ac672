//! Protocol codec
//!
//! Encoding of typed commands and decoding of raw replies.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <Verb>\r\n
//! [EntityName:<Kind>\r\n<PrimaryKey>:<id>\r\n]
//! {<Key>:<value>\r\n | <Key>:<old>=<new>\r\n | <Key>:<value>=\r\n}
//! {-<Option>:<value>\r\n}
//! .\r\n
//! ```
//!
//! ### Response
//! ```text
//! <code> <description>\r\n
//! {<Key>:<Value>\r\n}
//! .\r\n
//! ```

use crate::error::{Result, RrpError};
use super::command::{Command, EntityKind, Verb};
use super::request::RequestBuilder;
use super::response::Response;

/// Line delimiter
pub const CRLF: &str = "\r\n";

/// Line that closes every request and response
pub const END_MARKER: &str = ".";

/// Byte sequence ending every message
pub const TERMINATOR: &[u8] = b"\r\n.\r\n";

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to its request text
pub fn encode_command(command: &Command) -> Result<String> {
    let builder = RequestBuilder::new(command.verb());

    let builder = match command {
        Command::StartSession {
            registrar_id,
            password,
            new_password,
        } => {
            if registrar_id.is_empty() {
                return Err(RrpError::BadParameter("missing registrar id".to_string()));
            }
            let builder = builder.option("Id", registrar_id).option("Password", password);
            match new_password.as_deref() {
                Some(new) if !new.is_empty() => builder.option("NewPassword", new),
                _ => builder,
            }
        }
        Command::EndSession => builder,
        Command::AddDomain {
            domain,
            name_servers,
            period,
        } => builder
            .entity(EntityKind::Domain, domain)
            .additions("NameServer", name_servers)
            .int_option("Period", *period),
        Command::AddNameServer {
            name_server,
            ip_addresses,
        } => builder
            .entity(EntityKind::NameServer, name_server)
            .additions("IPAddress", ip_addresses),
        Command::Check { entity, name }
        | Command::Delete { entity, name }
        | Command::Status { entity, name } => builder.entity(*entity, name),
        Command::Describe { target } => match target {
            Some(target) => builder.option("Target", target),
            None => builder,
        },
        Command::ModifyDomain {
            domain,
            name_servers,
            statuses,
        } => builder
            .entity(EntityKind::Domain, domain)
            .changes("NameServer", name_servers)
            .changes("Status", statuses),
        Command::ModifyNameServer {
            name_server,
            new_name,
            ip_addresses,
        } => {
            let builder = builder.entity(EntityKind::NameServer, name_server);
            let builder = match new_name {
                Some(new_name) => builder.attribute("NewNameServer", new_name),
                None => builder,
            };
            builder.changes("IPAddress", ip_addresses)
        }
        Command::RenewDomain {
            domain,
            period,
            current_expiration_year,
        } => builder
            .entity(EntityKind::Domain, domain)
            .int_option("Period", *period)
            .int_option("CurrentExpirationYear", *current_expiration_year),
        Command::TransferDomain { domain, approve } => {
            let builder = builder.entity(EntityKind::Domain, domain);
            match approve {
                Some(true) => builder.option("Approve", "Yes"),
                Some(false) => builder.option("Approve", "No"),
                None => builder,
            }
        }
    };

    builder.build()
}

/// Request text for a bare verb with no fields
pub fn encode_verb(verb: Verb) -> Result<String> {
    RequestBuilder::new(verb).build()
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a raw reply, terminator included
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| RrpError::ResponseFormat(format!("reply is not UTF-8: {}", e)))?;
    Response::parse(text)
}

/// Length of the message at the start of `buf`, terminator included
pub fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(TERMINATOR.len())
        .position(|w| w == TERMINATOR)
        .map(|start| start + TERMINATOR.len())
}
