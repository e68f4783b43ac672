//! Protocol Module
//!
//! Defines the textual request/response protocol spoken with the registry.
//!
//! ## Exchange
//! Strictly one request, then one response, on a single connection. Every
//! message is CRLF-delimited text ending with a line holding only `.`, so
//! the byte sequence `\r\n.\r\n` frames each message.
//!
//! ### Request
//! ```text
//! Add\r\n
//! EntityName:Domain\r\n
//! DomainName:example.com\r\n
//! NameServer:ns1.example.net\r\n
//! -Period:2\r\n
//! .\r\n
//! ```
//!
//! ### Response
//! ```text
//! 200 Command completed successfully\r\n
//! RegistrationExpirationDate:2030-01-01 00:00:00.0\r\n
//! .\r\n
//! ```
//!
//! ### Status Codes
//! - 2xx: success (200 completed, 210/211 domain available/taken, ...)
//! - 4xx: transient failure
//! - 5xx: permanent failure

mod command;
mod request;
mod response;
mod codec;

pub use command::{Command, EntityKind, Verb};
pub use request::RequestBuilder;
pub use response::{ParseState, Response, ResponseParser};
pub use codec::{
    decode_response, encode_command, encode_verb, find_terminator, CRLF, END_MARKER, TERMINATOR,
};
