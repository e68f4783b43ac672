//! Command definitions
//!
//! Protocol verbs, entity kinds, and the typed command intents a client
//! can issue.

use std::fmt;

use crate::attributes::{Changes, List};

/// Protocol verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Add,
    Check,
    Del,
    Describe,
    Mod,
    Quit,
    Renew,
    Session,
    Status,
    Transfer,
}

impl Verb {
    /// The verb line as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Add => "Add",
            Verb::Check => "Check",
            Verb::Del => "Del",
            Verb::Describe => "Describe",
            Verb::Mod => "Mod",
            Verb::Quit => "Quit",
            Verb::Renew => "Renew",
            Verb::Session => "Session",
            Verb::Status => "Status",
            Verb::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Domain,
    NameServer,
}

impl EntityKind {
    /// Value of the `EntityName:` line
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Domain => "Domain",
            EntityKind::NameServer => "NameServer",
        }
    }

    /// Attribute key that carries the object's identifier
    pub fn primary_key(self) -> &'static str {
        match self {
            EntityKind::Domain => "DomainName",
            EntityKind::NameServer => "NameServer",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed request
///
/// Integer options (`period`, `current_expiration_year`) are only sent when
/// strictly positive; zero or negative lets the registry apply its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Authenticate the registrar, optionally changing its password
    StartSession {
        registrar_id: String,
        password: String,
        new_password: Option<String>,
    },

    /// Close the protocol session
    EndSession,

    /// Register a domain
    AddDomain {
        domain: String,
        name_servers: List,
        period: i32,
    },

    /// Register a name server
    AddNameServer {
        name_server: String,
        ip_addresses: List,
    },

    /// Availability check
    Check { entity: EntityKind, name: String },

    /// Delete a registration
    Delete { entity: EntityKind, name: String },

    /// Server information (protocol version by default)
    Describe { target: Option<String> },

    /// Update a domain's name servers and statuses
    ModifyDomain {
        domain: String,
        name_servers: Changes,
        statuses: Changes,
    },

    /// Rename a name server and/or update its addresses
    ModifyNameServer {
        name_server: String,
        new_name: Option<String>,
        ip_addresses: Changes,
    },

    /// Extend a domain registration
    RenewDomain {
        domain: String,
        period: i32,
        current_expiration_year: i32,
    },

    /// Registration details
    Status { entity: EntityKind, name: String },

    /// Request, approve or reject a registrar transfer
    TransferDomain {
        domain: String,
        approve: Option<bool>,
    },
}

impl Command {
    /// The verb this command is sent with
    pub fn verb(&self) -> Verb {
        match self {
            Command::StartSession { .. } => Verb::Session,
            Command::EndSession => Verb::Quit,
            Command::AddDomain { .. } | Command::AddNameServer { .. } => Verb::Add,
            Command::Check { .. } => Verb::Check,
            Command::Delete { .. } => Verb::Del,
            Command::Describe { .. } => Verb::Describe,
            Command::ModifyDomain { .. } | Command::ModifyNameServer { .. } => Verb::Mod,
            Command::RenewDomain { .. } => Verb::Renew,
            Command::Status { .. } => Verb::Status,
            Command::TransferDomain { .. } => Verb::Transfer,
        }
    }

    /// Whether the encoded request carries a secret
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Command::StartSession { .. })
    }
}
