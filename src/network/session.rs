//! Registry session
//!
//! One connection plus the command façade: each method encodes a typed
//! command, performs the send → receive exchange, and parses the reply.

use std::borrow::Cow;

use crate::attributes::{Changes, List};
use crate::config::ClientConfig;
use crate::error::{ErrorKind, ErrorState, Result, RrpError};
use crate::protocol::{decode_response, encode_command, Command, EntityKind, Response};
use super::transport::Transport;

/// A client session with a registry server
///
/// Requests are strictly sequential: every method completes its full
/// send/receive cycle before returning. The last failure is kept in the
/// session's own error slot.
#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    transport: Transport,
    errors: ErrorState,
}

impl Session {
    /// Create an unconnected session
    pub fn new(config: ClientConfig) -> Self {
        let mut transport = Transport::new();
        transport.set_timeout(config.timeout_secs);
        Self {
            config,
            transport,
            errors: ErrorState::new(),
        }
    }

    /// Create a session and connect it
    pub fn open(config: ClientConfig) -> Result<Self> {
        let mut session = Self::new(config);
        session.connect()?;
        Ok(session)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Connect to the configured host and consume the greeting
    pub fn connect(&mut self) -> Result<()> {
        let result = self.transport.connect(&self.config.host, self.config.port);
        self.errors.record(result)
    }

    /// Per-call timeout in seconds for subsequent operations; 0 disables
    pub fn set_timeout(&mut self, seconds: u64) {
        self.config.timeout_secs = seconds;
        self.transport.set_timeout(seconds);
    }

    /// Release the connection
    pub fn close(&mut self) -> Result<()> {
        let result = self.transport.close();
        self.errors.record(result)
    }

    /// Most recent failure of this session
    pub fn last_error(&self) -> ErrorKind {
        self.errors.last()
    }

    pub fn last_error_description(&self) -> Option<&'static str> {
        self.errors.description()
    }

    // =========================================================================
    // Exchange
    // =========================================================================

    /// Send raw request text and parse the reply
    pub fn send_and_receive(&mut self, request: &str) -> Result<Response> {
        let result = self.exchange(request, true);
        self.errors.record(result)
    }

    /// Encode and send a typed command, then parse the reply
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        let sensitive = command.is_sensitive();
        let result = encode_command(command).and_then(|request| self.exchange(&request, sensitive));
        if let Ok(ref response) = result {
            tracing::debug!("{} -> {} {}", command.verb(), response.code, response.description);
        }
        self.errors.record(result)
    }

    /// `sensitive` requests are masked before they reach the log
    fn exchange(&mut self, request: &str, sensitive: bool) -> Result<Response> {
        tracing::trace!("Request:\n{}", loggable(request, sensitive));
        self.transport.send(request.as_bytes())?;
        let reply = self.transport.receive_until_terminator()?;
        decode_response(&reply)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Authenticate with the configured registrar credentials
    pub fn login(&mut self) -> Result<Response> {
        let (id, password) = match self.config.credentials() {
            Some((id, password)) => (id.to_string(), password.to_string()),
            None => {
                let missing = RrpError::BadParameter("no registrar credentials configured".to_string());
                return self.errors.record(Err(missing));
            }
        };
        self.start_session(&id, &password, None)
    }

    pub fn start_session(
        &mut self,
        registrar_id: &str,
        password: &str,
        new_password: Option<&str>,
    ) -> Result<Response> {
        self.execute(&Command::StartSession {
            registrar_id: registrar_id.to_string(),
            password: password.to_string(),
            new_password: new_password.map(str::to_string),
        })
    }

    pub fn end_session(&mut self) -> Result<Response> {
        self.execute(&Command::EndSession)
    }

    pub fn add_domain(&mut self, domain: &str, name_servers: &List, period: i32) -> Result<Response> {
        self.execute(&Command::AddDomain {
            domain: domain.to_string(),
            name_servers: name_servers.clone(),
            period,
        })
    }

    pub fn add_name_server(&mut self, name_server: &str, ip_addresses: &List) -> Result<Response> {
        self.execute(&Command::AddNameServer {
            name_server: name_server.to_string(),
            ip_addresses: ip_addresses.clone(),
        })
    }

    pub fn check_domain(&mut self, domain: &str) -> Result<Response> {
        self.execute(&Command::Check {
            entity: EntityKind::Domain,
            name: domain.to_string(),
        })
    }

    pub fn check_name_server(&mut self, name_server: &str) -> Result<Response> {
        self.execute(&Command::Check {
            entity: EntityKind::NameServer,
            name: name_server.to_string(),
        })
    }

    pub fn delete_domain(&mut self, domain: &str) -> Result<Response> {
        self.execute(&Command::Delete {
            entity: EntityKind::Domain,
            name: domain.to_string(),
        })
    }

    pub fn delete_name_server(&mut self, name_server: &str) -> Result<Response> {
        self.execute(&Command::Delete {
            entity: EntityKind::NameServer,
            name: name_server.to_string(),
        })
    }

    pub fn status_domain(&mut self, domain: &str) -> Result<Response> {
        self.execute(&Command::Status {
            entity: EntityKind::Domain,
            name: domain.to_string(),
        })
    }

    pub fn status_name_server(&mut self, name_server: &str) -> Result<Response> {
        self.execute(&Command::Status {
            entity: EntityKind::NameServer,
            name: name_server.to_string(),
        })
    }

    pub fn describe(&mut self, target: Option<&str>) -> Result<Response> {
        self.execute(&Command::Describe {
            target: target.map(str::to_string),
        })
    }

    pub fn modify_domain(
        &mut self,
        domain: &str,
        name_servers: &Changes,
        statuses: &Changes,
    ) -> Result<Response> {
        self.execute(&Command::ModifyDomain {
            domain: domain.to_string(),
            name_servers: name_servers.clone(),
            statuses: statuses.clone(),
        })
    }

    pub fn modify_name_server(
        &mut self,
        name_server: &str,
        new_name: Option<&str>,
        ip_addresses: &Changes,
    ) -> Result<Response> {
        self.execute(&Command::ModifyNameServer {
            name_server: name_server.to_string(),
            new_name: new_name.map(str::to_string),
            ip_addresses: ip_addresses.clone(),
        })
    }

    pub fn renew_domain(
        &mut self,
        domain: &str,
        period: i32,
        current_expiration_year: i32,
    ) -> Result<Response> {
        self.execute(&Command::RenewDomain {
            domain: domain.to_string(),
            period,
            current_expiration_year,
        })
    }

    pub fn transfer_domain(&mut self, domain: &str, approve: Option<bool>) -> Result<Response> {
        self.execute(&Command::TransferDomain {
            domain: domain.to_string(),
            approve,
        })
    }
}

fn loggable(request: &str, sensitive: bool) -> Cow<'_, str> {
    if sensitive {
        redact(request)
    } else {
        Cow::Borrowed(request)
    }
}

/// Request text safe for logs
fn redact(request: &str) -> Cow<'_, str> {
    if !request.contains("Password:") {
        return Cow::Borrowed(request);
    }
    let masked: Vec<String> = request
        .split("\r\n")
        .map(|line| match line.split_once(':') {
            Some((key, _)) if key.ends_with("Password") => format!("{}:***", key),
            _ => line.to_string(),
        })
        .collect();
    Cow::Owned(masked.join("\r\n"))
}
