//! Configuration for the RRP client
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for an RRP client session
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Registry host: dotted IPv4 address or DNS name
    pub host: String,

    /// Registry TCP port
    pub port: u16,

    /// Per-operation timeout in seconds (0 disables deadlines)
    pub timeout_secs: u64,

    // -------------------------------------------------------------------------
    // Registrar Credentials
    // -------------------------------------------------------------------------
    /// Registrar id used by the `Session` command
    pub registrar_id: Option<String>,

    /// Registrar password used by the `Session` command
    pub password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 648,
            timeout_secs: 0,
            registrar_id: None,
            password: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Registrar id and password, when both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.registrar_id, &self.password) {
            (Some(id), Some(password)) => Some((id.as_str(), password.as_str())),
            _ => None,
        }
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the registry host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the registry port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the per-operation timeout (in seconds, 0 disables)
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set the registrar id and password
    pub fn credentials(mut self, id: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.registrar_id = Some(id.into());
        self.config.password = Some(password.into());
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
