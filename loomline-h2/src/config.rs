//! Writer configuration.

use crate::protocol::SessionProtocol;

/// Fixed client identity string sent when the caller sets no `user-agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("loomline/", env!("CARGO_PKG_VERSION"));

/// Configuration for one connection's outbound encode path.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Session protocol. Decides the `:scheme` default and which port is
    /// omitted from the `:authority` default.
    pub protocol: SessionProtocol,
    /// Remote endpoint host (name or IP literal) for the `:authority`
    /// default.
    pub remote_host: String,
    /// Remote endpoint port for the `:authority` default.
    pub remote_port: u16,
    /// Client identity for the `user-agent` default.
    pub user_agent: String,
}

impl EncoderConfig {
    /// Configuration for a connection to `remote_host:remote_port` with the
    /// default client identity.
    pub fn new(protocol: SessionProtocol, remote_host: impl Into<String>, remote_port: u16) -> Self {
        Self {
            protocol,
            remote_host: remote_host.into(),
            remote_port,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
