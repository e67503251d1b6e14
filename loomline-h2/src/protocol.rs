//! Session protocol and authority formatting.

/// Protocol of the session carrying this connection.
///
/// Decides the `:scheme` default and the conventional port omitted from
/// `:authority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProtocol {
    /// Cleartext HTTP/2 (h2c).
    Http,
    /// HTTP/2 over TLS (h2).
    Https,
}

impl SessionProtocol {
    /// Whether the transport is encrypted.
    pub const fn is_tls(self) -> bool {
        matches!(self, SessionProtocol::Https)
    }

    /// URI scheme text for this protocol.
    pub const fn uri_scheme(self) -> &'static str {
        match self {
            SessionProtocol::Http => "http",
            SessionProtocol::Https => "https",
        }
    }

    /// Conventional default port for this protocol.
    pub const fn default_port(self) -> u16 {
        match self {
            SessionProtocol::Http => 80,
            SessionProtocol::Https => 443,
        }
    }
}

/// Format an authority string from a host and port, omitting the port when
/// it matches `default_port`. IPv6 literals are bracketed.
pub fn authority(host: &str, port: u16, default_port: u16) -> String {
    let needs_brackets = host.contains(':') && !host.starts_with('[');
    match (needs_brackets, port == default_port) {
        (false, true) => host.to_string(),
        (false, false) => format!("{host}:{port}"),
        (true, true) => format!("[{host}]"),
        (true, false) => format!("[{host}]:{port}"),
    }
}
