//! Role-specific header enrichment.
//!
//! HTTP/2 requires pseudo-headers on every request that callers routinely
//! leave to the transport. The enrichment role fills them in and nothing
//! else. Client and server transports differ only in which defaults they
//! supply, so the role is a capability the writer is parameterized with
//! rather than a subclassing seam.

use crate::config::EncoderConfig;
use crate::headers::{HeaderField, insert_pseudo, name, wire_contains};
use crate::protocol::authority;

/// Fills role-specific defaults into a request-path wire header block.
///
/// Invoked only for request header sets; trailers are never enriched.
/// Implementations must not overwrite values the caller set.
pub trait Enrich {
    fn enrich_request(&self, wire: &mut Vec<HeaderField>);
}

/// Client-role enrichment: `user-agent`, `:scheme` and `:authority`
/// defaults derived from the connection configuration.
#[derive(Debug, Clone)]
pub struct ClientEnrich {
    config: EncoderConfig,
}

impl ClientEnrich {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl Enrich for ClientEnrich {
    fn enrich_request(&self, wire: &mut Vec<HeaderField>) {
        if !wire_contains(wire, name::USER_AGENT) {
            wire.push(HeaderField::new(
                name::USER_AGENT,
                self.config.user_agent.as_bytes(),
            ));
        }

        if !wire_contains(wire, name::SCHEME) {
            insert_pseudo(
                wire,
                HeaderField::new(name::SCHEME, self.config.protocol.uri_scheme()),
            );
        }

        if !wire_contains(wire, name::AUTHORITY) {
            let value = authority(
                &self.config.remote_host,
                self.config.remote_port,
                self.config.protocol.default_port(),
            );
            insert_pseudo(wire, HeaderField::new(name::AUTHORITY, value));
        }
    }
}
