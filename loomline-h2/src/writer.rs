//! The outbound write decision procedure.
//!
//! `StreamWriter` encodes and dispatches one write per call: it classifies
//! the header set (request vs trailer), picks the write path (continuation,
//! new stream, or reject), applies the matching transform, and delegates to
//! the connection's frame encoder.
//!
//! The reject path is the point of the component. Stream ids are consumed
//! monotonically; a write that targets an id the connection has already
//! advanced past cannot create a stream. Whether that failure is safe to
//! retry depends on what was sent before it: a leading request header frame
//! never reached the wire ([`EncodeError::Unprocessed`]), while a trailer
//! implies earlier frames of the stream did ([`EncodeError::StreamClosed`]).

use bytes::Bytes;

use crate::completion::WriteCompletion;
use crate::config::EncoderConfig;
use crate::encoder::FrameEncoder;
use crate::enrich::{ClientEnrich, Enrich};
use crate::error::{ClosedStreamError, EncodeError, ErrorCode};
use crate::headers::{HeaderField, HeaderMap, insert_pseudo, name};
use crate::metrics;
use crate::stream::{StreamId, StreamLifecycle};

/// Result of one write attempt: an asynchronous completion handle, or an
/// immediate classified failure.
pub type WriteOutcome = Result<WriteCompletion, EncodeError>;

/// HTTP/1 connection-specific headers that must not appear on HTTP/2
/// (RFC 7540 Section 8.1.2.2).
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "upgrade",
];

/// Outbound write path for one connection.
///
/// Holds the owning connection (frame encoder plus lifecycle view) and the
/// role enrichment capability. All per-request data is supplied per call.
pub struct StreamWriter<C, R = ClientEnrich> {
    conn: C,
    role: R,
}

impl<C> StreamWriter<C, ClientEnrich>
where
    C: FrameEncoder + StreamLifecycle,
{
    /// Client-role writer over `conn`.
    pub fn new(conn: C, config: EncoderConfig) -> Self {
        Self {
            conn,
            role: ClientEnrich::new(config),
        }
    }
}

impl<C, R> StreamWriter<C, R>
where
    C: FrameEncoder + StreamLifecycle,
    R: Enrich,
{
    /// Writer with an explicit enrichment role.
    pub fn with_role(conn: C, role: R) -> Self {
        Self { conn, role }
    }

    pub fn conn(&self) -> &C {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_conn(self) -> C {
        self.conn
    }

    /// Encode and dispatch one header write.
    ///
    /// `headers` is classified structurally: a set containing `:method` is a
    /// request header set, anything else is a trailer set. `additional_headers`
    /// and `additional_trailers` are merged by the matching transform before
    /// send, replacing same-name values from `headers`.
    pub fn write_headers(
        &mut self,
        stream_id: StreamId,
        headers: &HeaderMap,
        end_stream: bool,
        additional_headers: &HeaderMap,
        additional_trailers: &HeaderMap,
    ) -> WriteOutcome {
        let is_trailer = !headers.is_request();

        if self.conn.is_open_and_writable(stream_id) {
            // Writing to an existing stream; no retry-safety question arises.
            let wire = if is_trailer {
                trailer_to_wire(headers, additional_trailers)
            } else {
                self.request_to_wire(headers, additional_headers)
            };
            metrics::CONTINUATION_WRITES.increment();
            return Ok(self.conn.write_headers(stream_id, wire, None, end_stream));
        }

        if self.conn.may_have_created(stream_id) {
            // The id space has advanced to or past this id. No new stream
            // can be created with it; classify and reject this attempt.
            let cause = ClosedStreamError {
                stream_id,
                last_created: self.conn.last_locally_created(),
            };
            return Err(if is_trailer {
                metrics::REJECTED_CLOSED.increment();
                EncodeError::StreamClosed(cause)
            } else {
                metrics::REJECTED_UNPROCESSED.increment();
                EncodeError::Unprocessed(cause)
            });
        }

        // Client starts a new stream. New streams always begin with a
        // request header frame, so the request transform applies.
        let wire = self.request_to_wire(headers, additional_headers);
        metrics::STREAMS_CREATED.increment();
        Ok(self.conn.write_headers(stream_id, wire, None, end_stream))
    }

    /// Write a data frame on an open stream.
    ///
    /// A data frame is never the first frame of a request, so a rejection
    /// here is always the bare, retry-unsafe [`EncodeError::StreamClosed`].
    pub fn write_data(&mut self, stream_id: StreamId, data: Bytes, end_stream: bool) -> WriteOutcome {
        if self.conn.is_open_and_writable(stream_id) {
            return Ok(self.conn.write_data(stream_id, data, end_stream));
        }
        metrics::REJECTED_CLOSED.increment();
        Err(EncodeError::StreamClosed(ClosedStreamError {
            stream_id,
            last_created: self.conn.last_locally_created(),
        }))
    }

    /// Write a RST_STREAM frame.
    ///
    /// Resetting a stream that is already gone has nothing to retract and
    /// succeeds immediately.
    pub fn write_reset(&mut self, stream_id: StreamId, error_code: ErrorCode) -> WriteOutcome {
        if self.conn.is_open_and_writable(stream_id) {
            return Ok(self.conn.write_reset(stream_id, error_code));
        }
        metrics::RESETS_NOOP.increment();
        Ok(WriteCompletion::completed())
    }

    /// Request-path transform. Pure: the caller's `HeaderMap` is never
    /// aliased by the returned block.
    fn request_to_wire(&self, headers: &HeaderMap, additional: &HeaderMap) -> Vec<HeaderField> {
        let nominated = connection_nominated(headers);
        let mut wire = headers.to_wire();
        wire.retain(|f| !is_disallowed(&f.name, &nominated));
        merge_additional(&mut wire, additional);
        self.role.enrich_request(&mut wire);
        wire
    }
}

/// Trailer-path transform: merge, then strip everything a trailer must not
/// carry. Never enriched.
fn trailer_to_wire(headers: &HeaderMap, additional: &HeaderMap) -> Vec<HeaderField> {
    let nominated = connection_nominated(headers);
    let mut wire = headers.to_wire();
    merge_additional(&mut wire, additional);
    wire.retain(|f| !f.is_pseudo() && !is_disallowed(&f.name, &nominated));
    wire
}

/// Header names nominated for removal by the `connection` header's value.
fn connection_nominated(headers: &HeaderMap) -> Vec<String> {
    let mut names = Vec::new();
    for value in headers.get_all(name::CONNECTION) {
        for token in value.split(',') {
            let token = token.trim();
            if !token.is_empty() {
                names.push(token.to_ascii_lowercase());
            }
        }
    }
    names
}

fn is_disallowed(wire_name: &[u8], nominated: &[String]) -> bool {
    HOP_BY_HOP.iter().any(|n| n.as_bytes() == wire_name)
        || nominated.iter().any(|n| n.as_bytes() == wire_name)
}

/// Merge additional headers into a wire block with set semantics: every
/// value for a name in `additional` replaces the base values of that name.
fn merge_additional(wire: &mut Vec<HeaderField>, additional: &HeaderMap) {
    if additional.is_empty() {
        return;
    }
    for (n, _) in additional.iter() {
        let lowered = n.to_ascii_lowercase();
        wire.retain(|f| f.name != lowered.as_bytes());
    }
    for (n, v) in additional.iter() {
        let field = HeaderField::new(n.to_ascii_lowercase(), v.as_bytes());
        if field.is_pseudo() {
            insert_pseudo(wire, field);
        } else {
            wire.push(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(wire: &'a [HeaderField], name: &str) -> Option<&'a [u8]> {
        wire.iter()
            .find(|f| f.name == name.as_bytes())
            .map(|f| f.value.as_slice())
    }

    #[test]
    fn trailer_transform_strips_pseudo_headers() {
        let mut trailers = HeaderMap::new();
        trailers.add("grpc-status", "0");
        trailers.add(":method", "GET"); // must never survive into a trailer block

        let wire = trailer_to_wire(&trailers, &HeaderMap::new());
        assert_eq!(wire.len(), 1);
        assert_eq!(get(&wire, "grpc-status"), Some(b"0".as_slice()));
    }

    #[test]
    fn connection_nominated_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.add("connection", "x-internal, x-debug");
        headers.add("x-internal", "1");
        headers.add("x-debug", "1");
        headers.add("x-kept", "1");

        let nominated = connection_nominated(&headers);
        let mut wire = headers.to_wire();
        wire.retain(|f| !is_disallowed(&f.name, &nominated));

        assert!(get(&wire, "connection").is_none());
        assert!(get(&wire, "x-internal").is_none());
        assert!(get(&wire, "x-debug").is_none());
        assert_eq!(get(&wire, "x-kept"), Some(b"1".as_slice()));
    }

    #[test]
    fn merge_replaces_base_values() {
        let mut wire = vec![
            HeaderField::new(b"x-env".as_slice(), b"staging".as_slice()),
            HeaderField::new(b"accept".as_slice(), b"*/*".as_slice()),
        ];
        let mut additional = HeaderMap::new();
        additional.add("X-Env", "prod");
        merge_additional(&mut wire, &additional);

        assert_eq!(wire.iter().filter(|f| f.name == b"x-env").count(), 1);
        assert_eq!(get(&wire, "x-env"), Some(b"prod".as_slice()));
        assert_eq!(get(&wire, "accept"), Some(b"*/*".as_slice()));
    }

    #[test]
    fn merged_pseudo_headers_stay_in_front() {
        let mut wire = vec![
            HeaderField::new(b":method".as_slice(), b"GET".as_slice()),
            HeaderField::new(b"accept".as_slice(), b"*/*".as_slice()),
        ];
        let mut additional = HeaderMap::new();
        additional.add(":authority", "override.example.com");
        merge_additional(&mut wire, &additional);

        assert_eq!(wire[1].name, b":authority");
        assert_eq!(get(&wire, ":authority"), Some(b"override.example.com".as_slice()));
    }
}
