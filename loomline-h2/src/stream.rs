//! Stream identifiers and the connection lifecycle view (RFC 7540 Section 5.1.1).

use std::fmt;

/// Identifier of a single HTTP/2 stream within one connection.
///
/// Positive, odd for client-initiated streams, assigned monotonically by the
/// connection's id generator and never reused once consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId(u32);

impl StreamId {
    /// The connection control stream. Also the "nothing created yet" value
    /// reported by [`StreamLifecycle::last_locally_created`].
    pub const ZERO: StreamId = StreamId(0);

    pub const fn new(id: u32) -> Self {
        StreamId(id)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this id belongs to the client-initiated (odd) half of the
    /// id space.
    pub const fn is_client_initiated(self) -> bool {
        self.0 % 2 == 1
    }
}

impl From<u32> for StreamId {
    fn from(id: u32) -> Self {
        StreamId(id)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Read-only view of the connection's stream lifecycle state.
///
/// Implemented by the owning connection; the writer only ever reads it.
/// Mutation of the id space (assigning ids, opening and closing streams)
/// belongs exclusively to the connection layer.
pub trait StreamLifecycle {
    /// Whether `id` currently names an open stream the local endpoint may
    /// still write to.
    fn is_open_and_writable(&self, id: StreamId) -> bool;

    /// Highest stream id the local endpoint has created so far, or
    /// [`StreamId::ZERO`] if none.
    fn last_locally_created(&self) -> StreamId;

    /// Whether `id` either is or was a locally-created stream.
    ///
    /// Sufficient, not exact: a true result may be a false positive (the id
    /// was skipped, not consumed), but a false result is never wrong. The
    /// test must stay conservative; a false negative here would let a
    /// request be written on a consumed id and silently duplicated.
    fn may_have_created(&self, id: StreamId) -> bool {
        self.last_locally_created() >= id
    }
}
