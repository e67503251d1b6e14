//! Error taxonomy for the outbound encode path.
//!
//! The load-bearing distinction is retry safety. A request header frame
//! rejected before anything reached the wire surfaces as
//! [`EncodeError::Unprocessed`], and the caller may resend it on another
//! connection. A trailer rejected for the same underlying reason surfaces as
//! the bare [`EncodeError::StreamClosed`]: earlier frames of that stream
//! were already sent, so a blind resend can duplicate side effects.

use thiserror::Error;

use crate::stream::StreamId;

/// HTTP/2 error codes (RFC 7540 Section 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NoError = 0x0,
    ProtocolError = 0x1,
    InternalError = 0x2,
    FlowControlError = 0x3,
    SettingsTimeout = 0x4,
    StreamClosed = 0x5,
    FrameSizeError = 0x6,
    RefusedStream = 0x7,
    Cancel = 0x8,
    CompressionError = 0x9,
    ConnectError = 0xa,
    EnhanceYourCalm = 0xb,
    InadequateSecurity = 0xc,
    Http11Required = 0xd,
}

impl ErrorCode {
    pub fn from_u32(v: u32) -> Self {
        match v {
            0x0 => Self::NoError,
            0x1 => Self::ProtocolError,
            0x2 => Self::InternalError,
            0x3 => Self::FlowControlError,
            0x4 => Self::SettingsTimeout,
            0x5 => Self::StreamClosed,
            0x6 => Self::FrameSizeError,
            0x7 => Self::RefusedStream,
            0x8 => Self::Cancel,
            0x9 => Self::CompressionError,
            0xa => Self::ConnectError,
            0xb => Self::EnhanceYourCalm,
            0xc => Self::InadequateSecurity,
            0xd => Self::Http11Required,
            _ => Self::InternalError,
        }
    }
}

/// A stream id that can no longer be created: the local endpoint's id space
/// has advanced to or past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot create a new stream. stream id: {stream_id}, last stream created: {last_created}")]
pub struct ClosedStreamError {
    /// The id the write targeted.
    pub stream_id: StreamId,
    /// Highest id the local endpoint had created at rejection time.
    pub last_created: StreamId,
}

/// Classified failure of a single write attempt.
///
/// Never connection-fatal: the connection stays usable for other streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A trailer (or data) frame targeted a stream that is already gone.
    /// Earlier frames of this stream were sent; resending the request is
    /// unsafe without application-level idempotency.
    #[error("stream closed: {0}")]
    StreamClosed(#[from] ClosedStreamError),

    /// The request's leading header frame was rejected before any byte of
    /// the request reached the wire. Safe to resend on another connection.
    #[error("request was not processed: {0}")]
    Unprocessed(#[source] ClosedStreamError),
}

impl EncodeError {
    /// Whether the failed request never reached the wire and may be resent
    /// without risking a duplicate send.
    pub fn is_retry_safe(&self) -> bool {
        matches!(self, EncodeError::Unprocessed(_))
    }

    /// The underlying stream-closed cause.
    pub fn cause(&self) -> &ClosedStreamError {
        match self {
            EncodeError::StreamClosed(cause) | EncodeError::Unprocessed(cause) => cause,
        }
    }
}

/// Failure surfaced by a [`WriteCompletion`](crate::WriteCompletion) after
/// the frame was handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The completion was cancelled by its owner. The frame itself is not
    /// retracted if it was already submitted.
    #[error("write cancelled")]
    Cancelled,

    /// The encoder dropped the completion signal without resolving it.
    #[error("write abandoned by encoder")]
    Abandoned,

    /// The encoder reported a failure flushing the frame.
    #[error("encoder error: {0}")]
    Encoder(String),
}
