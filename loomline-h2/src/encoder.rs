//! Frame encoder interface consumed by the writer.
//!
//! The frame encoder owns serialization, header compression, and flow
//! control; none of that lives in this crate. The writer hands it a
//! finished wire header block (or payload, or reset) and gets back a
//! completion token that resolves when the frame is flushed.

use bytes::Bytes;

use crate::completion::WriteCompletion;
use crate::error::ErrorCode;
use crate::headers::HeaderField;
use crate::stream::StreamId;

/// Stream priority information (RFC 7540 Section 5.3), passed through to the
/// encoder unmodified. `None` for ordinary client writes.
#[derive(Debug, Clone, Copy)]
pub struct Priority {
    pub exclusive: bool,
    pub dependency: u32,
    pub weight: u8,
}

/// Sink for finished outbound frames.
///
/// Implemented by the owning connection. All calls arrive on the
/// connection's execution context, in per-stream call order; the encoder
/// must preserve that order on the wire.
pub trait FrameEncoder {
    /// Write a header block on `stream_id`.
    fn write_headers(
        &mut self,
        stream_id: StreamId,
        headers: Vec<HeaderField>,
        priority: Option<Priority>,
        end_stream: bool,
    ) -> WriteCompletion;

    /// Write a data frame on `stream_id`.
    fn write_data(
        &mut self,
        stream_id: StreamId,
        data: Bytes,
        end_stream: bool,
    ) -> WriteCompletion;

    /// Write a RST_STREAM frame on `stream_id`.
    fn write_reset(&mut self, stream_id: StreamId, error_code: ErrorCode) -> WriteCompletion;
}
