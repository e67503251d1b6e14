//! Encode-path metrics.
//!
//! Per-connection-context counters for the write paths. Exposed through the
//! metriken registry like the rest of the loomline stack.

use metriken::{Counter, metric};

#[metric(
    name = "loomline/h2/streams/created",
    description = "Header writes that opened a new stream"
)]
pub static STREAMS_CREATED: Counter = Counter::new();

#[metric(
    name = "loomline/h2/writes/continuation",
    description = "Header writes to an already-open stream"
)]
pub static CONTINUATION_WRITES: Counter = Counter::new();

#[metric(
    name = "loomline/h2/writes/rejected_unprocessed",
    description = "Request header writes rejected before reaching the wire"
)]
pub static REJECTED_UNPROCESSED: Counter = Counter::new();

#[metric(
    name = "loomline/h2/writes/rejected_closed",
    description = "Trailer or data writes rejected on a closed stream"
)]
pub static REJECTED_CLOSED: Counter = Counter::new();

#[metric(
    name = "loomline/h2/resets/noop",
    description = "Reset writes on streams that were already gone"
)]
pub static RESETS_NOOP: Counter = Counter::new();
