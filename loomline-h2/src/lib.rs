//! Outbound header-encoding path for an HTTP/2 client transport.
//!
//! Given a logical request's header or trailer set, [`StreamWriter`] decides
//! whether to write to an already-open multiplexed stream or to create a new
//! one, fills in the pseudo-header defaults HTTP/2 requires, and classifies
//! failures into retry-safe and retry-unsafe kinds from the
//! stream-lifecycle state. A client that retries after an
//! ambiguous failure either duplicates a side-effecting request or drops a
//! legitimate one; the [`EncodeError`] split is what prevents both.
//!
//! Frame serialization, header compression, and flow control live behind
//! the [`FrameEncoder`] trait; the stream id space behind [`StreamLifecycle`].
//! Both are implemented by the owning connection.
//!
//! # Architecture
//!
//! ```text
//!   HeaderMap (request or trailer)
//!        |
//!   +----v-----------+   is_open_and_writable? ──> continuation write
//!   | StreamWriter   |   may_have_created?     ──> reject (classified)
//!   | classify,      |   otherwise             ──> new-stream write
//!   | transform,     |
//!   | dispatch       |
//!   +----+-----------+
//!        |
//!   FrameEncoder (owned by the connection)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use loomline_h2::{EncoderConfig, HeaderMap, SessionProtocol, StreamId, StreamWriter};
//!
//! let config = EncoderConfig::new(SessionProtocol::Https, "api.example.com", 443);
//! let mut writer = StreamWriter::new(conn, config);
//!
//! let mut headers = HeaderMap::new();
//! headers.add(":method", "GET");
//! headers.add(":path", "/v1/items");
//!
//! match writer.write_headers(StreamId::new(5), &headers, true, &extra, &HeaderMap::new()) {
//!     Ok(completion) => completion.await?,
//!     Err(err) if err.is_retry_safe() => resend_elsewhere(),
//!     Err(err) => fail_request(err),
//! }
//! ```

pub mod completion;
pub mod config;
pub mod encoder;
pub mod enrich;
pub mod error;
pub mod headers;
pub mod metrics;
pub mod protocol;
pub mod stream;
pub mod writer;

pub use completion::{WriteCompletion, WriteSignal};
pub use config::{DEFAULT_USER_AGENT, EncoderConfig};
pub use encoder::{FrameEncoder, Priority};
pub use enrich::{ClientEnrich, Enrich};
pub use error::{ClosedStreamError, EncodeError, ErrorCode, WriteError};
pub use headers::{HeaderField, HeaderMap};
pub use protocol::SessionProtocol;
pub use stream::{StreamId, StreamLifecycle};
pub use writer::{StreamWriter, WriteOutcome};
