//! Error types for the feed client.
//!
//! The taxonomy distinguishes framing errors (frame boundary issues on the
//! wire), validation errors (decoded fields outside their domain), and
//! session-level failures (transport errors, recovery timeouts). Framing and
//! validation errors are recoverable during a streaming session: the
//! offending frame is recorded as an anomaly and the session continues.
//! Transport errors on the stream-all exchange are fatal to the run.

use std::{io, time::Duration};

use thiserror::Error;

/// Frame-boundary errors raised while slicing the byte stream into frames.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// A buffer handed to the packet decoder was not exactly one frame.
    #[error("frame size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Required frame size in bytes.
        expected: usize,
        /// Length of the buffer that was offered.
        actual: usize,
    },

    /// The peer closed the stream with a partial frame left in the buffer.
    ///
    /// The tail is reported rather than silently dropped or padded; it
    /// usually indicates a truncated transmission.
    #[error("truncated tail at end of stream: {bytes_received} of {frame_size} frame bytes")]
    TruncatedTail {
        /// Bytes of the partial frame received before the close.
        bytes_received: usize,
        /// Size of a complete frame.
        frame_size: usize,
    },
}

impl From<FramingError> for io::Error {
    fn from(err: FramingError) -> Self {
        match err {
            FramingError::SizeMismatch { .. } => Self::new(io::ErrorKind::InvalidData, err),
            FramingError::TruncatedTail { .. } => Self::new(io::ErrorKind::UnexpectedEof, err),
        }
    }
}

/// Field-domain violations in a decoded packet.
///
/// A packet failing any of these checks is rejected whole; no
/// partially-valid packet enters the assembled dataset.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Symbol field is not printable ASCII.
    #[error("symbol is not printable ASCII")]
    SymbolEncoding,

    /// Symbol is not exactly four characters after trimming padding.
    #[error("symbol must be exactly 4 characters, got {0:?}")]
    SymbolLength(String),

    /// Side byte is neither `B` nor `S`.
    #[error("side must be 'B' or 'S', got byte {0:#04x}")]
    Side(u8),

    /// Quantity must be strictly positive.
    #[error("quantity must be positive, got {0}")]
    Quantity(i32),

    /// Price must be strictly positive.
    #[error("price must be positive, got {0}")]
    Price(i32),

    /// Sequence numbers start at one.
    #[error("sequence must be positive, got {0}")]
    Sequence(i32),
}

/// Errors raised while decoding a raw frame into a packet.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    /// The input was not exactly one frame long.
    #[error(transparent)]
    Frame(#[from] FramingError),

    /// A decoded field fell outside its domain.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Top-level error type for feed client operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure: refused, reset, or another socket error.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),

    /// Frame boundary error.
    #[error("framing error: {0}")]
    Frame(#[from] FramingError),

    /// A recovered packet failed field-domain validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No resend response arrived within the recovery deadline.
    #[error("timed out waiting for packet {sequence} after {waited:?}")]
    Timeout {
        /// Sequence number that was requested.
        sequence: i32,
        /// Deadline that elapsed.
        waited: Duration,
    },

    /// The peer closed the connection before the resend frame arrived.
    #[error("connection closed by peer before a packet arrived")]
    Disconnected,

    /// The sequence cannot be encoded in the resend request's one-byte field.
    #[error("sequence {0} exceeds the resend request's one-byte range")]
    SequenceOutOfRange(i32),
}

impl From<PacketError> for FeedError {
    fn from(err: PacketError) -> Self {
        match err {
            PacketError::Frame(e) => Self::Frame(e),
            PacketError::Validation(e) => Self::Validation(e),
        }
    }
}

impl FeedError {
    /// Returns true for failures worth retrying on a fresh connection.
    ///
    /// Out-of-range sequences are permanent: no number of reconnects makes
    /// them representable on the wire.
    #[must_use]
    pub fn is_retryable(&self) -> bool { !matches!(self, Self::SequenceOutOfRange(_)) }
}
