//! Fixed-size frame codec for the feed's byte stream.
//!
//! The transport gives no guarantee that read boundaries align with packet
//! boundaries: a single read may carry zero, one, or many complete frames
//! plus a trailing partial frame. [`FixedFrameCodec`] buffers residual bytes
//! across reads and yields frames of exactly the configured size, in arrival
//! order. At end of stream any leftover partial bytes are surfaced as a
//! [`FramingError::TruncatedTail`] rather than silently dropped or padded.

use std::io;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::{error::FramingError, packet::PACKET_SIZE};

/// Decoder slicing a byte stream into fixed-size frames.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use tapefeed::codec::FixedFrameCodec;
/// use tokio_util::codec::Decoder;
///
/// let mut codec = FixedFrameCodec::new(4);
/// let mut buf = BytesMut::from(&[1_u8, 2, 3, 4, 5][..]);
/// let frame = codec.decode(&mut buf).unwrap().unwrap();
/// assert_eq!(frame.as_ref(), &[1, 2, 3, 4]);
/// // One residual byte stays buffered for the next read.
/// assert!(codec.decode(&mut buf).unwrap().is_none());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FixedFrameCodec {
    frame_size: usize,
}

impl FixedFrameCodec {
    /// Construct a codec for frames of `frame_size` bytes.
    ///
    /// # Panics
    /// Panics if `frame_size` is zero.
    #[must_use]
    pub const fn new(frame_size: usize) -> Self {
        assert!(frame_size > 0, "frame size must be non-zero");
        Self { frame_size }
    }

    /// Codec sized for the feed's trade packet frames.
    #[must_use]
    pub const fn for_packets() -> Self { Self::new(PACKET_SIZE) }

    /// Frame size this codec yields.
    #[must_use]
    pub const fn frame_size(&self) -> usize { self.frame_size }
}

impl Default for FixedFrameCodec {
    fn default() -> Self { Self::for_packets() }
}

impl Decoder for FixedFrameCodec {
    type Item = Bytes;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < self.frame_size {
            // Reserve up to a full frame so the next read can complete it.
            src.reserve(self.frame_size - src.len());
            return Ok(None);
        }
        Ok(Some(src.split_to(self.frame_size).freeze()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        // Clean close: the peer stopped exactly on a frame boundary.
        if src.is_empty() {
            return Ok(None);
        }
        Err(FramingError::TruncatedTail {
            bytes_received: src.len(),
            frame_size: self.frame_size,
        }
        .into())
    }
}
