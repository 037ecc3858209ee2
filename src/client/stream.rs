//! The stream-all session.
//!
//! Protocol: open one connection, send the stream-all request, then read
//! until the peer closes. There is no end-of-stream marker or length prefix;
//! the peer closing the socket is the only termination signal. Frames that
//! fail to decode or validate are recorded as [`Anomaly`] values and excluded
//! from the result instead of aborting the session.

use bytes::Bytes;
use futures::StreamExt;
use tokio::{io::AsyncWriteExt, net::TcpStream};
use tokio_util::codec::FramedRead;

use super::FeedClient;
use crate::{
    codec::FixedFrameCodec,
    error::{FeedError, FramingError, PacketError, ValidationError},
    packet::{self, TradePacket},
    request::Request,
};

/// A frame received during streaming that was dropped rather than kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    /// A structurally sound packet whose fields failed domain validation.
    Invalid {
        /// The decoded packet.
        packet: TradePacket,
        /// The check it failed.
        error: ValidationError,
    },
    /// A full-size frame that could not be decoded into a packet.
    Undecodable {
        /// The raw frame bytes.
        frame: Bytes,
        /// The decode failure.
        error: PacketError,
    },
    /// Leftover bytes at end of stream shorter than one frame.
    TruncatedTail {
        /// Bytes of the partial frame.
        bytes_received: usize,
    },
}

/// Result of one stream-all exchange.
#[derive(Debug, Default)]
pub struct StreamOutcome {
    /// Valid packets, in transmission order (not sequence order).
    pub packets: Vec<TradePacket>,
    /// Frames dropped during the session.
    pub anomalies: Vec<Anomaly>,
}

impl FeedClient {
    /// Request the entire packet history and collect it.
    ///
    /// # Errors
    /// Returns [`FeedError::Io`] if the connection cannot be established or
    /// fails mid-stream. Decode and validation failures are not errors; they
    /// are recorded in [`StreamOutcome::anomalies`].
    pub async fn stream_all(&self) -> Result<StreamOutcome, FeedError> {
        let addr = self.config().addr();
        let mut stream = TcpStream::connect(addr).await?;
        tracing::debug!(%addr, "connected for stream-all");
        stream.write_all(&Request::StreamAll.encode()).await?;

        let mut frames = FramedRead::new(stream, FixedFrameCodec::for_packets());
        let mut outcome = StreamOutcome::default();
        while let Some(next) = frames.next().await {
            match next {
                Ok(frame) => outcome.push_frame(&frame),
                Err(error) => {
                    if let Some(bytes_received) = truncated_tail(&error) {
                        tracing::warn!(bytes_received, "stream ended with a partial frame");
                        outcome.anomalies.push(Anomaly::TruncatedTail { bytes_received });
                        break;
                    }
                    return Err(error.into());
                }
            }
        }
        tracing::info!(
            packets = outcome.packets.len(),
            anomalies = outcome.anomalies.len(),
            "stream-all session complete"
        );
        Ok(outcome)
    }
}

impl StreamOutcome {
    fn push_frame(&mut self, frame: &Bytes) {
        match packet::decode(frame) {
            Ok(packet) => match packet.validate() {
                Ok(()) => self.packets.push(packet),
                Err(error) => {
                    tracing::warn!(%error, ?packet, "dropping invalid packet");
                    self.anomalies.push(Anomaly::Invalid { packet, error });
                }
            },
            Err(error) => {
                tracing::warn!(%error, "dropping undecodable frame");
                self.anomalies.push(Anomaly::Undecodable {
                    frame: frame.clone(),
                    error,
                });
            }
        }
    }
}

/// Extract the partial-frame length if `error` is a truncated-tail report.
fn truncated_tail(error: &std::io::Error) -> Option<usize> {
    match error.get_ref()?.downcast_ref::<FramingError>() {
        Some(FramingError::TruncatedTail { bytes_received, .. }) => Some(*bytes_received),
        _ => None,
    }
}
