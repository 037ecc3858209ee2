//! The fetch-by-sequence recovery session.
//!
//! Unlike the streaming session, a resend exchange is single-shot: the server
//! answers a targeted request with exactly one frame, so no reassembly loop
//! is needed. A fixed deadline bounds the whole exchange; on expiry the
//! connection is torn down and the wait becomes a [`FeedError::Timeout`].
//! Recovered packets pass the same field-domain validation as streamed ones,
//! rather than trusting the server's targeted response.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

use super::FeedClient;
use crate::{
    error::FeedError,
    packet::{self, PACKET_SIZE, TradePacket},
    request::Request,
};

impl FeedClient {
    /// Fetch one packet by sequence number over a fresh connection.
    ///
    /// The connection is closed as soon as the frame arrives; the client does
    /// not wait for the peer to close. Dropping the socket on the timeout
    /// path tears down a hung connection.
    ///
    /// # Errors
    /// Returns [`FeedError::SequenceOutOfRange`] for sequences the resend
    /// request cannot carry, [`FeedError::Timeout`] if no frame arrives
    /// within the configured deadline, [`FeedError::Disconnected`] if the
    /// peer closes first, and [`FeedError::Io`] for transport failures.
    pub async fn fetch_one(&self, sequence: i32) -> Result<TradePacket, FeedError> {
        let request = Request::resend(sequence)?;
        let deadline = self.config().recovery_timeout_value();
        match tokio::time::timeout(deadline, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout {
                sequence,
                waited: deadline,
            }),
        }
    }

    /// Fetch one packet, retrying per the configured [`RetryPolicy`].
    ///
    /// Attempts are sequential, each on a fresh connection. The first success
    /// wins; otherwise the last attempt's error is returned. Permanent
    /// failures (an unrepresentable sequence) are not retried.
    ///
    /// [`RetryPolicy`]: crate::config::RetryPolicy
    ///
    /// # Errors
    /// Returns the final attempt's [`FeedError`] once the bound is exhausted.
    pub async fn fetch_with_retry(&self, sequence: i32) -> Result<TradePacket, FeedError> {
        let policy = self.config().retry_value();
        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::debug!(
                sequence,
                attempt,
                max_attempts = policy.max_attempts_value(),
                "requesting resend"
            );
            match self.fetch_one(sequence).await {
                Ok(packet) => return Ok(packet),
                Err(error) if !error.is_retryable() => return Err(error),
                Err(error) => {
                    tracing::warn!(sequence, attempt, %error, "resend attempt failed");
                    if attempt >= policy.max_attempts_value() {
                        return Err(error);
                    }
                    if !policy.delay_value().is_zero() {
                        tokio::time::sleep(policy.delay_value()).await;
                    }
                }
            }
        }
    }

    async fn exchange(&self, request: Request) -> Result<TradePacket, FeedError> {
        let mut stream = TcpStream::connect(self.config().addr()).await?;
        stream.write_all(&request.encode()).await?;

        let mut frame = [0_u8; PACKET_SIZE];
        stream.read_exact(&mut frame).await.map_err(|error| {
            if error.kind() == std::io::ErrorKind::UnexpectedEof {
                FeedError::Disconnected
            } else {
                FeedError::Io(error)
            }
        })?;
        drop(stream);

        let recovered = packet::decode(&frame)?;
        recovered.validate()?;
        Ok(recovered)
    }
}
