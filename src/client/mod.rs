//! Feed client sessions.
//!
//! [`FeedClient`] performs the two request/response exchanges the server
//! supports: a stream-all session that reads frames until the peer closes
//! ([`FeedClient::stream_all`]) and a single-shot, deadline-bounded resend
//! fetch ([`FeedClient::fetch_one`]). Each exchange opens its own connection
//! and fully closes it on every exit path; connections are never reused and
//! never open concurrently.

use crate::{
    assemble::{self, Assembled},
    config::FeedConfig,
    error::FeedError,
    gap::{GapResolver, RecoveryReport},
};

mod recovery;
mod stream;

pub use stream::{Anomaly, StreamOutcome};

/// Client for the fixed-format trade packet feed.
///
/// # Examples
///
/// ```no_run
/// use tapefeed::{FeedClient, FeedConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), tapefeed::FeedError> {
/// let addr = "127.0.0.1:3000".parse().expect("valid socket address");
/// let client = FeedClient::new(FeedConfig::new(addr));
/// let outcome = client.run().await?;
/// println!("{} packets", outcome.dataset.packets.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FeedClient {
    config: FeedConfig,
}

/// Result of a full stream-recover-assemble run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The sequence-ordered dataset with its completeness report.
    pub dataset: Assembled,
    /// Frames from the streaming phase that were dropped rather than kept.
    pub anomalies: Vec<Anomaly>,
    /// Missing sequences that exhausted their retry budget.
    pub unrecovered: Vec<i32>,
    /// Missing sequences not representable in the resend request.
    pub unrequestable: Vec<i32>,
}

impl FeedClient {
    /// Build a client over an immutable configuration.
    #[must_use]
    pub const fn new(config: FeedConfig) -> Self { Self { config } }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &FeedConfig { &self.config }

    /// Run the full pipeline: stream all packets, recover gaps, assemble.
    ///
    /// Completeness of the result is advisory: sequences that could not be
    /// recovered are reported in the outcome rather than failing the run.
    ///
    /// # Errors
    /// Returns [`FeedError`] only for a transport failure on the stream-all
    /// exchange, which is fatal because there is no fallback source for the
    /// full dataset.
    pub async fn run(&self) -> Result<RunOutcome, FeedError> {
        let StreamOutcome { packets, anomalies } = self.stream_all().await?;
        let RecoveryReport {
            recovered,
            unrecovered,
            unrequestable,
        } = GapResolver::new(self).resolve(&packets).await;
        let dataset = assemble::assemble(packets, recovered);
        Ok(RunOutcome {
            dataset,
            anomalies,
            unrecovered,
            unrequestable,
        })
    }
}
