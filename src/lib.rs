//! Client for a fixed-format binary market-data feed.
//!
//! The feed server streams fixed-size trade packets over TCP and supports
//! point re-delivery of individual packets by sequence number. This crate
//! requests the full stream, detects gaps in the sequence, recovers missing
//! packets with bounded retries, and assembles a gap-free, sequence-ordered
//! dataset — or an explicitly flagged incomplete one when recovery falls
//! short.
//!
//! The typical entry point is [`FeedClient::run`], which performs the whole
//! pipeline; the individual phases ([`FeedClient::stream_all`],
//! [`GapResolver::resolve`], [`assemble::assemble`]) are public for callers
//! that need finer control. The crate performs no file or console I/O: the
//! assembled dataset is handed back in memory for the caller to persist.

pub mod assemble;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod gap;
pub mod packet;
pub mod request;

pub use assemble::{Assembled, assemble};
pub use client::{Anomaly, FeedClient, RunOutcome, StreamOutcome};
pub use codec::FixedFrameCodec;
pub use config::{FeedConfig, RetryPolicy};
pub use error::{FeedError, FramingError, PacketError, ValidationError};
pub use gap::{GapResolver, RecoveryReport, missing_sequences};
pub use packet::{PACKET_SIZE, Side, TradePacket};
pub use request::Request;
