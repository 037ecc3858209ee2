//! Gap detection and recovery across the received sequence set.
//!
//! The expected complete domain is the contiguous range `[1, maxSeq]`, where
//! `maxSeq` is the highest sequence observed during streaming. Recovery is
//! best-effort: each missing sequence is fetched with bounded retries, and a
//! sequence that exhausts its budget is recorded and skipped rather than
//! aborting the rest of the run.

use std::collections::HashSet;

use crate::{client::FeedClient, error::FeedError, packet::TradePacket};

/// Sequences absent from `received` within `[1, maxSeq]`, ascending.
///
/// An empty input, or one whose maximum sequence is not positive, has no
/// expected domain and therefore no gaps.
///
/// # Examples
///
/// ```
/// use tapefeed::{gap::missing_sequences, packet::{Side, TradePacket}};
///
/// let received: Vec<TradePacket> = [1, 2, 4, 5]
///     .into_iter()
///     .map(|sequence| TradePacket {
///         symbol: "AAPL".into(),
///         side: Side::Buy,
///         quantity: 1,
///         price: 1,
///         sequence,
///     })
///     .collect();
/// assert_eq!(missing_sequences(&received), vec![3]);
/// ```
#[must_use]
pub fn missing_sequences(received: &[TradePacket]) -> Vec<i32> {
    let max = received.iter().map(|p| p.sequence).max().unwrap_or(0);
    if max <= 0 {
        return Vec::new();
    }
    let seen: HashSet<i32> = received.iter().map(|p| p.sequence).collect();
    (1..=max).filter(|seq| !seen.contains(seq)).collect()
}

/// Outcome of one recovery pass over the missing-sequence list.
#[derive(Debug, Default)]
pub struct RecoveryReport {
    /// Packets fetched successfully.
    pub recovered: Vec<TradePacket>,
    /// Sequences that exhausted their retry budget.
    pub unrecovered: Vec<i32>,
    /// Sequences not representable in the resend request's one-byte field.
    pub unrequestable: Vec<i32>,
}

impl RecoveryReport {
    /// True when every missing sequence was recovered.
    #[must_use]
    pub fn is_fully_recovered(&self) -> bool {
        self.unrecovered.is_empty() && self.unrequestable.is_empty()
    }
}

/// Drives per-sequence recovery over a borrowed [`FeedClient`].
#[derive(Clone, Copy, Debug)]
pub struct GapResolver<'a> {
    client: &'a FeedClient,
}

impl<'a> GapResolver<'a> {
    /// Build a resolver over `client`.
    #[must_use]
    pub const fn new(client: &'a FeedClient) -> Self { Self { client } }

    /// Recover every sequence missing from `received`.
    ///
    /// Missing sequences are fetched strictly one at a time, in ascending
    /// order; individual permanent failures are tolerated and reported.
    pub async fn resolve(&self, received: &[TradePacket]) -> RecoveryReport {
        let missing = missing_sequences(received);
        let mut report = RecoveryReport::default();
        if missing.is_empty() {
            tracing::info!("no sequence gaps detected");
            return report;
        }
        tracing::info!(count = missing.len(), ?missing, "recovering missing sequences");

        for sequence in missing {
            match self.client.fetch_with_retry(sequence).await {
                Ok(packet) => report.recovered.push(packet),
                Err(FeedError::SequenceOutOfRange(_)) => {
                    tracing::warn!(sequence, "sequence not requestable over the resend protocol");
                    report.unrequestable.push(sequence);
                }
                Err(error) => {
                    tracing::warn!(sequence, %error, "giving up on sequence after all retries");
                    report.unrecovered.push(sequence);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::packet::Side;

    fn packets(sequences: &[i32]) -> Vec<TradePacket> {
        sequences
            .iter()
            .map(|&sequence| TradePacket {
                symbol: "AAPL".into(),
                side: Side::Sell,
                quantity: 1,
                price: 1,
                sequence,
            })
            .collect()
    }

    #[rstest]
    #[case::single_gap(&[1, 2, 4, 5], vec![3])]
    #[case::leading_gap(&[3], vec![1, 2])]
    #[case::several_gaps(&[2, 5], vec![1, 3, 4])]
    #[case::contiguous(&[1, 2, 3], vec![])]
    #[case::duplicates(&[1, 1, 3], vec![2])]
    fn missing_sequences_cases(#[case] received: &[i32], #[case] expected: Vec<i32>) {
        assert_eq!(missing_sequences(&packets(received)), expected);
    }

    #[test]
    fn empty_input_has_no_gaps() {
        assert!(missing_sequences(&[]).is_empty());
    }

    #[test]
    fn non_positive_max_has_no_expected_domain() {
        assert!(missing_sequences(&packets(&[0])).is_empty());
        assert!(missing_sequences(&packets(&[-4])).is_empty());
    }

    #[test]
    fn report_completeness() {
        let mut report = RecoveryReport::default();
        assert!(report.is_fully_recovered());
        report.unrecovered.push(2);
        assert!(!report.is_fully_recovered());
    }
}
