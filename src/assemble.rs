//! Final assembly of the recovered dataset.
//!
//! Merges the originally streamed packets with the recovered ones, orders
//! them by sequence, and reports whether the result covers the full expected
//! domain. Completeness is advisory: an incomplete set is returned with its
//! missing sequences listed, not rejected.

use std::collections::BTreeMap;

use crate::packet::TradePacket;

/// A sequence-ordered dataset and its completeness report.
#[derive(Debug)]
pub struct Assembled {
    /// Packets in ascending sequence order, one per sequence.
    pub packets: Vec<TradePacket>,
    /// Sequences in `[1, maxSeq]` absent from the final set, ascending.
    pub missing: Vec<i32>,
}

impl Assembled {
    /// True when every sequence in the expected domain is present.
    #[must_use]
    pub fn is_complete(&self) -> bool { self.missing.is_empty() }
}

/// Merge and order the streamed and recovered packets.
///
/// Duplicate sequences resolve last-write-wins, with recovered packets
/// processed after received ones; no cross-copy comparison is made.
///
/// # Examples
///
/// ```
/// use tapefeed::{assemble::assemble, packet::{Side, TradePacket}};
///
/// let packet = |sequence| TradePacket {
///     symbol: "AAPL".into(),
///     side: Side::Buy,
///     quantity: 1,
///     price: 1,
///     sequence,
/// };
/// let dataset = assemble(vec![packet(3), packet(1)], vec![packet(2)]);
/// let order: Vec<i32> = dataset.packets.iter().map(|p| p.sequence).collect();
/// assert_eq!(order, vec![1, 2, 3]);
/// assert!(dataset.is_complete());
/// ```
#[must_use]
pub fn assemble(received: Vec<TradePacket>, recovered: Vec<TradePacket>) -> Assembled {
    let mut by_sequence = BTreeMap::new();
    for packet in received.into_iter().chain(recovered) {
        by_sequence.insert(packet.sequence, packet);
    }

    let max = by_sequence.keys().next_back().copied().unwrap_or(0);
    let missing = (1..=max)
        .filter(|sequence| !by_sequence.contains_key(sequence))
        .collect();

    Assembled {
        packets: by_sequence.into_values().collect(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Side;

    fn packet(sequence: i32, quantity: i32) -> TradePacket {
        TradePacket {
            symbol: "AAPL".into(),
            side: Side::Buy,
            quantity,
            price: 1,
            sequence,
        }
    }

    fn order(dataset: &Assembled) -> Vec<i32> {
        dataset.packets.iter().map(|p| p.sequence).collect()
    }

    #[test]
    fn sorts_merged_packets_by_sequence() {
        let dataset = assemble(
            vec![packet(5, 1), packet(1, 1), packet(3, 1)],
            vec![packet(4, 1), packet(2, 1)],
        );
        assert_eq!(order(&dataset), vec![1, 2, 3, 4, 5]);
        assert!(dataset.is_complete());
        assert!(dataset.missing.is_empty());
    }

    #[test]
    fn reports_missing_sequences() {
        let dataset = assemble(vec![packet(1, 1), packet(3, 1)], Vec::new());
        assert_eq!(order(&dataset), vec![1, 3]);
        assert_eq!(dataset.missing, vec![2]);
        assert!(!dataset.is_complete());
    }

    #[test]
    fn duplicate_sequences_resolve_last_write_wins() {
        let dataset = assemble(vec![packet(1, 10)], vec![packet(1, 20)]);
        assert_eq!(dataset.packets.len(), 1);
        assert_eq!(dataset.packets[0].quantity, 20);
    }

    #[test]
    fn empty_inputs_assemble_to_empty_complete_set() {
        let dataset = assemble(Vec::new(), Vec::new());
        assert!(dataset.packets.is_empty());
        assert!(dataset.is_complete());
    }
}
