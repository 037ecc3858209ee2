//! Outbound request payloads.
//!
//! The server understands two request kinds, each encoded as a fixed 2-byte
//! payload: byte 0 is the call type, byte 1 the target sequence for resend
//! requests (ignored otherwise). The one-byte sequence field caps resend
//! requests at sequence 255; [`Request::resend`] enforces the bound so the
//! gap resolver can account for unrequestable sequences instead of sending
//! ill-formed payloads.

use crate::error::FeedError;

/// Size of every request payload in bytes.
pub const REQUEST_SIZE: usize = 2;

/// Call type asking the server to stream its whole packet history.
pub const CALL_TYPE_STREAM_ALL: u8 = 1;

/// Call type asking the server to resend a single packet.
pub const CALL_TYPE_RESEND: u8 = 2;

/// An outbound request to the feed server.
///
/// # Examples
///
/// ```
/// use tapefeed::request::Request;
///
/// assert_eq!(Request::StreamAll.encode(), [1, 0]);
/// assert_eq!(Request::resend(42).unwrap().encode(), [2, 42]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Stream the entire available packet history, then close.
    StreamAll,
    /// Resend exactly one packet identified by sequence number.
    Resend {
        /// Target sequence, limited to the one-byte wire field.
        sequence: u8,
    },
}

impl Request {
    /// Build a resend request for `sequence`.
    ///
    /// # Errors
    /// Returns [`FeedError::SequenceOutOfRange`] when `sequence` does not fit
    /// the one-byte wire field.
    pub fn resend(sequence: i32) -> Result<Self, FeedError> {
        u8::try_from(sequence)
            .map(|sequence| Self::Resend { sequence })
            .map_err(|_| FeedError::SequenceOutOfRange(sequence))
    }

    /// Encode the request into its fixed 2-byte payload.
    #[must_use]
    pub const fn encode(self) -> [u8; REQUEST_SIZE] {
        match self {
            Self::StreamAll => [CALL_TYPE_STREAM_ALL, 0],
            Self::Resend { sequence } => [CALL_TYPE_RESEND, sequence],
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::FeedError;

    #[test]
    fn stream_all_encoding() {
        assert_eq!(Request::StreamAll.encode(), [1, 0]);
    }

    #[rstest]
    #[case(0, [2, 0])]
    #[case(7, [2, 7])]
    #[case(255, [2, 255])]
    fn resend_encoding(#[case] sequence: i32, #[case] expected: [u8; REQUEST_SIZE]) {
        let request = Request::resend(sequence).expect("in range");
        assert_eq!(request.encode(), expected);
    }

    #[rstest]
    #[case(256)]
    #[case(-1)]
    #[case(i32::MAX)]
    fn resend_rejects_out_of_range_sequences(#[case] sequence: i32) {
        let err = Request::resend(sequence).expect_err("out of range");
        assert!(matches!(err, FeedError::SequenceOutOfRange(s) if s == sequence));
    }
}
