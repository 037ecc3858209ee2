//! Wire layout and codec for the fixed-format trade packet.
//!
//! Every packet on the feed is a fixed 17-byte big-endian structure. The
//! layout is defined once as an ordered field table; offsets and the total
//! packet size are derived from it at compile time so the table is the single
//! source of truth for the wire format.
//!
//! | Offset | Size | Field    | Encoding                      |
//! |--------|------|----------|-------------------------------|
//! | 0      | 4    | symbol   | ASCII, right-padded           |
//! | 4      | 1    | side     | ASCII, one of `B`, `S`        |
//! | 5      | 4    | quantity | signed 32-bit big-endian      |
//! | 9      | 4    | price    | signed 32-bit big-endian      |
//! | 13     | 4    | sequence | signed 32-bit big-endian      |

use serde::Serialize;

use crate::error::{FramingError, PacketError, ValidationError};

/// Encoding of a single field on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width ASCII text, right-padded with spaces.
    Ascii,
    /// Signed 32-bit big-endian integer.
    Int32Be,
}

/// Descriptor for one field of the packet layout.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Field name, for diagnostics.
    pub name: &'static str,
    /// Wire encoding of the field.
    pub kind: FieldKind,
    /// Width in bytes.
    pub len: usize,
}

/// Ordered field table defining the packet wire format.
///
/// Field order and widths must match the server's layout exactly; any
/// mismatch corrupts every subsequent field in a frame.
pub const PACKET_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        name: "symbol",
        kind: FieldKind::Ascii,
        len: 4,
    },
    FieldSpec {
        name: "side",
        kind: FieldKind::Ascii,
        len: 1,
    },
    FieldSpec {
        name: "quantity",
        kind: FieldKind::Int32Be,
        len: 4,
    },
    FieldSpec {
        name: "price",
        kind: FieldKind::Int32Be,
        len: 4,
    },
    FieldSpec {
        name: "sequence",
        kind: FieldKind::Int32Be,
        len: 4,
    },
];

/// Byte offset of the field at `index` in [`PACKET_FIELDS`].
const fn field_offset(index: usize) -> usize {
    let mut offset = 0;
    let mut i = 0;
    while i < index {
        offset += PACKET_FIELDS[i].len;
        i += 1;
    }
    offset
}

/// Total size of one packet frame in bytes.
pub const PACKET_SIZE: usize = field_offset(PACKET_FIELDS.len());

const SYMBOL_AT: usize = field_offset(0);
const SYMBOL_LEN: usize = PACKET_FIELDS[0].len;
const SIDE_AT: usize = field_offset(1);
const QUANTITY_AT: usize = field_offset(2);
const PRICE_AT: usize = field_offset(3);
const SEQUENCE_AT: usize = field_offset(4);

/// Buy/sell indicator carried by every trade packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    /// Buy-side trade, `B` on the wire.
    #[serde(rename = "B")]
    Buy,
    /// Sell-side trade, `S` on the wire.
    #[serde(rename = "S")]
    Sell,
}

impl Side {
    /// Parse the wire byte for the side field.
    ///
    /// # Errors
    /// Returns [`ValidationError::Side`] for any byte other than `B` or `S`.
    pub const fn from_wire(byte: u8) -> Result<Self, ValidationError> {
        match byte {
            b'B' => Ok(Self::Buy),
            b'S' => Ok(Self::Sell),
            other => Err(ValidationError::Side(other)),
        }
    }

    /// The byte representing this side on the wire.
    #[must_use]
    pub const fn to_wire(self) -> u8 {
        match self {
            Self::Buy => b'B',
            Self::Sell => b'S',
        }
    }
}

/// A decoded trade packet.
///
/// A `TradePacket` produced by [`decode`] is structurally sound (correct
/// size, ASCII text fields, recognised side). Field-domain rules — symbol
/// length, positive quantity, price, and sequence — are checked separately by
/// [`TradePacket::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TradePacket {
    /// Ticker symbol, trimmed of right padding.
    pub symbol: String,
    /// Buy or sell indicator.
    pub side: Side,
    /// Traded quantity; positive in a valid packet.
    pub quantity: i32,
    /// Integer-scaled price; positive in a valid packet.
    pub price: i32,
    /// Position of this packet in the full feed, starting at one.
    pub sequence: i32,
}

impl TradePacket {
    /// Check the field-domain rules for a complete, retainable packet.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] encountered, checking fields in
    /// wire order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.len() != SYMBOL_LEN {
            return Err(ValidationError::SymbolLength(self.symbol.clone()));
        }
        if self.quantity <= 0 {
            return Err(ValidationError::Quantity(self.quantity));
        }
        if self.price <= 0 {
            return Err(ValidationError::Price(self.price));
        }
        if self.sequence <= 0 {
            return Err(ValidationError::Sequence(self.sequence));
        }
        Ok(())
    }
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    let mut raw = [0_u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    i32::from_be_bytes(raw)
}

/// Decode one raw frame into a [`TradePacket`].
///
/// Fields are read left to right at offsets derived from [`PACKET_FIELDS`].
/// ASCII fields are right-trimmed of space and NUL padding; integer fields
/// are read as big-endian signed 32-bit values.
///
/// # Errors
/// Returns [`FramingError::SizeMismatch`] unless `bytes` is exactly
/// [`PACKET_SIZE`] long, [`ValidationError::SymbolEncoding`] for a
/// non-ASCII symbol field, and [`ValidationError::Side`] for an
/// unrecognised side byte.
///
/// # Examples
///
/// ```
/// use tapefeed::packet::{self, Side, TradePacket};
///
/// let original = TradePacket {
///     symbol: "MSFT".into(),
///     side: Side::Buy,
///     quantity: 50,
///     price: 102,
///     sequence: 1,
/// };
/// let wire = packet::encode(&original);
/// assert_eq!(packet::decode(&wire).unwrap(), original);
/// ```
pub fn decode(bytes: &[u8]) -> Result<TradePacket, PacketError> {
    if bytes.len() != PACKET_SIZE {
        return Err(FramingError::SizeMismatch {
            expected: PACKET_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let symbol_raw = &bytes[SYMBOL_AT..SYMBOL_AT + SYMBOL_LEN];
    let symbol = std::str::from_utf8(symbol_raw)
        .ok()
        .filter(|s| s.is_ascii())
        .ok_or(ValidationError::SymbolEncoding)?
        .trim_end_matches([' ', '\0'])
        .to_owned();

    Ok(TradePacket {
        symbol,
        side: Side::from_wire(bytes[SIDE_AT])?,
        quantity: read_i32(bytes, QUANTITY_AT),
        price: read_i32(bytes, PRICE_AT),
        sequence: read_i32(bytes, SEQUENCE_AT),
    })
}

/// Encode a [`TradePacket`] into its wire representation.
///
/// The inverse of [`decode`]: the symbol is right-padded with spaces to its
/// fixed width (and truncated if longer). Used by tests and mock servers to
/// fabricate frames.
#[must_use]
pub fn encode(packet: &TradePacket) -> [u8; PACKET_SIZE] {
    let mut wire = [b' '; PACKET_SIZE];
    let symbol = packet.symbol.as_bytes();
    let copied = symbol.len().min(SYMBOL_LEN);
    wire[SYMBOL_AT..SYMBOL_AT + copied].copy_from_slice(&symbol[..copied]);
    wire[SIDE_AT] = packet.side.to_wire();
    wire[QUANTITY_AT..QUANTITY_AT + 4].copy_from_slice(&packet.quantity.to_be_bytes());
    wire[PRICE_AT..PRICE_AT + 4].copy_from_slice(&packet.price.to_be_bytes());
    wire[SEQUENCE_AT..SEQUENCE_AT + 4].copy_from_slice(&packet.sequence.to_be_bytes());
    wire
}
