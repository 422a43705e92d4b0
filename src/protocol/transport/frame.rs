//! In-memory representation of one captured frame record, as produced by the
//! format-specific line parsers.
use crate::protocol::transport::can_id::CanId;

/// Destination address standing for "all nodes" (PDU2 broadcast).
pub const BROADCAST: u8 = 0xFF;

#[derive(Clone, Debug, PartialEq)]
/// One parsed capture line: header attributes plus the raw payload bytes.
/// Fast-packet sub-frames arrive as one record each; some capture formats
/// coalesce them upstream and deliver the full payload in a single record.
pub struct RawFrame {
    /// Capture timestamp, seconds.
    pub timestamp: f64,
    /// Message priority (3 bits, 0 = highest).
    pub priority: u8,
    /// Parameter Group Number.
    pub pgn: u32,
    /// Source address of the sender.
    pub source: u8,
    /// Destination address; [`BROADCAST`] for PDU2 messages.
    pub destination: u8,
    /// Raw payload bytes.
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Build a frame record from a raw 29-bit identifier, for capture formats
    /// that log the identifier instead of pre-split header fields.
    pub fn from_can_id(timestamp: f64, id: CanId, data: Vec<u8>) -> Self {
        let header = id.header();
        Self {
            timestamp,
            priority: header.priority,
            pgn: header.pgn,
            source: header.source,
            destination: header.destination.unwrap_or(BROADCAST),
            data,
        }
    }
}
