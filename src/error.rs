//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (catalogue validation,
//! bit-level access, reassembly, message decoding).
use crate::core::FieldKind;
use thiserror::Error;

//==================================================================================CATALOG_ERRORS

#[derive(Error, Debug)]
/// Catalogue-integrity failures detected at bootstrap. All of them are fatal:
/// a registry that fails validation is never handed to callers.
pub enum CatalogError {
    /// The catalogue must be sorted ascending by PGN.
    #[error("Catalogue out of order: PGN {pgn} after {previous}")]
    OutOfOrder { pgn: u32, previous: u32 },

    /// Fallback entries must come last within their PGN block.
    #[error("Fallback definition for PGN {pgn} is not the last of its block")]
    FallbackNotLast { pgn: u32 },

    /// A non-fallback PGN must belong to exactly one declared range.
    #[error("PGN {pgn} falls outside every declared range")]
    OutsideDeclaredRanges { pgn: u32 },

    /// The range's packet type must be Mixed or equal to the PGN's.
    #[error("PGN {pgn} packet type conflicts with its range")]
    PacketTypeMismatch { pgn: u32 },

    /// PDU1 ranges step by 256; the low byte of such PGNs must be zero.
    #[error("PDU1 PGN {pgn} has a nonzero low byte")]
    Pdu1LowByteNotZero { pgn: u32 },

    /// Field list exceeds the per-PGN budget.
    #[error("PGN {pgn} declares {count} fields, more than the {max} allowed")]
    TooManyFields { pgn: u32, count: usize, max: usize },

    /// Accumulated field widths exceed the payload capacity of the declared
    /// packet type.
    #[error("PGN {pgn} fields cover {bits} bits, beyond its transport capacity")]
    PayloadCapacityExceeded { pgn: u32, bits: u32 },

    /// A field references a lookup table the registry does not know.
    #[error("PGN {pgn} field {field:?} references unknown lookup table {table:?}")]
    UnknownLookupTable {
        pgn: u32,
        field: &'static str,
        table: &'static str,
    },

    /// A field's lookup category does not match the named table's category.
    #[error("PGN {pgn} field {field:?} lookup kind mismatch for table {table:?}")]
    LookupKindMismatch {
        pgn: u32,
        field: &'static str,
        table: &'static str,
    },

    /// The catalogue names a field-type tag with no descriptor. Equivalent to
    /// a decoder dispatch failure, caught before any payload is processed.
    #[error("No field-type descriptor for tag {kind:?}")]
    MissingFieldTypeDescriptor { kind: FieldKind },
}

//==================================================================================BITREADER_ERRORS

#[derive(Debug, Error)]
/// Errors raised during bitwise buffer reads.
pub enum BitReaderError {
    /// Attempted to read past the end of the buffer.
    #[error("Attempted to read out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
    /// Requested more bits than the target type can hold.
    #[error("Cannot read more than {max} bits. Requested: {asked}")]
    TooLongForType { max: u8, asked: u8 },
    /// Cursor is not aligned on a byte boundary when required.
    #[error("Non aligned bit. Cursor: {cursor}")]
    NonAlignedBit { cursor: usize },
}

//==================================================================================REASSEMBLY_ERRORS

#[derive(Debug, Error)]
/// Failures while collecting fast-packet sub-frames.
pub enum ReassemblyError {
    /// Every slot of the fixed pool is occupied. The caller may retry after
    /// draining complete assemblies.
    #[error("Out of reassembly buffers ({slots} slots in use)")]
    OutOfReassemblyBuffers { slots: usize },

    /// A sub-frame was shorter than the fast-packet framing requires.
    #[error("Fast-packet frame for PGN {pgn} is {len} bytes, expected 8")]
    FrameTooShort { pgn: u32, len: usize },

    /// Frame 0 declared a total size outside the fast-packet bounds.
    #[error("Declared fast-packet size {size} outside 1..={max}")]
    DeclaredSizeOutOfRange { size: usize, max: usize },
}

//==================================================================================DECODE_ERRORS

#[derive(Debug, Error)]
/// Errors surfaced by `process`/`convert` for one message. Catalogue-integrity
/// problems never reach this type; they abort bootstrap instead.
pub enum DecodeError {
    /// No catalogue entry for this PGN and no fallback covering its range.
    #[error("Unknown PGN {pgn} with no fallback in range")]
    UnknownPgn { pgn: u32 },

    /// Match-field search exhausted every candidate and no catch-all exists.
    #[error("No catch-all definition at or below PGN {pgn}")]
    NoCatchAll { pgn: u32 },

    /// Reassembly produced (or was asked to decode) fewer bytes than the
    /// message declares.
    #[error("Truncated payload for PGN {pgn}: have {actual}, need {expected}")]
    TruncatedPayload {
        pgn: u32,
        expected: usize,
        actual: usize,
    },

    /// Error bubbled up from the fast-packet reassembler.
    #[error(transparent)]
    Reassembly(#[from] ReassemblyError),

    /// Bit-level access on the payload failed.
    #[error(transparent)]
    BitReader(#[from] BitReaderError),
}
