//! `n2k-analyzer` library: decodes NMEA 2000 CAN-bus messages from captured
//! frame records into structured, typed, physically-scaled records. The crate
//! exposes the infrastructure modules (bit-level codec, field decoding engine)
//! and the protocol layer (PGN catalogue, lookup tables, fast-packet
//! reassembly, variant resolution, message conversion).
//==================================================================================
/// Core data types shared by the catalogue and the decoding engine.
pub mod core;
/// Domain and low-level errors (catalogue validation, bit-level access,
/// reassembly, and message decoding).
pub mod error;
/// Bit-level codec primitives and the field-type decoding engine.
pub mod infra;
/// NMEA 2000 protocol layer: PGN catalogue, lookup tables, CAN transport,
/// fast packets, variant resolution, and the message converter.
pub mod protocol;
//==================================================================================
