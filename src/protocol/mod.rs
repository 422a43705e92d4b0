//! High-level components of the NMEA 2000 protocol: the PGN catalogue,
//! lookup tables, message conversion, variant resolution, and CAN/Fast Packet
//! transport.
pub mod catalog;
pub mod converter;
pub mod lookups;
pub mod messages;
pub mod resolver;
pub mod transport;
