//! NMEA 2000 transport layer: frame records handed in by the capture
//! parsers, 29-bit identifier decomposition, and Fast Packet reassembly.

pub mod can_id;
pub mod fast_packet;
pub mod frame;
