//! NMEA 2000 Fast Packet support: payloads larger than eight bytes arrive
//! split across successive CAN frames and are rebuilt here.
/// Maximum payload a Fast Packet can transport once reassembled.
pub const MAX_FAST_PACKET_PAYLOAD: usize = 223;

pub mod assembler;
