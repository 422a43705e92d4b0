//! NMEA 2000 Fast Packet assembler: rebuilds application messages by
//! aggregating the CAN frames of a multi-packet transmission.
//!
//! Sub-frames may arrive out of order within the 5-bit frame-number window;
//! completion is tracked with per-frame presence bitmaps rather than a
//! running cursor. A duplicate frame number invalidates the partial assembly
//! and seeds a fresh one with the duplicate.
use log::warn;

use super::MAX_FAST_PACKET_PAYLOAD;
use crate::core::PgnBytes;
use crate::error::ReassemblyError;

//==================================================================================Constants

/// Size of the fixed slot pool: distinct (PGN, source) streams assembling
/// concurrently. Exhaustion fails loudly instead of evicting.
const SLOT_COUNT: usize = 64;

/// Content bytes carried by frame 0 (after the header and size bytes).
const FIRST_FRAME_CONTENT: usize = 6;
/// Content bytes carried by every later frame.
const NEXT_FRAME_CONTENT: usize = 7;

//==================================================================================Enums and Structs

#[derive(Debug, PartialEq, Eq)]
pub enum AssemblyResult {
    /// Frame integrated; more sub-frames are still missing.
    FrameConsumed,
    /// Every required sub-frame has arrived; the payload is complete.
    Complete(CompletedMessage),
}

/// Safe container returning a reassembled message without exposing
/// the assembler's internal buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct CompletedMessage {
    /// Reassembled payload, trimmed to the declared size.
    pub payload: PgnBytes,
    /// 3-bit sequence counter of the transmission.
    pub sequence: u8,
}

/// Snapshot of one in-use slot, for the out-of-band debug dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotStatus {
    pub pgn: u32,
    pub source: u8,
    pub declared_size: usize,
    pub frame_presence: u32,
    pub required_frames: u32,
}

/// Internal state of one reassembly slot.
#[derive(Debug, Clone, Copy)]
struct ReassemblySlot {
    in_use: bool,
    pgn: u32,
    source: u8,
    sequence: u8,
    /// Total payload size declared by frame 0; 0 while frame 0 is missing.
    declared_size: usize,
    buffer: [u8; MAX_FAST_PACKET_PAYLOAD],
    /// Bit k set ⇔ sub-frame k received.
    frame_presence: u32,
    /// Bits 0..⌈size/7⌉ set once the declared size is known.
    required_frames: u32,
}

impl ReassemblySlot {
    const fn new() -> Self {
        Self {
            in_use: false,
            pgn: 0,
            source: 0,
            sequence: 0,
            declared_size: 0,
            buffer: [0; MAX_FAST_PACKET_PAYLOAD],
            frame_presence: 0,
            required_frames: 0,
        }
    }

    /// Release the slot for future messages.
    fn release(&mut self) {
        self.in_use = false;
        self.declared_size = 0;
        self.frame_presence = 0;
        self.required_frames = 0;
        // No need to wipe the buffer; upcoming copies will overwrite it.
    }

    /// Drop a partial assembly but keep the slot bound to its key.
    fn restart(&mut self) {
        self.declared_size = 0;
        self.frame_presence = 0;
        self.required_frames = 0;
    }
}

/// Main assembler: owns a fixed pool of reusable slots keyed by
/// (PGN, source address).
#[derive(Debug)]
pub struct FastPacketAssembler {
    slots: [ReassemblySlot; SLOT_COUNT],
}

impl Default for FastPacketAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FastPacketAssembler {
    /// Instantiate the assembler with an empty slot pool.
    pub const fn new() -> Self {
        Self {
            slots: [ReassemblySlot::new(); SLOT_COUNT],
        }
    }

    //==================================================================================Process Functions

    /// Integrate one fast-packet sub-frame for the (pgn, source) stream.
    ///
    /// * `data` – raw payload of the CAN frame (8 bytes on the wire; shorter
    ///   frames are tolerated and their content clamped)
    ///
    /// Returns whether the frame was consumed or completed the message.
    pub fn ingest(
        &mut self,
        pgn: u32,
        source: u8,
        data: &[u8],
    ) -> Result<AssemblyResult, ReassemblyError> {
        if data.len() < 2 {
            return Err(ReassemblyError::FrameTooShort {
                pgn,
                len: data.len(),
            });
        }

        let frame_number = data[0] & 0x1F;
        let sequence = (data[0] >> 5) & 0x07;

        let slot_index = self
            .slots
            .iter()
            .position(|s| s.in_use && s.pgn == pgn && s.source == source)
            .or_else(|| self.slots.iter().position(|s| !s.in_use))
            .ok_or(ReassemblyError::OutOfReassemblyBuffers { slots: SLOT_COUNT })?;

        let slot = &mut self.slots[slot_index];
        if !slot.in_use {
            slot.in_use = true;
            slot.pgn = pgn;
            slot.source = source;
            slot.restart();
        }

        // A frame number seen twice invalidates the partial assembly; the
        // duplicate seeds the next one.
        if slot.frame_presence & (1 << frame_number) != 0 {
            warn!(
                "duplicate fast-packet frame {frame_number} for PGN {pgn} source {source}; restarting assembly"
            );
            slot.restart();
        }
        slot.sequence = sequence;

        if frame_number == 0 {
            // Frame 0 declares the total size and carries six content bytes.
            let declared = data[1] as usize;
            if declared == 0 || declared > MAX_FAST_PACKET_PAYLOAD {
                slot.release();
                return Err(ReassemblyError::DeclaredSizeOutOfRange {
                    size: declared,
                    max: MAX_FAST_PACKET_PAYLOAD,
                });
            }
            slot.declared_size = declared;
            slot.required_frames = (1u32 << (1 + declared / NEXT_FRAME_CONTENT)) - 1;

            let content = &data[2..data.len().min(2 + FIRST_FRAME_CONTENT)];
            slot.buffer[..content.len()].copy_from_slice(content);
        } else {
            let offset = FIRST_FRAME_CONTENT + NEXT_FRAME_CONTENT * (frame_number as usize - 1);
            let content = &data[1..data.len().min(1 + NEXT_FRAME_CONTENT)];
            // The 5-bit frame number keeps the offset inside the buffer, but
            // the copy is still clamped so no frame can write past it.
            let copy_len = content.len().min(MAX_FAST_PACKET_PAYLOAD - offset);
            slot.buffer[offset..offset + copy_len].copy_from_slice(&content[..copy_len]);
        }

        slot.frame_presence |= 1 << frame_number;

        // Complete once every required frame is present (the size must be
        // known, so frame 0 has been seen).
        if slot.required_frames != 0
            && slot.frame_presence & slot.required_frames == slot.required_frames
        {
            let mut payload = PgnBytes::new();
            payload.copy_from_slice(&slot.buffer[..slot.declared_size]);
            let completed = CompletedMessage {
                payload,
                sequence: slot.sequence,
            };
            slot.release();
            return Ok(AssemblyResult::Complete(completed));
        }

        Ok(AssemblyResult::FrameConsumed)
    }

    /// Out-of-band debug dump: one status record per in-use slot.
    pub fn dump(&self) -> Vec<SlotStatus> {
        self.slots
            .iter()
            .filter(|s| s.in_use)
            .map(|s| SlotStatus {
                pgn: s.pgn,
                source: s.source,
                declared_size: s.declared_size,
                frame_presence: s.frame_presence,
                required_frames: s.required_frames,
            })
            .collect()
    }
}
