//! The message converter: top-level loop that feeds captured frames through
//! reassembly, resolves the catalogue variant, walks the definition's field
//! list, and produces a decoded record.
use log::debug;

use crate::core::{PacketType, PgnDescriptor, NO_REPEAT_FIELD};
use crate::error::{BitReaderError, DecodeError};
use crate::infra::codec::engine::{decode_field, DecodeContext, FieldOutcome};
use crate::protocol::catalog::{range_of, Registry};
use crate::protocol::messages::{DecodedMessage, DecodedRecord};
use crate::protocol::resolver::resolve;
use crate::protocol::transport::fast_packet::assembler::{
    AssemblyResult, FastPacketAssembler, SlotStatus,
};
use crate::protocol::transport::frame::RawFrame;

//==================================================================================DECODER

/// One decoder instance: a borrowed catalogue plus the per-instance mutable
/// reassembly state. Not re-entrant; wrap it in a mutex to share it.
pub struct Decoder<'r> {
    registry: &'r Registry,
    assembler: FastPacketAssembler,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            assembler: FastPacketAssembler::new(),
        }
    }

    /// Submit one captured frame record in arrival order.
    ///
    /// Returns `Ok(None)` while a fast-packet message is still collecting
    /// sub-frames; every other outcome is a decoded message or an error.
    pub fn process(&mut self, frame: &RawFrame) -> Result<Option<DecodedMessage>, DecodeError> {
        // The transport class comes from the catalogue, or from the numbering
        // plan when the PGN has no specific entry.
        let packet_type = self
            .registry
            .first_index_of(frame.pgn)
            .map(|index| self.registry.pgns()[index].packet_type)
            .or_else(|| range_of(frame.pgn).map(|range| range.packet_type))
            .unwrap_or(PacketType::Single);

        // Only fast-packet sub-frames pass through the reassembler; payloads
        // longer than one frame were already coalesced upstream.
        if packet_type == PacketType::Fast && frame.data.len() <= 8 {
            match self.assembler.ingest(frame.pgn, frame.source, &frame.data)? {
                AssemblyResult::FrameConsumed => Ok(None),
                AssemblyResult::Complete(message) => self
                    .convert(frame, message.payload.as_slice())
                    .map(Some),
            }
        } else {
            self.convert(frame, &frame.data).map(Some)
        }
    }

    /// Decode a complete payload against the catalogue.
    pub fn convert(
        &self,
        frame: &RawFrame,
        payload: &[u8],
    ) -> Result<DecodedMessage, DecodeError> {
        let def = resolve(self.registry, frame.pgn, payload)?;

        let mut message = DecodedMessage {
            timestamp: frame.timestamp,
            priority: frame.priority,
            source: frame.source,
            destination: frame.destination,
            pgn: frame.pgn,
            description: def.description,
            fields: DecodedRecord::new(),
            list: Vec::new(),
            list2: Vec::new(),
        };

        // A definition without fields yields a header-only record.
        if def.field_count == 0 {
            return Ok(message);
        }

        if payload.is_empty() {
            let bits: u32 = def.active_fields().iter().map(|f| f.size_bits).sum();
            return Err(DecodeError::TruncatedPayload {
                pgn: frame.pgn,
                expected: (bits as usize).div_ceil(8),
                actual: 0,
            });
        }

        walk_fields(self.registry, def, payload, &mut message)?;
        Ok(message)
    }

    /// Out-of-band debug dump of the reassembly slot pool.
    pub fn dump_reassembly(&self) -> Vec<SlotStatus> {
        self.assembler.dump()
    }
}

//==================================================================================FIELD_WALK

/// Which repetitions a group performs, resolved when the walk enters it.
#[derive(Debug, Clone, Copy)]
enum Reps {
    /// No declared count: repeat until the payload runs out.
    Unbounded,
    Count(u64),
}

/// One repeating-group control block, 1-based like the descriptors.
#[derive(Debug, Clone, Copy)]
struct Group {
    start: usize,
    size: usize,
    count_field: u8,
}

impl Group {
    fn from_descriptor(count: u8, start: u8, count_field: u8) -> Option<Self> {
        (count > 0).then_some(Self {
            start: start as usize,
            size: count as usize,
            count_field,
        })
    }

    /// 1-based ordinal of the group's last field.
    fn end(&self) -> usize {
        self.start + self.size - 1
    }
}

/// Walk the definition's field list over the payload, filling the message's
/// top-level record and its repeating-group lists.
fn walk_fields(
    registry: &Registry,
    def: &PgnDescriptor,
    payload: &[u8],
    message: &mut DecodedMessage,
) -> Result<(), DecodeError> {
    let fields = def.active_fields();
    let groups = [
        Group::from_descriptor(
            def.repeating_count_1,
            def.repeating_start_1,
            def.repeating_field_1,
        ),
        Group::from_descriptor(
            def.repeating_count_2,
            def.repeating_start_2,
            def.repeating_field_2,
        ),
    ];

    let mut ctx = DecodeContext::new(registry);
    // Run-time repetition counts, overridable by "# of Parameters" fields.
    let mut variable_field_repeat: [u64; 2] = [255, 0];
    let mut params_fields_seen = 0usize;

    let mut entered = [false; 2];
    let mut active: Option<usize> = None;
    let mut reps = Reps::Count(0);
    let mut repetition: u64 = 0;
    let mut pending = DecodedRecord::new();

    let mut start_bit = 0usize;
    let mut i = 0usize;

    'walk: while i < fields.len() && start_bit / 8 < payload.len() {
        let ordinal = i + 1;

        // Entering a repeating group resolves its repetition count.
        for (k, group) in groups.iter().enumerate() {
            let Some(group) = group else { continue };
            if ordinal != group.start || entered[k] {
                continue;
            }
            entered[k] = true;
            if k == 1 && !pending.is_empty() {
                // Opening the second group flushes the first group's pending
                // record.
                message.list.push(std::mem::take(&mut pending));
            }
            repetition = 0;
            reps = if group.count_field != NO_REPEAT_FIELD {
                Reps::Count(ctx.ordinal_value(group.count_field).unwrap_or(0))
            } else {
                match variable_field_repeat[k] {
                    255 => Reps::Unbounded,
                    n => Reps::Count(n),
                }
            };
            if let Reps::Count(0) = reps {
                // Empty group: step over its fields.
                i = group.end();
                continue 'walk;
            }
            active = Some(k);
        }

        let field = &fields[i];
        // A nameless slot terminates the walk.
        if field.name.is_empty() && field.camel_name.is_empty() {
            break;
        }

        let (outcome, consumed) = match decode_field(&mut ctx, payload, start_bit, field) {
            Ok(pair) => pair,
            Err(BitReaderError::OutOfBounds { .. }) => {
                // Senders may truncate trailing fields; tolerated.
                debug!(
                    "PGN {}: payload ends inside field {:?}",
                    def.pgn, field.name
                );
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let numeric = match &outcome {
            FieldOutcome::Value(value) => value.as_u64(),
            _ => None,
        };
        ctx.record_ordinal(ordinal, numeric);

        if let FieldOutcome::Value(value) = outcome {
            // Side-band metadata travels by field name.
            if field.name == "PGN" {
                ctx.reference_pgn = numeric.map(|v| v as u32);
            } else if field.name == "Length" {
                ctx.length = numeric.map(|v| v as usize);
            } else if field.name == "# of Parameters" {
                if let Some(count) = numeric {
                    if params_fields_seen < variable_field_repeat.len() {
                        variable_field_repeat[params_fields_seen] = count;
                        params_fields_seen += 1;
                    }
                }
            }

            match active {
                Some(_) => pending.push(field.name, value),
                None => message.fields.push(field.name, value),
            }
        }

        start_bit += consumed;

        // Wrap or leave the active group at its last field.
        if let Some(k) = active {
            if let Some(group) = groups[k] {
                if ordinal == group.end() {
                    let record = std::mem::take(&mut pending);
                    if !record.is_empty() {
                        group_list(message, k).push(record);
                    }
                    repetition += 1;
                    let more = match reps {
                        Reps::Unbounded => true,
                        Reps::Count(n) => repetition < n,
                    };
                    if more {
                        i = group.start - 1;
                        continue 'walk;
                    }
                    active = None;
                }
            }
        }

        i += 1;
    }

    // Flush a trailing, partially filled sub-record.
    if !pending.is_empty() {
        let k = active.unwrap_or(0);
        group_list(message, k).push(pending);
    }

    Ok(())
}

fn group_list(message: &mut DecodedMessage, index: usize) -> &mut Vec<DecodedRecord> {
    if index == 0 {
        &mut message.list
    } else {
        &mut message.list2
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
