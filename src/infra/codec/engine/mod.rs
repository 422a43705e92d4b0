//! Generic field decoding engine driven by the catalogue descriptors.
//! It controls the bit-level reader and turns raw payload bits into dynamic
//! [`FieldValue`]s, one decoder per field-type tag.
use log::{debug, warn};

use super::bits::{extract, BitReader};
use crate::core::{FieldDescriptor, FieldKind, FieldValue, LookupHandle, MAX_FIELDS_PER_PGN};
use crate::error::BitReaderError;
use crate::protocol::catalog::Registry;

/// Manufacturer-proprietary PGN bands. Fields flagged `proprietary` decode
/// only while the tracked reference PGN falls inside one of them.
pub const PROPRIETARY_PGN_BANDS: &[(u32, u32)] =
    &[(65280, 65535), (126720, 126975), (130816, 131071)];

//==================================================================================CONTEXT

/// Per-message decoding state. Variable-length fields depend on values seen
/// earlier in the same message, so the context travels with the field walk and
/// never outlives one `convert` call.
pub struct DecodeContext<'r> {
    pub registry: &'r Registry,
    /// Value of the last field literally named `PGN`; types subsequent
    /// `Variable` fields and gates proprietary ones.
    pub reference_pgn: Option<u32>,
    /// Value of the last field literally named `Length`; sizes subsequent
    /// variable-length binary fields.
    pub length: Option<usize>,
    /// Value of the last `FieldIndex` field; selects the referenced field for
    /// `Variable` decoding.
    pub field_index: Option<u8>,
    /// Field type selected by the last `FieldTypeLookup` key, consumed by the
    /// next `KeyValue` field.
    pub key_kind: Option<(FieldKind, u32)>,
    /// Decoded numeric values by 1-based field ordinal; feeds indirect
    /// lookups whose first key is an earlier field.
    ordinal_values: [Option<u64>; MAX_FIELDS_PER_PGN + 1],
}

impl<'r> DecodeContext<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            reference_pgn: None,
            length: None,
            field_index: None,
            key_kind: None,
            ordinal_values: [None; MAX_FIELDS_PER_PGN + 1],
        }
    }

    /// Record the numeric value decoded at a 1-based field ordinal.
    pub fn record_ordinal(&mut self, ordinal: usize, value: Option<u64>) {
        if ordinal <= MAX_FIELDS_PER_PGN {
            self.ordinal_values[ordinal] = value;
        }
    }

    /// Numeric value decoded at a 1-based field ordinal, when one was
    /// recorded. Also serves the converter's repeating-group counts.
    pub fn ordinal_value(&self, ordinal: u8) -> Option<u64> {
        self.ordinal_values.get(ordinal as usize).copied().flatten()
    }

    fn reference_is_proprietary(&self) -> bool {
        match self.reference_pgn {
            Some(pgn) => PROPRIETARY_PGN_BANDS
                .iter()
                .any(|&(lo, hi)| pgn >= lo && pgn <= hi),
            None => false,
        }
    }
}

//==================================================================================OUTCOME

/// Result of decoding one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// A live value to append to the output record.
    Value(FieldValue),
    /// The raw bits equal the "no data" sentinel; the field is simply omitted.
    Absent,
    /// Nothing to emit: reserved/spare filler or a proprietary field outside
    /// its band.
    Skipped,
}

/// Effective width in bits for a field: its own `size_bits`, or the
/// field-type default when the definition leaves it at zero.
pub fn effective_bits(registry: &Registry, field: &FieldDescriptor) -> u32 {
    if field.size_bits != 0 {
        field.size_bits
    } else {
        registry.field_type(field.kind).default_bits
    }
}

//==================================================================================DISPATCH

/// Decode the field starting at `start_bit` and report the bits consumed.
///
/// Consumption is driven by the payload for variable-length types. Errors are
/// bit-level only; per-field anomalies (unresolvable references, out-of-range
/// values) degrade to logged fallbacks instead of failing the message.
pub fn decode_field(
    ctx: &mut DecodeContext,
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    // Proprietary gate: skipped fields consume nothing.
    if field.proprietary && !ctx.reference_is_proprietary() {
        return Ok((FieldOutcome::Skipped, 0));
    }

    match field.kind {
        //==================== Filler ====================
        FieldKind::Spare | FieldKind::Reserved => {
            let bits = effective_bits(ctx.registry, field) as usize;
            Ok((FieldOutcome::Skipped, bits))
        }

        //==================== Numbers ====================
        FieldKind::Uint8
        | FieldKind::Uint16
        | FieldKind::Uint32
        | FieldKind::Int32
        | FieldKind::UnsignedInteger
        | FieldKind::Integer
        | FieldKind::Ufix8
        | FieldKind::Ufix16
        | FieldKind::Fix16
        | FieldKind::Date
        | FieldKind::Time
        | FieldKind::Duration
        | FieldKind::Pgn
        | FieldKind::Geo
        | FieldKind::Temperature
        | FieldKind::Pressure
        | FieldKind::Voltage
        | FieldKind::Current
        | FieldKind::Energy
        | FieldKind::Power
        | FieldKind::Distance
        | FieldKind::Length
        | FieldKind::Speed
        | FieldKind::Rotation
        | FieldKind::Angle
        | FieldKind::Volume
        | FieldKind::VolumetricFlow
        | FieldKind::Concentration
        | FieldKind::DilutionOfPrecision
        | FieldKind::SignalToNoiseRatio
        | FieldKind::RadioFrequency
        | FieldKind::Frequency
        | FieldKind::Percentage
        | FieldKind::Gain
        | FieldKind::MagneticField
        | FieldKind::PeukertExponent
        | FieldKind::ElectricCharge
        | FieldKind::Version => decode_number(ctx, payload, start_bit, field),

        FieldKind::FieldIndex => {
            let (outcome, consumed) = decode_number(ctx, payload, start_bit, field)?;
            // The decoded index selects the referenced field for subsequent
            // Variable fields.
            ctx.field_index = match &outcome {
                FieldOutcome::Value(value) => value.as_u64().map(|v| v as u8),
                _ => None,
            };
            Ok((outcome, consumed))
        }

        FieldKind::Mmsi => {
            let bits = effective_bits(ctx.registry, field);
            let extracted = extract(payload, start_bit, bits, false, 0)?;
            if extracted.raw == extracted.max {
                return Ok((FieldOutcome::Absent, bits as usize));
            }
            Ok((
                FieldOutcome::Value(FieldValue::Mmsi(extracted.raw as u32)),
                bits as usize,
            ))
        }

        FieldKind::Float => {
            let bits = effective_bits(ctx.registry, field);
            let mut reader = BitReader::new_at(payload, start_bit);
            let raw = reader.read_u64(bits.min(64) as u8)? as u32;
            if raw == u32::MAX {
                return Ok((FieldOutcome::Absent, bits as usize));
            }
            Ok((
                FieldOutcome::Value(FieldValue::Real(f32::from_bits(raw) as f64)),
                bits as usize,
            ))
        }

        FieldKind::Decimal => decode_decimal(payload, start_bit, field, ctx),

        //==================== Lookups ====================
        FieldKind::Lookup | FieldKind::Manufacturer | FieldKind::Industry => {
            let bits = effective_bits(ctx.registry, field);
            let extracted = extract(payload, start_bit, bits, false, 0)?;
            let raw = extracted.raw as u64;
            let label = match field.lookup_ref {
                Some(LookupHandle::Pair(table)) => table.label(raw as u32),
                _ => None,
            };
            let value = match label {
                Some(label) => FieldValue::Label { raw, label },
                // No label: the raw integer stands in.
                None => FieldValue::Unsigned(raw),
            };
            Ok((FieldOutcome::Value(value), bits as usize))
        }

        FieldKind::IndirectLookup => {
            let bits = effective_bits(ctx.registry, field);
            let extracted = extract(payload, start_bit, bits, false, 0)?;
            let raw = extracted.raw as u64;
            let label = match field.lookup_ref {
                Some(LookupHandle::Indirect { table, val1_order }) => {
                    let key1 = ctx.ordinal_value(val1_order).or_else(|| {
                        // The key field may sit after this one (the ISO
                        // device class does); extract it on demand from the
                        // owning definition's layout.
                        let def = ctx.registry.pgns().get(field.pgn_ref?)?;
                        let key_field = def.active_fields().get(val1_order as usize - 1)?;
                        extract(
                            payload,
                            key_field.bit_offset as usize,
                            effective_bits(ctx.registry, key_field),
                            false,
                            0,
                        )
                        .ok()
                        .map(|extracted| extracted.raw as u64)
                    });
                    key1.and_then(|key1| table.label(key1 as u32, raw as u32))
                }
                _ => None,
            };
            let value = match label {
                Some(label) => FieldValue::Label { raw, label },
                None => FieldValue::Unsigned(raw),
            };
            Ok((FieldOutcome::Value(value), bits as usize))
        }

        FieldKind::BitLookup => {
            let bits = effective_bits(ctx.registry, field);
            let extracted = extract(payload, start_bit, bits, false, 0)?;
            let raw = extracted.raw as u64;
            let mut labels = Vec::new();
            if let Some(LookupHandle::Bit(table)) = field.lookup_ref {
                for bit in 0..bits {
                    if raw & (1u64 << bit) != 0 {
                        if let Some(label) = table.label(bit) {
                            labels.push(label);
                        }
                    }
                }
            }
            Ok((
                FieldOutcome::Value(FieldValue::Flags { raw, labels }),
                bits as usize,
            ))
        }

        FieldKind::FieldTypeLookup => {
            let bits = effective_bits(ctx.registry, field);
            let extracted = extract(payload, start_bit, bits, false, 0)?;
            let raw = extracted.raw as u64;
            let selection = match field.lookup_ref {
                Some(LookupHandle::FieldType(table)) => table.select(raw as u32),
                _ => None,
            };
            // Arm the next KeyValue field with the selected type.
            ctx.key_kind = selection.map(|(_, kind, kind_bits)| (kind, kind_bits));
            let value = match selection {
                Some((label, _, _)) => FieldValue::Label { raw, label },
                None => FieldValue::Unsigned(raw),
            };
            Ok((FieldOutcome::Value(value), bits as usize))
        }

        //==================== Strings and binary ====================
        FieldKind::StringFix => decode_string_fix(payload, start_bit, field, ctx),
        FieldKind::StringLz => decode_string_lz(payload, start_bit),
        FieldKind::StringLau => decode_string_lau(payload, start_bit),
        FieldKind::Binary => decode_binary(payload, start_bit, field, ctx),

        //==================== Run-time typed ====================
        FieldKind::Variable => decode_variable(ctx, payload, start_bit, field),
        FieldKind::KeyValue => decode_key_value(ctx, payload, start_bit, field),
    }
}

//==================================================================================NUMBERS

fn decode_number(
    ctx: &mut DecodeContext,
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let descriptor = ctx.registry.field_type(field.kind);
    let bits = effective_bits(ctx.registry, field);
    let signed = field.has_sign || descriptor.signed;

    let extracted = extract(payload, start_bit, bits, signed, field.offset)?;

    // Sentinel: the maximum representable value means "no data". Fields with
    // `missing_is_one` use the all-ones bit pattern instead (the signed -1).
    let absent = if field.missing_is_one {
        extracted.raw == -1 || extracted.raw as u64 == (u64::MAX >> (64 - bits.min(64)))
    } else {
        extracted.raw == extracted.max
    };
    if absent {
        return Ok((FieldOutcome::Absent, bits as usize));
    }

    let resolution = if field.resolution != 0.0 {
        field.resolution
    } else {
        descriptor.default_resolution
    };

    if resolution != 0.0 && resolution != 1.0 {
        let scaled = extracted.raw as f64 * resolution + field.unit_offset;
        // Declared bounds demote out-of-range values to "no data".
        if field.range_min.is_some_and(|min| scaled < min)
            || field.range_max.is_some_and(|max| scaled > max)
        {
            debug!(
                "field {:?}: value {} outside declared range, treated as absent",
                field.name, scaled
            );
            return Ok((FieldOutcome::Absent, bits as usize));
        }
        return Ok((
            FieldOutcome::Value(FieldValue::Real(scaled)),
            bits as usize,
        ));
    }

    let value = if signed {
        FieldValue::Signed(extracted.raw)
    } else {
        FieldValue::Unsigned(extracted.raw as u64)
    };
    Ok((FieldOutcome::Value(value), bits as usize))
}

/// Binary-coded decimal: two digits per byte, most significant byte first.
fn decode_decimal(
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
    ctx: &DecodeContext,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let bits = effective_bits(ctx.registry, field);
    let bytes = (bits as usize).div_ceil(8);
    let mut reader = BitReader::new_at(payload, start_bit);
    let slice = reader.read_slice(bytes)?;

    if slice.iter().all(|&b| b == 0xFF) {
        return Ok((FieldOutcome::Absent, bytes * 8));
    }

    let mut value: u64 = 0;
    for &byte in slice {
        let high = (byte >> 4) as u64;
        let low = (byte & 0x0F) as u64;
        // Nibbles above 9 are not decimal; keep them as their numeric value
        // so malformed senders still produce a stable output.
        value = value * 100 + high * 10 + low;
    }
    Ok((
        FieldOutcome::Value(FieldValue::Unsigned(value)),
        bytes * 8,
    ))
}

//==================================================================================STRINGS

/// Strip the 0x00 / 0xFF / space padding a fixed string arrives with.
fn trim_string_padding(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], 0x00 | 0xFF | b' ' | b'@') {
        end -= 1;
    }
    &bytes[..end]
}

fn decode_string_fix(
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
    ctx: &DecodeContext,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let bits = effective_bits(ctx.registry, field);
    let declared = (bits as usize).div_ceil(8);
    let remaining = payload.len().saturating_sub(start_bit / 8);
    let bytes = declared.min(remaining);

    let mut reader = BitReader::new_at(payload, start_bit);
    let slice = reader.read_slice(bytes)?;
    let trimmed = trim_string_padding(slice);
    let text = String::from_utf8_lossy(trimmed).into_owned();
    Ok((FieldOutcome::Value(FieldValue::Text(text)), bytes * 8))
}

fn decode_string_lz(
    payload: &[u8],
    start_bit: usize,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let mut reader = BitReader::new_at(payload, start_bit);
    let declared = reader.read_u8(8)? as usize;
    let remaining = payload.len().saturating_sub(start_bit / 8 + 1);
    let len = declared.min(remaining);

    let slice = reader.read_slice(len)?;
    let trimmed = trim_string_padding(slice);
    let text = String::from_utf8_lossy(trimmed).into_owned();
    Ok((FieldOutcome::Value(FieldValue::Text(text)), 8 + len * 8))
}

fn decode_string_lau(
    payload: &[u8],
    start_bit: usize,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let mut reader = BitReader::new_at(payload, start_bit);
    let declared = reader.read_u8(8)? as usize;
    if declared == 0 {
        return Ok((FieldOutcome::Value(FieldValue::Text(String::new())), 8));
    }

    // Control byte: 0 = Unicode, 1 = ASCII. Both decode as UTF-8 here; the
    // distinction only matters when re-encoding.
    let _control = reader.read_u8(8)?;
    let remaining = payload.len().saturating_sub(start_bit / 8 + 2);
    let len = declared.saturating_sub(1).min(remaining);

    let slice = reader.read_slice(len)?;
    let trimmed = trim_string_padding(slice);
    let text = String::from_utf8_lossy(trimmed).into_owned();
    Ok((FieldOutcome::Value(FieldValue::Text(text)), 16 + len * 8))
}

//==================================================================================BINARY

/// Copy an arbitrary (possibly unaligned) bit run into a byte vector.
fn read_bits_to_vec(
    payload: &[u8],
    start_bit: usize,
    bits: usize,
) -> Result<Vec<u8>, BitReaderError> {
    let mut reader = BitReader::new_at(payload, start_bit);
    let mut out = Vec::with_capacity(bits.div_ceil(8));
    let mut left = bits;
    while left > 0 {
        let take = left.min(8) as u8;
        out.push(reader.read_u8(take)?);
        left -= take as usize;
    }
    Ok(out)
}

fn decode_binary(
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
    ctx: &DecodeContext,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let declared_bits = effective_bits(ctx.registry, field) as usize;

    let remaining_bits = (payload.len() * 8).saturating_sub(start_bit);
    let bits = if declared_bits != 0 {
        declared_bits.min(remaining_bits)
    } else if let Some(length) = ctx.length {
        // A preceding Length field sizes this one.
        (length * 8).min(remaining_bits)
    } else {
        // Variable binary fills the remainder of the payload.
        remaining_bits
    };

    if bits == 0 {
        return Ok((FieldOutcome::Value(FieldValue::Binary(Vec::new())), 0));
    }
    let data = read_bits_to_vec(payload, start_bit, bits)?;
    Ok((FieldOutcome::Value(FieldValue::Binary(data)), bits))
}

//==================================================================================RUN_TIME_TYPED

/// Opaque fallback when a run-time typed field cannot be resolved: one byte of
/// data, so the walk can continue in step with the sender.
fn opaque_fallback(
    payload: &[u8],
    start_bit: usize,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let data = read_bits_to_vec(payload, start_bit, 8)?;
    Ok((FieldOutcome::Value(FieldValue::Binary(data)), 8))
}

fn decode_variable(
    ctx: &mut DecodeContext,
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    // Borrow the referenced definition from the registry directly so the
    // context stays free for the recursive decode below.
    let registry = ctx.registry;
    let field_index = ctx.field_index;
    let referenced = ctx.reference_pgn.and_then(|pgn| {
        let index = registry.first_index_of(pgn)?;
        let def = &registry.pgns()[index];
        let ordinal = field_index? as usize;
        def.active_fields().get(ordinal.checked_sub(1)?)
    });

    let Some(referenced) = referenced else {
        warn!(
            "unresolvable variable field {:?} (reference PGN {:?}, index {:?}); decoding 8 opaque bits",
            field.name, ctx.reference_pgn, ctx.field_index
        );
        return opaque_fallback(payload, start_bit);
    };

    if referenced.kind == FieldKind::Variable || referenced.kind == FieldKind::KeyValue {
        warn!(
            "variable field {:?} references another run-time typed field; decoding 8 opaque bits",
            field.name
        );
        return opaque_fallback(payload, start_bit);
    }

    let (outcome, consumed) = decode_field(ctx, payload, start_bit, referenced)?;
    // Variable fields consume whole bytes regardless of the inner width.
    Ok((outcome, consumed.div_ceil(8) * 8))
}

fn decode_key_value(
    ctx: &mut DecodeContext,
    payload: &[u8],
    start_bit: usize,
    field: &FieldDescriptor,
) -> Result<(FieldOutcome, usize), BitReaderError> {
    let Some((kind, bits)) = ctx.key_kind.take() else {
        warn!(
            "key/value field {:?} has no preceding key; decoding 8 opaque bits",
            field.name
        );
        return opaque_fallback(payload, start_bit);
    };

    if kind == FieldKind::Variable || kind == FieldKind::KeyValue {
        warn!(
            "key for field {:?} selects a run-time typed kind; decoding 8 opaque bits",
            field.name
        );
        return opaque_fallback(payload, start_bit);
    }

    let synthetic = FieldDescriptor {
        name: field.name,
        kind,
        size_bits: bits,
        ..Default::default()
    };
    let (outcome, consumed) = decode_field(ctx, payload, start_bit, &synthetic)?;
    Ok((outcome, consumed.div_ceil(8) * 8))
}

//==================================================================================TESTS
