//! The PGN catalogue registry: descriptor arenas, numeric range rules, and
//! the start-up bootstrap that links, derives, and validates the tables.
//!
//! The registry is immutable once [`Registry::bootstrap`] returns and may be
//! shared freely between decoder instances.
use std::collections::HashMap;

use crate::core::{
    FieldKind, FieldTypeDescriptor, LookupHandle, LookupKind, LookupSpec, PacketType,
    PgnDescriptor, MAX_FIELDS_PER_PGN,
};
use crate::error::CatalogError;
use crate::protocol::lookups;

mod field_types;
mod pgns;

//==================================================================================RANGES

/// Registration authority owning a PGN range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAuthority {
    Iso11783,
    Nmea,
    Manufacturer,
}

/// One row of the PGN numbering plan.
#[derive(Debug, Clone, Copy)]
pub struct PgnRange {
    pub start: u32,
    pub end: u32,
    /// 256 for PDU1 (addressed) blocks, 1 for PDU2 (broadcast) blocks.
    pub step: u32,
    pub authority: RangeAuthority,
    pub packet_type: PacketType,
}

/// The declared PGN ranges and their transport rules.
pub static PGN_RANGES: &[PgnRange] = &[
    PgnRange {
        start: 0x0E800,
        end: 0x0EE00,
        step: 256,
        authority: RangeAuthority::Iso11783,
        packet_type: PacketType::Single,
    },
    PgnRange {
        start: 0x0EF00,
        end: 0x0EF00,
        step: 256,
        authority: RangeAuthority::Nmea,
        packet_type: PacketType::Single,
    },
    PgnRange {
        start: 0x0F000,
        end: 0x0FEFF,
        step: 1,
        authority: RangeAuthority::Nmea,
        packet_type: PacketType::Single,
    },
    PgnRange {
        start: 0x0FF00,
        end: 0x0FFFF,
        step: 1,
        authority: RangeAuthority::Manufacturer,
        packet_type: PacketType::Single,
    },
    PgnRange {
        start: 0x1ED00,
        end: 0x1EE00,
        step: 256,
        authority: RangeAuthority::Nmea,
        packet_type: PacketType::Fast,
    },
    PgnRange {
        start: 0x1EF00,
        end: 0x1EF00,
        step: 256,
        authority: RangeAuthority::Manufacturer,
        packet_type: PacketType::Fast,
    },
    PgnRange {
        start: 0x1F000,
        end: 0x1FEFF,
        step: 1,
        authority: RangeAuthority::Nmea,
        packet_type: PacketType::Mixed,
    },
    PgnRange {
        start: 0x1FF00,
        end: 0x1FFFF,
        step: 1,
        authority: RangeAuthority::Manufacturer,
        packet_type: PacketType::Fast,
    },
];

/// Base of the Actisense BEM pseudo-PGNs emitted by gateway hardware.
pub const ACTISENSE_BEM: u32 = 0xA0_0000;
/// Base of the iKonvert pseudo-PGNs.
pub const IKONVERT_BEM: u32 = 0xA1_0000;

/// PGNs at or above this base are analyser-internal messages, exempt from the
/// range validator.
const INTERNAL_PGN_BASE: u32 = if ACTISENSE_BEM < IKONVERT_BEM {
    ACTISENSE_BEM
} else {
    IKONVERT_BEM
};

/// Payload capacity in bits per transport class.
fn capacity_bits(packet_type: PacketType) -> u32 {
    match packet_type {
        PacketType::Single => 8 * 8,
        PacketType::Fast | PacketType::Mixed => 223 * 8,
        PacketType::IsoTp => 1785 * 8,
    }
}

/// The range a PGN belongs to, if any.
pub fn range_of(pgn: u32) -> Option<&'static PgnRange> {
    PGN_RANGES.iter().find(|r| pgn >= r.start && pgn <= r.end)
}

//==================================================================================REGISTRY

/// The catalogue: two arenas populated once at start-up, read-only thereafter.
/// Cross-references between fields, field types, and PGNs are arena indices.
#[derive(Debug)]
pub struct Registry {
    field_types: Vec<FieldTypeDescriptor>,
    pgns: Vec<PgnDescriptor>,
}

impl Registry {
    /// Build and validate the registry. Any failure is fatal: a registry that
    /// does not validate is never returned.
    pub fn bootstrap() -> Result<Self, CatalogError> {
        let field_types = field_types::descriptors();

        // Every tag in the closed set must have a descriptor, otherwise the
        // engine would face a field it cannot dispatch.
        for kind in FieldKind::ALL {
            if !field_types.iter().any(|ft| ft.kind == *kind) {
                return Err(CatalogError::MissingFieldTypeDescriptor { kind: *kind });
            }
        }

        let mut table = pgns::pgn_table();

        for (pgn_index, def) in table.iter_mut().enumerate() {
            let pgn = def.pgn;

            // Active entries stop at the first empty-name slot.
            def.field_count = def
                .fields
                .iter()
                .position(|f| f.name.is_empty())
                .unwrap_or(def.fields.len());

            if def.field_count > MAX_FIELDS_PER_PGN {
                return Err(CatalogError::TooManyFields {
                    pgn,
                    count: def.field_count,
                    max: MAX_FIELDS_PER_PGN,
                });
            }

            def.has_match_fields = def.fields[..def.field_count]
                .iter()
                .any(|f| f.match_constraint.is_some());
            def.camel_description = camel_case(def.description, true);

            let mut bit_offset = 0u32;
            let mut seen_names: HashMap<String, u32> = HashMap::new();

            for field in &mut def.fields[..def.field_count] {
                field.bit_offset = bit_offset;
                bit_offset += field.size_bits;
                field.pgn_ref = Some(pgn_index);
                field.field_type_ref = field_types.iter().position(|ft| ft.kind == field.kind);
                if field.field_type_ref.is_none() {
                    return Err(CatalogError::MissingFieldTypeDescriptor { kind: field.kind });
                }

                if let Some(spec) = field.lookup {
                    field.lookup_ref = Some(resolve_lookup(pgn, field.name, spec)?);
                }

                // Identifier form, with numeric suffixes keeping repeated
                // Reserved/Spare names unique within the PGN.
                let camel = camel_case(field.name, false);
                let occurrence = seen_names.entry(camel.clone()).or_insert(0);
                *occurrence += 1;
                field.camel_name = if *occurrence > 1 {
                    format!("{camel}{occurrence}")
                } else {
                    camel
                };
            }
        }

        let registry = Self {
            field_types,
            pgns: table,
        };
        registry.validate()?;
        Ok(registry)
    }

    /// All PGN definitions in catalogue order.
    pub fn pgns(&self) -> &[PgnDescriptor] {
        &self.pgns
    }

    /// The field-type descriptor table.
    pub fn field_types(&self) -> &[FieldTypeDescriptor] {
        &self.field_types
    }

    /// Per-tag defaults. Coverage of the whole tag set is a bootstrap
    /// invariant, so the descriptor always exists.
    pub fn field_type(&self, kind: FieldKind) -> &FieldTypeDescriptor {
        self.field_types
            .iter()
            .find(|ft| ft.kind == kind)
            .expect("field-type coverage validated at bootstrap")
    }

    /// Index of the first catalogue entry carrying `pgn`, if any.
    pub fn first_index_of(&self, pgn: u32) -> Option<usize> {
        let idx = self.pgns.partition_point(|d| d.pgn < pgn);
        (idx < self.pgns.len() && self.pgns[idx].pgn == pgn).then_some(idx)
    }

    //==================================================================================VALIDATION

    /// The invariant check run at the end of bootstrap.
    fn validate(&self) -> Result<(), CatalogError> {
        for (i, def) in self.pgns.iter().enumerate() {
            // Ascending catalogue order; fallbacks close their block.
            if i > 0 {
                let previous = &self.pgns[i - 1];
                if def.pgn < previous.pgn {
                    return Err(CatalogError::OutOfOrder {
                        pgn: def.pgn,
                        previous: previous.pgn,
                    });
                }
                if previous.pgn == def.pgn && previous.fallback {
                    return Err(CatalogError::FallbackNotLast { pgn: def.pgn });
                }
            }

            // Range membership and transport compatibility. Fallbacks stand
            // for a whole range and internal pseudo-PGNs sit outside the plan.
            if !def.fallback && def.pgn < INTERNAL_PGN_BASE {
                let range =
                    range_of(def.pgn).ok_or(CatalogError::OutsideDeclaredRanges { pgn: def.pgn })?;

                let compatible = range.packet_type == PacketType::Mixed
                    || def.packet_type == range.packet_type
                    || def.packet_type == PacketType::IsoTp;
                if !compatible {
                    return Err(CatalogError::PacketTypeMismatch { pgn: def.pgn });
                }

                if range.step == 256 && def.pgn & 0xFF != 0 {
                    return Err(CatalogError::Pdu1LowByteNotZero { pgn: def.pgn });
                }
            }

            // One iteration of the field list must fit the transport.
            let bits: u32 = def.active_fields().iter().map(|f| f.size_bits).sum();
            if bits > capacity_bits(def.packet_type) {
                return Err(CatalogError::PayloadCapacityExceeded { pgn: def.pgn, bits });
            }
        }
        Ok(())
    }
}

/// Resolve a by-name lookup reference against the static tables.
fn resolve_lookup(
    pgn: u32,
    field: &'static str,
    spec: LookupSpec,
) -> Result<LookupHandle, CatalogError> {
    let missing = CatalogError::UnknownLookupTable {
        pgn,
        field,
        table: spec.table,
    };
    match spec.kind {
        LookupKind::Pair => lookups::pair_table(spec.table)
            .map(LookupHandle::Pair)
            .ok_or(missing),
        LookupKind::Bit => lookups::bit_table(spec.table)
            .map(LookupHandle::Bit)
            .ok_or(missing),
        LookupKind::Triplet => {
            let table = lookups::indirect_table(spec.table).ok_or(missing)?;
            let val1_order = spec.val1_order.ok_or(CatalogError::LookupKindMismatch {
                pgn,
                field,
                table: spec.table,
            })?;
            Ok(LookupHandle::Indirect { table, val1_order })
        }
        LookupKind::FieldType => lookups::field_type_table(spec.table)
            .map(LookupHandle::FieldType)
            .ok_or(missing),
    }
}

//==================================================================================NAME_HELPERS

/// Convert a display name into a camelCase identifier. `upper_first` selects
/// UpperCamelCase (PGN descriptions) over lowerCamelCase (field names).
fn camel_case(name: &str, upper_first: bool) -> String {
    let mut buffer = String::new();
    let mut capitalize_next = upper_first;

    for c in name.chars() {
        match c {
            '#' => {
                buffer.push_str(if buffer.is_empty() && !upper_first {
                    "number"
                } else {
                    "Number"
                });
                capitalize_next = true;
            }
            '%' => {
                buffer.push_str(if buffer.is_empty() && !upper_first {
                    "percent"
                } else {
                    "Percent"
                });
                capitalize_next = true;
            }
            _ if c.is_ascii_alphanumeric() => {
                if capitalize_next {
                    buffer.push(c.to_ascii_uppercase());
                    capitalize_next = false;
                } else {
                    buffer.push(c.to_ascii_lowercase());
                }
                if c.is_ascii_digit() {
                    capitalize_next = true;
                }
            }
            // Every other character separates words.
            _ => capitalize_next = true,
        }
    }
    buffer
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
