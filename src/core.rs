//! Defines the "data contract" between the PGN catalogue (the scribe) and
//! the decoding engine (the interpreter).
//!
//! The catalogue module builds descriptors that implement this contract.
//! The `engine` and `converter` modules consume those descriptors to turn raw
//! payloads into decoded records.

use bitflags::bitflags;

/// Maximum payload size for [`PgnBytes`]. 223 bytes + safety margin.
pub const MAX_PGN_BYTES: usize = 230;

/// Hard ceiling on the number of fields a single PGN may declare.
/// Checked at catalogue-build time; overflow aborts bootstrap.
pub const MAX_FIELDS_PER_PGN: usize = 33;

/// Semantic type of a field within a PGN.
///
/// This is the closed tag set the catalogue is allowed to use. The decoding
/// engine matches exhaustively on it, so a tag without a decoder does not
/// compile. Attributes common to all fields of one tag (default size, default
/// resolution, signedness) live in the [`FieldTypeDescriptor`] table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FieldKind {
    /// Unsigned integer, 8 bits.
    Uint8,
    /// Unsigned integer, 16 bits.
    Uint16,
    /// Unsigned integer, 32 bits.
    Uint32,
    /// Signed integer, 32 bits.
    Int32,
    /// Unsigned integer whose width comes from the field definition.
    UnsignedInteger,
    /// Signed integer whose width comes from the field definition.
    Integer,
    /// Unsigned fixed-point, 8 bits, field-supplied resolution.
    Ufix8,
    /// Unsigned fixed-point, 16 bits, field-supplied resolution.
    Ufix16,
    /// Signed fixed-point, 16 bits, field-supplied resolution.
    Fix16,
    /// IEEE-754 single-precision float, little-endian within the field.
    Float,
    /// Days since 1970-01-01. 16 bits; absent at `u16::MAX`.
    Date,
    /// Seconds since midnight UTC. Resolution 0.0001 s, 32 bits; absent at `u32::MAX`.
    Time,
    /// Time interval. Width and resolution from the field definition.
    Duration,
    /// Fixed-length ASCII string padded with 0x00, 0xFF, or spaces.
    StringFix,
    /// Variable-length string prefixed by a length byte.
    StringLz,
    /// Variable-length string prefixed by total-length and control bytes
    /// (0 = Unicode, 1 = ASCII).
    StringLau,
    /// Raw bit-string, rendered as hex.
    Binary,
    /// Binary-coded decimal, two digits per byte.
    Decimal,
    /// Value is an index into a dedicated enumeration.
    Lookup,
    /// Bitfield where each individual bit is a flag.
    BitLookup,
    /// Lookup resolved through another field's value (e.g. device function
    /// keyed by device class).
    IndirectLookup,
    /// The raw value selects another field type, consumed by a subsequent
    /// `KeyValue` field.
    FieldTypeLookup,
    /// 11-bit manufacturer code with its own lookup table.
    Manufacturer,
    /// 3-bit industry code with its own lookup table.
    Industry,
    /// Maritime Mobile Service Identity. 32 bits, rendered as 9 digits.
    Mmsi,
    /// 24-bit Parameter Group Number value.
    Pgn,
    /// 1-based index of a field within a referenced PGN; selector for
    /// subsequent `Variable` fields.
    FieldIndex,
    /// Field typed at run time by a reference PGN + field index pair.
    Variable,
    /// Field typed at run time by a preceding `FieldTypeLookup` key.
    KeyValue,
    /// Unused bits, transmitted as zeros.
    Spare,
    /// Unused bits, transmitted as ones.
    Reserved,
    //==================== Domain-scaled numeric families ====================
    /// Geographic coordinate; 1e-7 deg at 32 bits, 1e-16 deg at 64 bits.
    Geo,
    /// Temperature in kelvin.
    Temperature,
    /// Pressure in pascal.
    Pressure,
    /// Electric potential in volt.
    Voltage,
    /// Electric current in ampere.
    Current,
    /// Energy in kilowatt-hour.
    Energy,
    /// Power in watt.
    Power,
    /// Distance in metre, coarse scale.
    Distance,
    /// Length in metre, fine scale.
    Length,
    /// Speed in metre per second.
    Speed,
    /// Rotation rate in radian per second.
    Rotation,
    /// Angle in radian.
    Angle,
    /// Volume in litre.
    Volume,
    /// Volumetric flow in litre per hour.
    VolumetricFlow,
    /// Concentration in parts per million.
    Concentration,
    /// Dilution of precision, dimensionless.
    DilutionOfPrecision,
    /// Signal-to-noise ratio in decibel.
    SignalToNoiseRatio,
    /// Radio frequency in hertz, coarse scale.
    RadioFrequency,
    /// Frequency in hertz.
    Frequency,
    /// Percentage.
    Percentage,
    /// Gain, dimensionless ratio.
    Gain,
    /// Magnetic field in tesla.
    MagneticField,
    /// Peukert exponent, dimensionless.
    PeukertExponent,
    /// Electric charge in coulomb.
    ElectricCharge,
    /// Protocol or product version, scaled integer.
    Version,
}

impl FieldKind {
    /// Every tag the catalogue may carry, in declaration order. Drives the
    /// bootstrap check that a [`FieldTypeDescriptor`] exists for each tag.
    pub const ALL: &'static [FieldKind] = &[
        FieldKind::Uint8,
        FieldKind::Uint16,
        FieldKind::Uint32,
        FieldKind::Int32,
        FieldKind::UnsignedInteger,
        FieldKind::Integer,
        FieldKind::Ufix8,
        FieldKind::Ufix16,
        FieldKind::Fix16,
        FieldKind::Float,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::Duration,
        FieldKind::StringFix,
        FieldKind::StringLz,
        FieldKind::StringLau,
        FieldKind::Binary,
        FieldKind::Decimal,
        FieldKind::Lookup,
        FieldKind::BitLookup,
        FieldKind::IndirectLookup,
        FieldKind::FieldTypeLookup,
        FieldKind::Manufacturer,
        FieldKind::Industry,
        FieldKind::Mmsi,
        FieldKind::Pgn,
        FieldKind::FieldIndex,
        FieldKind::Variable,
        FieldKind::KeyValue,
        FieldKind::Spare,
        FieldKind::Reserved,
        FieldKind::Geo,
        FieldKind::Temperature,
        FieldKind::Pressure,
        FieldKind::Voltage,
        FieldKind::Current,
        FieldKind::Energy,
        FieldKind::Power,
        FieldKind::Distance,
        FieldKind::Length,
        FieldKind::Speed,
        FieldKind::Rotation,
        FieldKind::Angle,
        FieldKind::Volume,
        FieldKind::VolumetricFlow,
        FieldKind::Concentration,
        FieldKind::DilutionOfPrecision,
        FieldKind::SignalToNoiseRatio,
        FieldKind::RadioFrequency,
        FieldKind::Frequency,
        FieldKind::Percentage,
        FieldKind::Gain,
        FieldKind::MagneticField,
        FieldKind::PeukertExponent,
        FieldKind::ElectricCharge,
        FieldKind::Version,
    ];
}

/// Transport class of a PGN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    /// Eight-byte single frame.
    Single,
    /// Multi-frame fast packet, up to 223 bytes.
    Fast,
    /// SAE J1939 ISO Transport Protocol.
    IsoTp,
    /// Range marker: both single-frame and fast-packet PGNs live here.
    Mixed,
}

bitflags! {
    /// Informational completeness markers carried by a PGN definition.
    /// A non-empty set means the definition is at least partly unverified.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CompletenessFlags: u8 {
        const FIELDS_UNKNOWN         = 1 << 0;
        const LENGTHS_UNKNOWN        = 1 << 1;
        const RESOLUTION_UNKNOWN     = 1 << 2;
        const LOOKUPS_UNKNOWN        = 1 << 3;
        const INTERVAL_UNKNOWN       = 1 << 4;
        const MISSING_COMPANY_FIELDS = 1 << 5;
        const NOT_SEEN               = 1 << 6;
        const PDF_ONLY               = 1 << 7;
    }
}

//==================================================================================LOOKUP_TABLES

/// Flat enumeration: raw value → label.
#[derive(Debug)]
pub struct LookupTable {
    /// Table identifier, referenced by name from field definitions.
    pub name: &'static str,
    /// Sorted ascending by raw value.
    pub entries: &'static [(u32, &'static str)],
}

impl LookupTable {
    /// Label for a raw value, if the table declares one.
    pub fn label(&self, raw: u32) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&raw, |(v, _)| *v)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Reverse lookup: label → raw value. Used by the by-fields variant
    /// resolver.
    pub fn reverse(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(v, _)| *v)
    }
}

/// Two-key enumeration: (value of an earlier field, raw value) → label.
#[derive(Debug)]
pub struct IndirectLookupTable {
    pub name: &'static str,
    /// Sorted ascending by (key1, raw).
    pub entries: &'static [(u32, u32, &'static str)],
}

impl IndirectLookupTable {
    /// Label for (key1, raw), if declared.
    pub fn label(&self, key1: u32, raw: u32) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&(key1, raw), |(k, v, _)| (*k, *v))
            .ok()
            .map(|i| self.entries[i].2)
    }
}

/// Enumeration whose values select a field type instead of a label.
/// Consumed by `KeyValue` fields chained after a `FieldTypeLookup` key.
#[derive(Debug)]
pub struct FieldTypeLookupTable {
    pub name: &'static str,
    /// (raw, label, selected kind, selected width in bits), sorted by raw.
    pub entries: &'static [(u32, &'static str, FieldKind, u32)],
}

impl FieldTypeLookupTable {
    /// Selected (label, kind, bits) for a raw key value.
    pub fn select(&self, raw: u32) -> Option<(&'static str, FieldKind, u32)> {
        self.entries
            .binary_search_by_key(&raw, |(v, ..)| *v)
            .ok()
            .map(|i| {
                let (_, label, kind, bits) = self.entries[i];
                (label, kind, bits)
            })
    }
}

/// Lookup category used by a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Flat value → label pair table.
    Pair,
    /// Bitfield; each set bit contributes its label.
    Bit,
    /// Table keyed by (earlier field value, raw value).
    Triplet,
    /// Table selecting a field type for a chained `KeyValue` field.
    FieldType,
}

/// Unresolved lookup reference as written in the catalogue tables.
/// Bootstrap resolves the name into a [`LookupHandle`]; an unknown name
/// aborts start-up.
#[derive(Debug, Clone, Copy)]
pub struct LookupSpec {
    pub kind: LookupKind,
    pub table: &'static str,
    /// For `Triplet`: 1-based ordinal of the field supplying the first key.
    pub val1_order: Option<u8>,
}

/// Resolved lookup handle, filled in at bootstrap.
#[derive(Debug, Clone, Copy)]
pub enum LookupHandle {
    Pair(&'static LookupTable),
    Bit(&'static LookupTable),
    Indirect {
        table: &'static IndirectLookupTable,
        /// 1-based ordinal of the field supplying the first key.
        val1_order: u8,
    },
    FieldType(&'static FieldTypeLookupTable),
}

//==================================================================================FIELD_DESCRIPTOR

/// Descriptor for a single PGN field.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// Display name. An empty name terminates the active field list.
    pub name: &'static str,
    /// Identifier form, derived at bootstrap (lowerCamelCase, repeated
    /// Reserved/Spare names disambiguated with a numeric suffix).
    pub camel_name: String,
    /// Field width in bits. 0 means variable, resolved at decode time.
    pub size_bits: u32,
    /// Cumulative start bit within the payload, derived at bootstrap from the
    /// ordered sum of preceding widths.
    pub bit_offset: u32,
    /// Semantic tag driving the decoder dispatch.
    pub kind: FieldKind,
    /// Scale factor. 0 means the field type supplies it, or the field is
    /// non-numeric.
    pub resolution: f64,
    /// Excess-K bias: decoded = raw + offset. Nonzero only for J1939
    /// offset-binary fields.
    pub offset: i64,
    /// Display-unit translation applied after scaling (e.g. K → °C).
    pub unit_offset: f64,
    /// Decimal digits to render.
    pub precision: u8,
    /// Interpret the raw integer as two's complement.
    pub has_sign: bool,
    /// Physical unit for display.
    pub unit: Option<&'static str>,
    /// Equality constraint used to disambiguate PGN-number collisions.
    pub match_constraint: Option<i64>,
    /// Optional numeric bounds; values outside are treated as absent.
    pub range_min: Option<f64>,
    pub range_max: Option<f64>,
    /// Lookup reference by table name, as written in the catalogue.
    pub lookup: Option<LookupSpec>,
    /// Resolved lookup handle, filled at bootstrap.
    pub lookup_ref: Option<LookupHandle>,
    /// Decode only while the tracked reference PGN lies in a
    /// manufacturer-proprietary band.
    pub proprietary: bool,
    /// Arena index of the owning field-type descriptor, linked at bootstrap.
    pub field_type_ref: Option<usize>,
    /// Arena index of the containing PGN, linked at bootstrap. Diagnostics only.
    pub pgn_ref: Option<usize>,
    /// The absent-value sentinel is all-ones rather than the default.
    pub missing_is_one: bool,
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self {
            name: "",
            camel_name: String::new(),
            size_bits: 0,
            bit_offset: 0,
            kind: FieldKind::Reserved,
            resolution: 0.0,
            offset: 0,
            unit_offset: 0.0,
            precision: 0,
            has_sign: false,
            unit: None,
            match_constraint: None,
            range_min: None,
            range_max: None,
            lookup: None,
            lookup_ref: None,
            proprietary: false,
            field_type_ref: None,
            pgn_ref: None,
            missing_is_one: false,
        }
    }
}

//==================================================================================FIELD_TYPE_DESCRIPTOR

/// Attributes common to all fields sharing one [`FieldKind`] tag.
/// Constitutes the leaves of the decoding dispatch.
#[derive(Debug, Clone, Copy)]
pub struct FieldTypeDescriptor {
    pub kind: FieldKind,
    /// Canonical tag name as the catalogue sources spell it.
    pub name: &'static str,
    /// Default width in bits. 0 means the field definition must supply one
    /// (or the width is discovered in the payload).
    pub default_bits: u32,
    /// Default scale factor. 0 means none.
    pub default_resolution: f64,
    /// Raw values are two's complement unless the field overrides.
    pub signed: bool,
    /// Tag carries a lookup table requirement.
    pub has_lookup: bool,
    /// Tag is recursively typed: the concrete type arrives with the payload
    /// (`Variable` / `KeyValue`).
    pub print_variable: bool,
    /// Default physical unit.
    pub unit: Option<&'static str>,
}

//==================================================================================PGN_DESCRIPTOR

/// Value for "no such field" in the repeating-group controls.
pub const NO_REPEAT_FIELD: u8 = 255;

/// Descriptor for an entire PGN layout.
#[derive(Debug)]
pub struct PgnDescriptor {
    /// PGN identifier. The top byte distinguishes PDU1 (addressed) from PDU2
    /// (broadcast).
    pub pgn: u32,
    /// User-facing description.
    pub description: &'static str,
    /// UpperCamelCase identifier form, derived at bootstrap.
    pub camel_description: String,
    /// Informational completeness markers.
    pub completeness: CompletenessFlags,
    /// Transport class.
    pub packet_type: PacketType,
    /// Ordered field list, at most [`MAX_FIELDS_PER_PGN`] entries.
    pub fields: Vec<FieldDescriptor>,
    /// Active entries: computed at bootstrap by scanning to the first
    /// empty-name slot.
    pub field_count: usize,
    /// Catch-all for unrecognised PGNs within a range.
    pub fallback: bool,
    /// Several definitions share this PGN number and must be disambiguated
    /// through match constraints. Computed at bootstrap.
    pub has_match_fields: bool,
    /// First repeating group: number of fields that repeat.
    pub repeating_count_1: u8,
    /// First repeating group: 1-based ordinal of its first field.
    pub repeating_start_1: u8,
    /// First repeating group: 1-based ordinal of the repetition-count field,
    /// [`NO_REPEAT_FIELD`] when the count comes from the payload length.
    pub repeating_field_1: u8,
    /// Second repeating group, same conventions.
    pub repeating_count_2: u8,
    pub repeating_start_2: u8,
    pub repeating_field_2: u8,
    /// Declared transmission cadence. `u16::MAX` = never, 0 = unknown.
    pub interval_ms: u16,
}

impl Default for PgnDescriptor {
    fn default() -> Self {
        Self {
            pgn: 0,
            description: "",
            camel_description: String::new(),
            completeness: CompletenessFlags::empty(),
            packet_type: PacketType::Single,
            fields: Vec::new(),
            field_count: 0,
            fallback: false,
            has_match_fields: false,
            repeating_count_1: 0,
            repeating_start_1: 0,
            repeating_field_1: NO_REPEAT_FIELD,
            repeating_count_2: 0,
            repeating_start_2: 0,
            repeating_field_2: NO_REPEAT_FIELD,
            interval_ms: 0,
        }
    }
}

impl PgnDescriptor {
    /// Active field slice (entries before the first empty-name slot).
    pub fn active_fields(&self) -> &[FieldDescriptor] {
        &self.fields[..self.field_count]
    }
}

//==================================================================================PGN_BYTES

/// Fixed-capacity payload buffer sized for the largest fast-packet message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgnBytes {
    pub len: usize,
    pub data: [u8; MAX_PGN_BYTES],
}

impl Default for PgnBytes {
    fn default() -> Self {
        Self {
            len: 0,
            data: [0; MAX_PGN_BYTES],
        }
    }
}

impl PgnBytes {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            len: 0,
            data: [0; MAX_PGN_BYTES],
        }
    }

    /// Number of valid bytes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy bytes into the buffer and update `len`.
    #[inline]
    pub fn copy_from_slice(&mut self, slice: &[u8]) {
        let clamped = slice.len().min(MAX_PGN_BYTES);
        self.data[..clamped].copy_from_slice(&slice[..clamped]);
        self.len = clamped;
    }

    /// Immutable view over the populated bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

//==================================================================================FIELD_VALUE

/// A decoded field value as it appears in the output record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Unscaled unsigned integer.
    Unsigned(u64),
    /// Unscaled signed integer.
    Signed(i64),
    /// Scaled physical value.
    Real(f64),
    /// Decoded string (STRING_FIX / STRING_LZ / STRING_LAU).
    Text(String),
    /// Lookup hit: raw value plus its label.
    Label { raw: u64, label: &'static str },
    /// Bit lookup: raw value plus the labels of every set bit.
    Flags { raw: u64, labels: Vec<&'static str> },
    /// Opaque bytes, rendered as hex by the display layer.
    Binary(Vec<u8>),
    /// Maritime Mobile Service Identity, rendered as 9 digits.
    Mmsi(u32),
}

impl FieldValue {
    /// Numeric view of the value, when one exists. Used by the repeating-group
    /// and side-band tracking in the converter.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Unsigned(v) => Some(*v),
            FieldValue::Signed(v) if *v >= 0 => Some(*v as u64),
            FieldValue::Label { raw, .. } => Some(*raw),
            FieldValue::Flags { raw, .. } => Some(*raw),
            FieldValue::Mmsi(v) => Some(*v as u64),
            _ => None,
        }
    }
}
