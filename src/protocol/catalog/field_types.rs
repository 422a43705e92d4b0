//! Field-type descriptor table: per-tag defaults consumed by the decoding
//! engine when a field definition leaves size or resolution unspecified.
use crate::core::{FieldKind, FieldTypeDescriptor};

/// One descriptor per catalogue tag. Bootstrap verifies the table covers
/// [`FieldKind::ALL`] exactly; a missing tag aborts start-up.
pub(super) fn descriptors() -> Vec<FieldTypeDescriptor> {
    use FieldKind::*;

    // (kind, name, default_bits, default_resolution, signed, has_lookup,
    //  print_variable, unit)
    let rows: &[(
        FieldKind,
        &'static str,
        u32,
        f64,
        bool,
        bool,
        bool,
        Option<&'static str>,
    )] = &[
        (Uint8, "UINT8", 8, 0.0, false, false, false, None),
        (Uint16, "UINT16", 16, 0.0, false, false, false, None),
        (Uint32, "UINT32", 32, 0.0, false, false, false, None),
        (Int32, "INT32", 32, 0.0, true, false, false, None),
        (UnsignedInteger, "UNSIGNED_INTEGER", 0, 0.0, false, false, false, None),
        (Integer, "INTEGER", 0, 0.0, true, false, false, None),
        (Ufix8, "UFIX8", 8, 0.0, false, false, false, None),
        (Ufix16, "UFIX16", 16, 0.0, false, false, false, None),
        (Fix16, "FIX16", 16, 0.0, true, false, false, None),
        (Float, "FLOAT", 32, 0.0, true, false, false, None),
        (Date, "DATE", 16, 0.0, false, false, false, Some("d")),
        (Time, "TIME", 32, 0.0001, false, false, false, Some("s")),
        (Duration, "DURATION", 0, 0.0, false, false, false, Some("s")),
        (StringFix, "STRING_FIX", 0, 0.0, false, false, false, None),
        (StringLz, "STRING_LZ", 0, 0.0, false, false, false, None),
        (StringLau, "STRING_LAU", 0, 0.0, false, false, false, None),
        (Binary, "BINARY", 0, 0.0, false, false, false, None),
        (Decimal, "DECIMAL", 0, 0.0, false, false, false, None),
        (Lookup, "LOOKUP", 0, 0.0, false, true, false, None),
        (BitLookup, "BITLOOKUP", 0, 0.0, false, true, false, None),
        (IndirectLookup, "INDIRECT_LOOKUP", 0, 0.0, false, true, false, None),
        (FieldTypeLookup, "FIELDTYPE_LOOKUP", 0, 0.0, false, true, false, None),
        (Manufacturer, "MANUFACTURER", 11, 0.0, false, true, false, None),
        (Industry, "INDUSTRY", 3, 0.0, false, true, false, None),
        (Mmsi, "MMSI", 32, 0.0, false, false, false, None),
        (Pgn, "PGN", 24, 0.0, false, false, false, None),
        (FieldIndex, "FIELD_INDEX", 8, 0.0, false, false, false, None),
        (Variable, "VARIABLE", 0, 0.0, false, false, true, None),
        (KeyValue, "KEY_VALUE", 0, 0.0, false, false, true, None),
        (Spare, "SPARE", 0, 0.0, false, false, false, None),
        (Reserved, "RESERVED", 0, 0.0, false, false, false, None),
        // Domain-scaled families. The default resolution is the fine-grained
        // wire scale; "high" variants simply override it per field.
        (Geo, "GEO", 32, 1e-7, true, false, false, Some("deg")),
        (Temperature, "TEMPERATURE", 16, 0.01, false, false, false, Some("K")),
        (Pressure, "PRESSURE", 16, 100.0, false, false, false, Some("Pa")),
        (Voltage, "VOLTAGE", 16, 0.01, false, false, false, Some("V")),
        (Current, "CURRENT", 16, 0.1, false, false, false, Some("A")),
        (Energy, "ENERGY", 32, 1.0, false, false, false, Some("kWh")),
        (Power, "POWER", 32, 1.0, false, false, false, Some("W")),
        (Distance, "DISTANCE", 32, 0.01, true, false, false, Some("m")),
        (Length, "LENGTH", 32, 0.01, false, false, false, Some("m")),
        (Speed, "SPEED", 16, 0.01, false, false, false, Some("m/s")),
        (Rotation, "ROTATION", 16, 3.125e-5, true, false, false, Some("rad/s")),
        (Angle, "ANGLE", 16, 0.0001, false, false, false, Some("rad")),
        (Volume, "VOLUME", 16, 1.0, false, false, false, Some("L")),
        (VolumetricFlow, "VOLUMETRIC_FLOW", 16, 0.1, true, false, false, Some("L/h")),
        (Concentration, "CONCENTRATION", 16, 1.0, false, false, false, Some("ppm")),
        (DilutionOfPrecision, "DILUTION_OF_PRECISION", 16, 0.01, true, false, false, None),
        (SignalToNoiseRatio, "SIGNALTONOISERATIO", 16, 0.01, true, false, false, Some("dB")),
        (RadioFrequency, "RADIO_FREQUENCY", 32, 10.0, false, false, false, Some("Hz")),
        (Frequency, "FREQUENCY", 16, 1.0, false, false, false, Some("Hz")),
        (Percentage, "PERCENTAGE", 8, 1.0, false, false, false, Some("%")),
        (Gain, "GAIN", 16, 0.01, true, false, false, None),
        (MagneticField, "MAGNETIC_FIELD", 16, 1e-5, true, false, false, Some("T")),
        (PeukertExponent, "PEUKERT_EXPONENT", 8, 0.002, false, false, false, None),
        (ElectricCharge, "ELECTRIC_CHARGE", 16, 1.0, false, false, false, Some("C")),
        (Version, "VERSION", 16, 0.001, false, false, false, None),
    ];

    rows.iter()
        .map(
            |&(kind, name, default_bits, default_resolution, signed, has_lookup, print_variable, unit)| {
                FieldTypeDescriptor {
                    kind,
                    name,
                    default_bits,
                    default_resolution,
                    signed,
                    has_lookup,
                    print_variable,
                    unit,
                }
            },
        )
        .collect()
}
