//! The PGN definition tables.
//!
//! Entries are kept sorted ascending by PGN; when several definitions share a
//! number, catalogue order is load-bearing for variant resolution and the
//! fallback comes last. Bootstrap derives bit offsets, camel identifiers,
//! field counts, and cross-links, then validates the whole table.
use crate::core::{
    CompletenessFlags, FieldDescriptor, FieldKind, LookupKind, LookupSpec, PacketType,
    PgnDescriptor,
};

/// Transmission cadence for on-demand messages.
const INTERVAL_NEVER: u16 = u16::MAX;

//==================================================================================FIELD_HELPERS

fn field(name: &'static str, kind: FieldKind, size_bits: u32) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind,
        size_bits,
        ..Default::default()
    }
}

fn uint8(name: &'static str) -> FieldDescriptor {
    field(name, FieldKind::Uint8, 8)
}

fn uint16(name: &'static str) -> FieldDescriptor {
    field(name, FieldKind::Uint16, 16)
}

fn unumber(name: &'static str, size_bits: u32) -> FieldDescriptor {
    field(name, FieldKind::UnsignedInteger, size_bits)
}

fn integer(name: &'static str, size_bits: u32) -> FieldDescriptor {
    FieldDescriptor {
        has_sign: true,
        ..field(name, FieldKind::Integer, size_bits)
    }
}

fn reserved(size_bits: u32) -> FieldDescriptor {
    field("Reserved", FieldKind::Reserved, size_bits)
}

fn spare(size_bits: u32) -> FieldDescriptor {
    field("Spare", FieldKind::Spare, size_bits)
}

fn lookup(name: &'static str, size_bits: u32, table: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        lookup: Some(LookupSpec {
            kind: LookupKind::Pair,
            table,
            val1_order: None,
        }),
        ..field(name, FieldKind::Lookup, size_bits)
    }
}

fn bitlookup(name: &'static str, size_bits: u32, table: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        lookup: Some(LookupSpec {
            kind: LookupKind::Bit,
            table,
            val1_order: None,
        }),
        ..field(name, FieldKind::BitLookup, size_bits)
    }
}

fn indirect(
    name: &'static str,
    size_bits: u32,
    table: &'static str,
    val1_order: u8,
) -> FieldDescriptor {
    FieldDescriptor {
        lookup: Some(LookupSpec {
            kind: LookupKind::Triplet,
            table,
            val1_order: Some(val1_order),
        }),
        ..field(name, FieldKind::IndirectLookup, size_bits)
    }
}

fn fieldtype_lookup(name: &'static str, size_bits: u32, table: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        lookup: Some(LookupSpec {
            kind: LookupKind::FieldType,
            table,
            val1_order: None,
        }),
        ..field(name, FieldKind::FieldTypeLookup, size_bits)
    }
}

fn manufacturer(name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        lookup: Some(LookupSpec {
            kind: LookupKind::Pair,
            table: "MANUFACTURER_CODE",
            val1_order: None,
        }),
        ..field(name, FieldKind::Manufacturer, 11)
    }
}

fn industry(name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        lookup: Some(LookupSpec {
            kind: LookupKind::Pair,
            table: "INDUSTRY_CODE",
            val1_order: None,
        }),
        ..field(name, FieldKind::Industry, 3)
    }
}

fn geo(name: &'static str, size_bits: u32, resolution: f64) -> FieldDescriptor {
    FieldDescriptor {
        resolution,
        has_sign: true,
        ..field(name, FieldKind::Geo, size_bits)
    }
}

fn date(name: &'static str) -> FieldDescriptor {
    field(name, FieldKind::Date, 16)
}

fn time(name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        range_min: Some(0.0),
        range_max: Some(86402.0),
        ..field(name, FieldKind::Time, 32)
    }
}

fn duration(name: &'static str, size_bits: u32, resolution: f64) -> FieldDescriptor {
    FieldDescriptor {
        resolution,
        ..field(name, FieldKind::Duration, size_bits)
    }
}

fn scaled(name: &'static str, kind: FieldKind, size_bits: u32, resolution: f64) -> FieldDescriptor {
    FieldDescriptor {
        resolution,
        ..field(name, kind, size_bits)
    }
}

fn string_fix(name: &'static str, bytes: u32) -> FieldDescriptor {
    field(name, FieldKind::StringFix, bytes * 8)
}

fn string_lau(name: &'static str) -> FieldDescriptor {
    field(name, FieldKind::StringLau, 0)
}

fn binary(name: &'static str, size_bits: u32) -> FieldDescriptor {
    field(name, FieldKind::Binary, size_bits)
}

fn pgn_field(name: &'static str) -> FieldDescriptor {
    field(name, FieldKind::Pgn, 24)
}

fn mmsi(name: &'static str) -> FieldDescriptor {
    field(name, FieldKind::Mmsi, 32)
}

/// Attach an equality constraint used for variant resolution.
fn matched(mut f: FieldDescriptor, value: i64) -> FieldDescriptor {
    f.match_constraint = Some(value);
    f
}

/// Mark a field as present only for manufacturer-proprietary reference PGNs.
fn proprietary(mut f: FieldDescriptor) -> FieldDescriptor {
    f.proprietary = true;
    f
}

/// Override the wire resolution.
fn res(mut f: FieldDescriptor, resolution: f64) -> FieldDescriptor {
    f.resolution = resolution;
    f
}

/// Interpret the raw integer as two's complement.
fn signed(mut f: FieldDescriptor) -> FieldDescriptor {
    f.has_sign = true;
    f
}

/// Attach a display unit.
fn unit(mut f: FieldDescriptor, unit: &'static str) -> FieldDescriptor {
    f.unit = Some(unit);
    f
}

//==================================================================================PGN_TABLE

/// Build the catalogue. The subset re-types every definition the decoder and
/// its tests exercise, plus the range-wide fallbacks.
pub(super) fn pgn_table() -> Vec<PgnDescriptor> {
    vec![
        //==================== ISO 11783 ====================
        PgnDescriptor {
            pgn: 59392,
            description: "ISO Acknowledgement",
            packet_type: PacketType::Single,
            fields: vec![
                lookup("Control", 8, "ISO_CONTROL"),
                uint8("Group Function"),
                reserved(24),
                pgn_field("PGN"),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 59904,
            description: "ISO Request",
            packet_type: PacketType::Single,
            fields: vec![pgn_field("PGN")],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 60928,
            description: "ISO Address Claim",
            packet_type: PacketType::Single,
            interval_ms: INTERVAL_NEVER,
            fields: vec![
                unumber("Unique Number", 21),
                manufacturer("Manufacturer Code"),
                unumber("Device Instance Lower", 3),
                unumber("Device Instance Upper", 5),
                indirect("Device Function", 8, "DEVICE_FUNCTION", 7),
                spare(1),
                lookup("Device Class", 7, "DEVICE_CLASS"),
                unumber("System Instance", 4),
                industry("Industry Group"),
                lookup("Arbitrary address capable", 1, "YES_NO"),
            ],
            ..Default::default()
        },
        //==================== Manufacturer single-frame ====================
        PgnDescriptor {
            pgn: 61184,
            description: "0xEF00: Manufacturer Proprietary single-frame addressed",
            packet_type: PacketType::Single,
            fallback: true,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                binary("Data", 0),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 65240,
            description: "ISO Commanded Address",
            packet_type: PacketType::IsoTp,
            fields: vec![
                unumber("Unique Number", 21),
                manufacturer("Manufacturer Code"),
                unumber("Device Instance Lower", 3),
                unumber("Device Instance Upper", 5),
                indirect("Device Function", 8, "DEVICE_FUNCTION", 7),
                reserved(1),
                lookup("Device Class", 7, "DEVICE_CLASS"),
                unumber("System Instance", 4),
                industry("Industry Group"),
                reserved(1),
                uint8("New Source Address"),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 65280,
            description: "Furuno: Heave",
            packet_type: PacketType::Single,
            fields: vec![
                matched(manufacturer("Manufacturer Code"), 1855),
                reserved(2),
                matched(industry("Industry Code"), 4),
                signed(scaled("Heave", FieldKind::Distance, 32, 0.001)),
                reserved(16),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 65280,
            description: "0xFF00-0xFFFF: Manufacturer Proprietary single-frame non-addressed",
            packet_type: PacketType::Single,
            fallback: true,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                binary("Data", 48),
            ],
            ..Default::default()
        },
        //==================== NMEA group functions ====================
        PgnDescriptor {
            pgn: 126208,
            description: "NMEA - Request group function",
            packet_type: PacketType::Fast,
            interval_ms: INTERVAL_NEVER,
            repeating_count_1: 2,
            repeating_start_1: 9,
            repeating_field_1: 8,
            fields: vec![
                matched(lookup("Function Code", 8, "GROUP_FUNCTION"), 0),
                pgn_field("PGN"),
                duration("Transmission interval", 32, 0.001),
                duration("Transmission interval offset", 16, 0.01),
                proprietary(manufacturer("Manufacturer Code")),
                proprietary(reserved(2)),
                proprietary(industry("Industry Code")),
                uint8("# of Parameters"),
                field("Parameter", FieldKind::FieldIndex, 8),
                field("Value", FieldKind::Variable, 0),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126208,
            description: "NMEA - Command group function",
            packet_type: PacketType::Fast,
            interval_ms: INTERVAL_NEVER,
            repeating_count_1: 2,
            repeating_start_1: 9,
            repeating_field_1: 8,
            fields: vec![
                matched(lookup("Function Code", 8, "GROUP_FUNCTION"), 1),
                pgn_field("PGN"),
                unumber("Priority", 4),
                reserved(4),
                proprietary(manufacturer("Manufacturer Code")),
                proprietary(reserved(2)),
                proprietary(industry("Industry Code")),
                uint8("# of Parameters"),
                field("Parameter", FieldKind::FieldIndex, 8),
                field("Value", FieldKind::Variable, 0),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126208,
            description: "NMEA - Acknowledge group function",
            packet_type: PacketType::Fast,
            interval_ms: INTERVAL_NEVER,
            repeating_count_1: 1,
            repeating_start_1: 6,
            repeating_field_1: 5,
            fields: vec![
                matched(lookup("Function Code", 8, "GROUP_FUNCTION"), 2),
                pgn_field("PGN"),
                unumber("PGN error code", 4),
                unumber("Transmission interval/priority error code", 4),
                uint8("# of Parameters"),
                unumber("Parameter", 4),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126464,
            description: "PGN List (Transmit and Receive)",
            packet_type: PacketType::Fast,
            interval_ms: INTERVAL_NEVER,
            repeating_count_1: 1,
            repeating_start_1: 2,
            fields: vec![
                lookup("Function Code", 8, "PGN_LIST_FUNCTION"),
                pgn_field("PGN"),
            ],
            ..Default::default()
        },
        //==================== Manufacturer fast-packet addressed ====================
        PgnDescriptor {
            pgn: 126720,
            description: "Seatalk1: Pilot Mode",
            packet_type: PacketType::Fast,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                matched(uint16("Proprietary ID"), 33264),
                matched(uint8("Command"), 132),
                uint8("Pilot Mode"),
                uint8("Sub Mode"),
                binary("Pilot Mode Data", 8),
                binary("Unknown Data", 80),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126720,
            description: "Seatalk1: Keystroke",
            packet_type: PacketType::Fast,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                matched(uint16("Proprietary ID"), 33264),
                matched(uint8("Command"), 134),
                uint8("Device"),
                lookup("Key", 8, "SEATALK_KEYSTROKE"),
                uint8("Key Inverted"),
                binary("Unknown Data", 112),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126720,
            description: "Seatalk1: Device Identification",
            packet_type: PacketType::Fast,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                matched(uint16("Proprietary ID"), 33264),
                matched(uint8("Command"), 144),
                reserved(8),
                lookup("Device ID", 8, "SEATALK_DEVICE_ID"),
                binary("Unknown Data", 32),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126720,
            description: "0x1EF00: Manufacturer Proprietary fast-packet addressed",
            packet_type: PacketType::Fast,
            fallback: true,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                binary("Data", 0),
            ],
            ..Default::default()
        },
        //==================== NMEA core ====================
        PgnDescriptor {
            pgn: 126992,
            description: "System Time",
            packet_type: PacketType::Single,
            interval_ms: 1000,
            fields: vec![
                uint8("SID"),
                lookup("Source", 4, "TIME_SOURCE"),
                reserved(4),
                date("Date"),
                time("Time"),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126993,
            description: "Heartbeat",
            packet_type: PacketType::Single,
            interval_ms: 60000,
            fields: vec![
                duration("Data transmit offset", 16, 0.001),
                uint8("Sequence Counter"),
                reserved(40),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126996,
            description: "Product Information",
            packet_type: PacketType::Fast,
            interval_ms: INTERVAL_NEVER,
            fields: vec![
                field("NMEA 2000 Version", FieldKind::Version, 16),
                uint16("Product Code"),
                string_fix("Model ID", 32),
                string_fix("Software Version Code", 32),
                string_fix("Model Version", 32),
                string_fix("Model Serial Code", 32),
                uint8("Certification Level"),
                uint8("Load Equivalency"),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 126998,
            description: "Configuration Information",
            packet_type: PacketType::Fast,
            interval_ms: INTERVAL_NEVER,
            fields: vec![
                string_lau("Installation Description #1"),
                string_lau("Installation Description #2"),
                string_lau("Manufacturer Information"),
            ],
            ..Default::default()
        },
        //==================== Steering and propulsion ====================
        PgnDescriptor {
            pgn: 127250,
            description: "Vessel Heading",
            packet_type: PacketType::Single,
            interval_ms: 100,
            fields: vec![
                uint8("SID"),
                field("Heading", FieldKind::Angle, 16),
                signed(field("Deviation", FieldKind::Angle, 16)),
                signed(field("Variation", FieldKind::Angle, 16)),
                lookup("Reference", 2, "DIRECTION_REFERENCE"),
                reserved(6),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 127488,
            description: "Engine Parameters, Rapid Update",
            packet_type: PacketType::Single,
            interval_ms: 100,
            fields: vec![
                lookup("Instance", 8, "ENGINE_INSTANCE"),
                unit(res(field("Speed", FieldKind::Ufix16, 16), 0.25), "rpm"),
                field("Boost Pressure", FieldKind::Pressure, 16),
                unit(integer("Tilt/Trim", 8), "%"),
                reserved(16),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 127489,
            description: "Engine Parameters, Dynamic",
            packet_type: PacketType::Fast,
            interval_ms: 500,
            fields: vec![
                lookup("Instance", 8, "ENGINE_INSTANCE"),
                field("Oil pressure", FieldKind::Pressure, 16),
                res(field("Oil temperature", FieldKind::Temperature, 16), 0.1),
                field("Temperature", FieldKind::Temperature, 16),
                signed(field("Alternator Potential", FieldKind::Voltage, 16)),
                field("Fuel Rate", FieldKind::VolumetricFlow, 16),
                duration("Total Engine hours", 32, 1.0),
                field("Coolant Pressure", FieldKind::Pressure, 16),
                field("Fuel Pressure", FieldKind::Pressure, 16),
                reserved(8),
                bitlookup("Discrete Status 1", 16, "ENGINE_STATUS_1"),
                bitlookup("Discrete Status 2", 16, "ENGINE_STATUS_2"),
                field("Engine Load", FieldKind::Percentage, 8),
                field("Engine Torque", FieldKind::Percentage, 8),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 128267,
            description: "Water Depth",
            packet_type: PacketType::Single,
            interval_ms: 1000,
            fields: vec![
                uint8("SID"),
                field("Depth", FieldKind::Length, 32),
                signed(scaled("Offset", FieldKind::Distance, 16, 0.001)),
                scaled("Range", FieldKind::Length, 8, 10.0),
            ],
            ..Default::default()
        },
        //==================== Navigation ====================
        PgnDescriptor {
            pgn: 129025,
            description: "Position, Rapid Update",
            packet_type: PacketType::Single,
            interval_ms: 100,
            fields: vec![geo("Latitude", 32, 1e-7), geo("Longitude", 32, 1e-7)],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 129026,
            description: "COG & SOG, Rapid Update",
            packet_type: PacketType::Single,
            interval_ms: 250,
            fields: vec![
                uint8("SID"),
                lookup("COG Reference", 2, "DIRECTION_REFERENCE"),
                reserved(6),
                field("COG", FieldKind::Angle, 16),
                field("SOG", FieldKind::Speed, 16),
                reserved(16),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 129029,
            description: "GNSS Position Data",
            packet_type: PacketType::Fast,
            interval_ms: 1000,
            repeating_count_1: 3,
            repeating_start_1: 16,
            repeating_field_1: 15,
            fields: vec![
                uint8("SID"),
                date("Date"),
                time("Time"),
                geo("Latitude", 64, 1e-16),
                geo("Longitude", 64, 1e-16),
                signed(scaled("Altitude", FieldKind::Distance, 64, 1e-6)),
                lookup("GNSS type", 4, "GNS"),
                lookup("Method", 4, "GNS_METHOD"),
                lookup("Integrity", 2, "GNS_INTEGRITY"),
                reserved(6),
                uint8("Number of SVs"),
                field("HDOP", FieldKind::DilutionOfPrecision, 16),
                field("PDOP", FieldKind::DilutionOfPrecision, 16),
                signed(scaled("Geoidal Separation", FieldKind::Distance, 32, 0.01)),
                uint8("Reference Stations"),
                lookup("Reference Station Type", 4, "GNS"),
                unumber("Reference Station ID", 12),
                duration("Age of DGNSS Corrections", 16, 0.01),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 129038,
            description: "AIS Class A Position Report",
            packet_type: PacketType::Fast,
            fields: vec![
                lookup("Message ID", 6, "AIS_MESSAGE_ID"),
                lookup("Repeat Indicator", 2, "REPEAT_INDICATOR"),
                mmsi("User ID"),
                geo("Longitude", 32, 1e-7),
                geo("Latitude", 32, 1e-7),
                lookup("Position Accuracy", 1, "POSITION_ACCURACY"),
                lookup("RAIM", 1, "RAIM_FLAG"),
                unumber("Time Stamp", 6),
                field("COG", FieldKind::Angle, 16),
                field("SOG", FieldKind::Speed, 16),
                binary("Communication State", 19),
                lookup("AIS Transceiver information", 5, "AIS_TRANSCEIVER"),
                field("Heading", FieldKind::Angle, 16),
                field("Rate of Turn", FieldKind::Rotation, 16),
                lookup("Nav Status", 4, "NAV_STATUS"),
                lookup("Special Maneuver Indicator", 2, "YES_NO"),
                reserved(2),
                spare(3),
                reserved(5),
                uint8("Sequence ID"),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 129540,
            description: "GNSS Sats in View",
            packet_type: PacketType::Fast,
            interval_ms: 1000,
            repeating_count_1: 7,
            repeating_start_1: 5,
            repeating_field_1: 4,
            fields: vec![
                uint8("SID"),
                lookup("Range Residual Mode", 2, "RANGE_RESIDUAL_MODE"),
                reserved(6),
                uint8("Sats in View"),
                uint8("PRN"),
                signed(field("Elevation", FieldKind::Angle, 16)),
                field("Azimuth", FieldKind::Angle, 16),
                field("SNR", FieldKind::SignalToNoiseRatio, 16),
                signed(scaled("Range Residuals", FieldKind::Distance, 32, 1e-5)),
                lookup("Status", 4, "SATELLITE_STATUS"),
                reserved(4),
            ],
            ..Default::default()
        },
        //==================== Environment ====================
        PgnDescriptor {
            pgn: 130306,
            description: "Wind Data",
            packet_type: PacketType::Single,
            interval_ms: 100,
            fields: vec![
                uint8("SID"),
                field("Wind Speed", FieldKind::Speed, 16),
                field("Wind Angle", FieldKind::Angle, 16),
                lookup("Reference", 3, "WIND_REFERENCE"),
                reserved(21),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 130312,
            description: "Temperature",
            packet_type: PacketType::Single,
            interval_ms: 2000,
            fields: vec![
                uint8("SID"),
                uint8("Instance"),
                lookup("Source", 8, "TEMPERATURE_SOURCE"),
                field("Actual Temperature", FieldKind::Temperature, 16),
                field("Set Temperature", FieldKind::Temperature, 16),
                reserved(8),
            ],
            ..Default::default()
        },
        //==================== Manufacturer fast-packet non-addressed ====================
        PgnDescriptor {
            pgn: 130816,
            description: "0x1FF00-0x1FFFF: Manufacturer Proprietary fast-packet non-addressed",
            packet_type: PacketType::Fast,
            fallback: true,
            fields: vec![
                manufacturer("Manufacturer Code"),
                reserved(2),
                industry("Industry Code"),
                binary("Data", 0),
            ],
            ..Default::default()
        },
        PgnDescriptor {
            pgn: 130824,
            description: "B&G: key-value data",
            packet_type: PacketType::Fast,
            completeness: CompletenessFlags::MISSING_COMPANY_FIELDS,
            repeating_count_1: 2,
            repeating_start_1: 4,
            fields: vec![
                matched(manufacturer("Manufacturer Code"), 1853),
                reserved(2),
                matched(industry("Industry Code"), 4),
                fieldtype_lookup("Key", 8, "KEY_VALUE_TYPE"),
                field("Value", FieldKind::KeyValue, 0),
            ],
            ..Default::default()
        },
    ]
}
