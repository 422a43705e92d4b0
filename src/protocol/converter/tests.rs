//! Converter walk tests: plain records, repeating groups, side-band state,
//! and truncation tolerance.
use super::*;
use crate::core::{FieldDescriptor, FieldKind, FieldValue};
use crate::protocol::transport::frame::{RawFrame, BROADCAST};

fn frame(pgn: u32, data: Vec<u8>) -> RawFrame {
    RawFrame {
        timestamp: 0.0,
        priority: 6,
        pgn,
        source: 7,
        destination: BROADCAST,
        data,
    }
}

#[test]
/// Plain single-frame decode with labels, scaling, and an absent field.
fn test_vessel_heading() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);

    // SID 0, heading 0.4660 rad, deviation absent, variation 0.0256 rad,
    // reference Magnetic.
    let payload = [0x00, 0x34, 0x12, 0xFF, 0x7F, 0x00, 0x01, 0xFD];
    let message = decoder
        .convert(&frame(127250, payload.to_vec()), &payload)
        .unwrap();

    assert_eq!(message.description, "Vessel Heading");
    assert_eq!(message.fields.get("SID"), Some(&FieldValue::Unsigned(0)));
    assert_eq!(
        message.fields.get("Heading"),
        Some(&FieldValue::Real(4660.0 * 0.0001))
    );
    // Sentinel: omitted from the record.
    assert_eq!(message.fields.get("Deviation"), None);
    assert_eq!(
        message.fields.get("Variation"),
        Some(&FieldValue::Real(256.0 * 0.0001))
    );
    assert_eq!(
        message.fields.get("Reference"),
        Some(&FieldValue::Label {
            raw: 1,
            label: "Magnetic"
        })
    );
    // Reserved filler never reaches the output.
    assert_eq!(message.fields.get("Reserved"), None);
    assert!(message.list.is_empty());
}

#[test]
/// A count-field-driven repeating group lands under `list`.
fn test_gnss_position_reference_stations() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);

    let mut payload = Vec::new();
    payload.push(0x01); // SID
    payload.extend_from_slice(&19000u16.to_le_bytes()); // Date
    payload.extend_from_slice(&360_000_000u32.to_le_bytes()); // Time 36000 s
    payload.extend_from_slice(&0i64.to_le_bytes()); // Latitude
    payload.extend_from_slice(&0i64.to_le_bytes()); // Longitude
    payload.extend_from_slice(&2_000_000i64.to_le_bytes()); // Altitude 2 m
    payload.push(0x20); // GNSS type 0 (GPS), method 2 (DGNSS)
    payload.push(0xFD); // integrity 1 (Safe), reserved
    payload.push(9); // number of SVs
    payload.extend_from_slice(&120i16.to_le_bytes()); // HDOP 1.20
    payload.extend_from_slice(&230i16.to_le_bytes()); // PDOP 2.30
    payload.extend_from_slice(&1500i32.to_le_bytes()); // geoidal separation 15 m
    payload.push(2); // reference stations
    payload.extend_from_slice(&((1u16) | (7 << 4)).to_le_bytes()); // type 1, id 7
    payload.extend_from_slice(&500u16.to_le_bytes()); // age 5.00 s
    payload.extend_from_slice(&((0u16) | (33 << 4)).to_le_bytes()); // type 0, id 33
    payload.extend_from_slice(&100u16.to_le_bytes()); // age 1.00 s

    let message = decoder
        .convert(&frame(129029, payload.clone()), &payload)
        .unwrap();

    assert_eq!(message.fields.get("Date"), Some(&FieldValue::Unsigned(19000)));
    assert_eq!(message.fields.get("Time"), Some(&FieldValue::Real(36000.0)));
    assert_eq!(
        message.fields.get("Method"),
        Some(&FieldValue::Label {
            raw: 2,
            label: "DGNSS fix"
        })
    );
    assert_eq!(
        message.fields.get("Reference Stations"),
        Some(&FieldValue::Unsigned(2))
    );

    assert_eq!(message.list.len(), 2);
    assert_eq!(
        message.list[0].get("Reference Station Type"),
        Some(&FieldValue::Label {
            raw: 1,
            label: "GLONASS"
        })
    );
    assert_eq!(
        message.list[0].get("Reference Station ID"),
        Some(&FieldValue::Unsigned(7))
    );
    assert_eq!(
        message.list[0].get("Age of DGNSS Corrections"),
        Some(&FieldValue::Real(5.0))
    );
    assert_eq!(
        message.list[1].get("Reference Station ID"),
        Some(&FieldValue::Unsigned(33))
    );
    assert!(message.list2.is_empty());
}

#[test]
/// Variable parameter pairs resolve through the reference PGN, and the
/// proprietary manufacturer fields stay off the wire for a standard PGN.
fn test_group_function_request_parameters() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);

    let mut payload = Vec::new();
    payload.push(0x00); // Function Code = Request
    payload.extend_from_slice(&[0x00, 0xEE, 0x00]); // PGN 60928
    payload.extend_from_slice(&[0xFF; 4]); // interval: no data
    payload.extend_from_slice(&[0xFF; 2]); // interval offset: no data
    payload.push(2); // # of Parameters
    payload.push(2); // parameter 2: Manufacturer Code (11 bits -> 2 bytes)
    payload.extend_from_slice(&1851u16.to_le_bytes());
    payload.push(1); // parameter 1: Unique Number (21 bits -> 3 bytes)
    payload.extend_from_slice(&[0x05, 0xA0, 0x02]);

    let message = decoder
        .convert(&frame(126208, payload.clone()), &payload)
        .unwrap();

    assert_eq!(message.description, "NMEA - Request group function");
    assert_eq!(
        message.fields.get("Function Code"),
        Some(&FieldValue::Label {
            raw: 0,
            label: "Request"
        })
    );
    assert_eq!(message.fields.get("PGN"), Some(&FieldValue::Unsigned(60928)));
    // 60928 is not proprietary: the gated fields never appear.
    assert_eq!(message.fields.get("Manufacturer Code"), None);
    assert_eq!(
        message.fields.get("# of Parameters"),
        Some(&FieldValue::Unsigned(2))
    );

    assert_eq!(message.list.len(), 2);
    assert_eq!(
        message.list[0].get("Parameter"),
        Some(&FieldValue::Unsigned(2))
    );
    assert_eq!(
        message.list[0].get("Value"),
        Some(&FieldValue::Label {
            raw: 1851,
            label: "Raymarine"
        })
    );
    assert_eq!(
        message.list[1].get("Parameter"),
        Some(&FieldValue::Unsigned(1))
    );
    assert_eq!(
        message.list[1].get("Value"),
        Some(&FieldValue::Unsigned(0x02A005))
    );
}

#[test]
/// With a proprietary reference PGN the gated manufacturer fields decode.
fn test_group_function_request_proprietary() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);

    let mut payload = Vec::new();
    payload.push(0x00); // Function Code = Request
    payload.extend_from_slice(&[0x00, 0xFF, 0x00]); // PGN 65280: proprietary band
    payload.extend_from_slice(&[0xFF; 4]);
    payload.extend_from_slice(&[0xFF; 2]);
    payload.extend_from_slice(&[0x3B, 0x9F]); // manufacturer 1851, industry 4
    payload.push(0); // # of Parameters: empty group

    let message = decoder
        .convert(&frame(126208, payload.clone()), &payload)
        .unwrap();

    assert_eq!(
        message.fields.get("Manufacturer Code"),
        Some(&FieldValue::Label {
            raw: 1851,
            label: "Raymarine"
        })
    );
    assert_eq!(
        message.fields.get("Industry Code"),
        Some(&FieldValue::Label {
            raw: 4,
            label: "Marine Industry"
        })
    );
    assert!(message.list.is_empty());
}

#[test]
/// A payload-length-driven group repeats until the bytes run out.
fn test_pgn_list_unbounded_group() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);

    let mut payload = vec![0x00]; // Transmit PGN list
    payload.extend_from_slice(&[0x00, 0xEE, 0x00]); // 60928
    payload.extend_from_slice(&[0x10, 0xF0, 0x01]); // 126992
    payload.extend_from_slice(&[0x12, 0xF1, 0x01]); // 127250

    let message = decoder
        .convert(&frame(126464, payload.clone()), &payload)
        .unwrap();

    let pgns: Vec<u64> = message
        .list
        .iter()
        .filter_map(|record| record.get("PGN")?.as_u64())
        .collect();
    assert_eq!(pgns, vec![60928, 126992, 127250]);
}

#[test]
/// Truncated trailing fields are tolerated and logged, not an error.
fn test_trailing_truncation_tolerated() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);

    let payload = [0x00, 0x34, 0x12];
    let message = decoder
        .convert(&frame(127250, payload.to_vec()), &payload)
        .unwrap();
    assert_eq!(
        message.fields.get("Heading"),
        Some(&FieldValue::Real(4660.0 * 0.0001))
    );
    assert_eq!(message.fields.get("Variation"), None);
}

#[test]
/// An empty payload against a fielded definition is a truncation error.
fn test_empty_payload_truncated() {
    let registry = Registry::bootstrap().unwrap();
    let decoder = Decoder::new(&registry);
    assert!(matches!(
        decoder.convert(&frame(127250, Vec::new()), &[]),
        Err(DecodeError::TruncatedPayload { pgn: 127250, .. })
    ));
}

#[test]
/// Two repeating groups fill `list` and `list2` independently.
fn test_two_level_repeating_groups() {
    let registry = Registry::bootstrap().unwrap();

    // Synthetic definition: two one-field groups driven by two count fields.
    let mut def = PgnDescriptor {
        pgn: 130900,
        description: "synthetic",
        repeating_count_1: 1,
        repeating_start_1: 3,
        repeating_field_1: 1,
        repeating_count_2: 1,
        repeating_start_2: 4,
        repeating_field_2: 2,
        fields: vec![
            FieldDescriptor {
                name: "First Count",
                kind: FieldKind::Uint8,
                size_bits: 8,
                ..Default::default()
            },
            FieldDescriptor {
                name: "Second Count",
                kind: FieldKind::Uint8,
                size_bits: 8,
                ..Default::default()
            },
            FieldDescriptor {
                name: "First Item",
                kind: FieldKind::Uint8,
                size_bits: 8,
                ..Default::default()
            },
            FieldDescriptor {
                name: "Second Item",
                kind: FieldKind::Uint8,
                size_bits: 8,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    def.field_count = def.fields.len();

    let payload = [2u8, 2, 0x0A, 0x0B, 0x14, 0x15];
    let mut message = DecodedMessage {
        timestamp: 0.0,
        priority: 6,
        source: 1,
        destination: BROADCAST,
        pgn: def.pgn,
        description: def.description,
        fields: DecodedRecord::new(),
        list: Vec::new(),
        list2: Vec::new(),
    };
    walk_fields(&registry, &def, &payload, &mut message).unwrap();

    assert_eq!(
        message.fields.get("First Count"),
        Some(&FieldValue::Unsigned(2))
    );
    let first: Vec<u64> = message
        .list
        .iter()
        .filter_map(|r| r.get("First Item")?.as_u64())
        .collect();
    assert_eq!(first, vec![0x0A, 0x0B]);
    let second: Vec<u64> = message
        .list2
        .iter()
        .filter_map(|r| r.get("Second Item")?.as_u64())
        .collect();
    assert_eq!(second, vec![0x14, 0x15]);
}
