//! Record ordering and display rendering.
use super::*;

#[test]
/// Records preserve catalogue field order and answer by-name queries.
fn test_record_order_and_lookup() {
    let mut record = DecodedRecord::new();
    record.push("SID", FieldValue::Unsigned(3));
    record.push("Heading", FieldValue::Real(1.5708));
    record.push("Reference", FieldValue::Label { raw: 1, label: "Magnetic" });

    assert_eq!(record.len(), 3);
    let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["SID", "Heading", "Reference"]);
    assert_eq!(record.get("Heading"), Some(&FieldValue::Real(1.5708)));
    assert_eq!(record.get("Missing"), None);
}

#[test]
/// Binary renders as hex, MMSI keeps its leading zeros.
fn test_display_rendering() {
    let mut fields = DecodedRecord::new();
    fields.push("User ID", FieldValue::Mmsi(1_234_567));
    fields.push("Data", FieldValue::Binary(vec![0xDE, 0xAD, 0x01]));

    let message = DecodedMessage {
        timestamp: 12.5,
        priority: 6,
        source: 42,
        destination: 255,
        pgn: 129038,
        description: "AIS Class A Position Report",
        fields,
        list: Vec::new(),
        list2: Vec::new(),
    };

    let rendered = message.to_string();
    assert!(rendered.contains("User ID = 001234567;"));
    assert!(rendered.contains("Data = dead01;"));
    assert!(rendered.starts_with("12.500 6 42 -> 255 AIS Class A Position Report:"));
}
