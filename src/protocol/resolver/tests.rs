//! Variant resolution scenarios: match fields, fallbacks, and stability.
use super::*;
use crate::protocol::catalog::Registry;

fn registry() -> Registry {
    Registry::bootstrap().unwrap()
}

/// Leading bytes of a Raymarine Seatalk1 message: manufacturer 1851,
/// industry 4, proprietary id 0x81F0, then the command byte.
fn seatalk_payload(command: u8) -> Vec<u8> {
    let mut payload = vec![0x3B, 0x9F, 0xF0, 0x81, command];
    payload.resize(21, 0xFF);
    payload
}

#[test]
/// A PGN with a single definition resolves without looking at the payload.
fn test_single_definition() {
    let registry = registry();
    let def = resolve(&registry, 126992, &[0xFF; 8]).unwrap();
    assert_eq!(def.description, "System Time");
}

#[test]
/// Match fields pick the one variant whose constrained bytes agree.
fn test_match_fields_select_variant() {
    let registry = registry();

    let def = resolve(&registry, 126720, &seatalk_payload(0x86)).unwrap();
    assert_eq!(def.description, "Seatalk1: Keystroke");

    let def = resolve(&registry, 126720, &seatalk_payload(0x84)).unwrap();
    assert_eq!(def.description, "Seatalk1: Pilot Mode");

    let def = resolve(&registry, 126720, &seatalk_payload(0x90)).unwrap();
    assert_eq!(def.description, "Seatalk1: Device Identification");
}

#[test]
/// An unconstrained candidate in the block matches unconditionally, so an
/// unknown command lands on the in-block fallback.
fn test_match_fields_exhaustion_falls_back() {
    let registry = registry();
    let def = resolve(&registry, 126720, &seatalk_payload(0x00)).unwrap();
    assert!(def.fallback);
    assert_eq!(
        def.description,
        "0x1EF00: Manufacturer Proprietary fast-packet addressed"
    );
}

#[test]
/// Function codes disambiguate the 126208 group functions.
fn test_group_function_variants() {
    let registry = registry();
    let def = resolve(&registry, 126208, &[0x00, 0x10, 0xF0, 0x01, 0xFF]).unwrap();
    assert_eq!(def.description, "NMEA - Request group function");
    let def = resolve(&registry, 126208, &[0x01, 0x10, 0xF0, 0x01, 0xFF]).unwrap();
    assert_eq!(def.description, "NMEA - Command group function");
}

#[test]
/// An unknown manufacturer encoding at 65280 resolves to the range fallback.
fn test_unknown_proprietary_uses_range_fallback() {
    let registry = registry();
    // Manufacturer 229 (Garmin), industry 4: no specific 65280 definition.
    let payload = [0xE5, 0x98, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
    let def = resolve(&registry, 65280, &payload).unwrap();
    assert!(def.fallback);
    assert_eq!(
        def.description,
        "0xFF00-0xFFFF: Manufacturer Proprietary single-frame non-addressed"
    );

    // A PGN deeper in the same range reuses the same catch-all.
    let def2 = resolve(&registry, 65300, &payload).unwrap();
    assert!(std::ptr::eq(def, def2));
}

#[test]
/// Resolving an uncatalogued PGN twice returns the same catch-all record.
fn test_catch_all_stability() {
    let registry = registry();
    let payload = [0xFF; 8];
    let first = resolve(&registry, 130900, &payload).unwrap();
    let second = resolve(&registry, 130900, &payload).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(first.fallback);
}

#[test]
/// A PGN below every catalogue entry has no fallback to land on.
fn test_unknown_pgn_without_fallback() {
    let registry = registry();
    assert!(matches!(
        resolve(&registry, 1024, &[0xFF; 8]),
        Err(DecodeError::UnknownPgn { pgn: 1024 })
    ));
}

#[test]
/// The by-fields variant reverse-looks labels up through the lookup tables.
fn test_resolve_by_fields() {
    let registry = registry();
    let def = resolve_by_fields(
        &registry,
        126720,
        &[("Proprietary ID", "33264"), ("Command", "134")],
    )
    .unwrap();
    assert_eq!(def.description, "Seatalk1: Keystroke");

    // Labels run through the reverse lookup: Furuno -> 1855.
    let def = resolve_by_fields(
        &registry,
        65280,
        &[
            ("Manufacturer Code", "Furuno"),
            ("Industry Code", "Marine Industry"),
        ],
    )
    .unwrap();
    assert_eq!(def.description, "Furuno: Heave");
}

#[test]
/// A candidate fails when a supplied field is missing or disagrees.
fn test_resolve_by_fields_mismatch() {
    let registry = registry();
    let def = resolve_by_fields(
        &registry,
        65280,
        &[
            ("Manufacturer Code", "Garmin"),
            ("Industry Code", "Marine Industry"),
        ],
    )
    .unwrap();
    assert!(def.fallback);
}
