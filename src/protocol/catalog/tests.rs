//! Bootstrap and invariant checks over the shipped catalogue.
use super::*;

#[test]
/// The shipped catalogue must bootstrap cleanly.
fn test_bootstrap_succeeds() {
    let registry = Registry::bootstrap().unwrap();
    assert!(!registry.pgns().is_empty());
    assert_eq!(registry.field_types().len(), FieldKind::ALL.len());
}

#[test]
/// Catalogue order is ascending and fallbacks close their block.
fn test_catalogue_ordering() {
    let registry = Registry::bootstrap().unwrap();
    let pgns = registry.pgns();
    for window in pgns.windows(2) {
        assert!(window[0].pgn <= window[1].pgn);
        if window[0].pgn == window[1].pgn {
            assert!(
                !window[0].fallback,
                "fallback for {} is not last in its block",
                window[0].pgn
            );
        }
    }
}

#[test]
/// Bit offsets are the ordered sum of preceding field widths.
fn test_bit_offsets_are_cumulative() {
    let registry = Registry::bootstrap().unwrap();
    for def in registry.pgns() {
        let mut expected = 0;
        for field in def.active_fields() {
            assert_eq!(
                field.bit_offset, expected,
                "PGN {} field {:?}",
                def.pgn, field.name
            );
            expected += field.size_bits;
        }
    }
}

#[test]
/// The ISO Address Claim fields land on their documented boundaries.
fn test_address_claim_layout() {
    let registry = Registry::bootstrap().unwrap();
    let idx = registry.first_index_of(60928).unwrap();
    let def = &registry.pgns()[idx];
    assert_eq!(def.field_count, 10);
    let offsets: Vec<u32> = def.active_fields().iter().map(|f| f.bit_offset).collect();
    assert_eq!(offsets, vec![0, 21, 32, 35, 40, 48, 49, 56, 60, 63]);
    // One full single frame.
    let total: u32 = def.active_fields().iter().map(|f| f.size_bits).sum();
    assert_eq!(total, 64);
}

#[test]
/// Cross-links are populated by bootstrap.
fn test_arena_links() {
    let registry = Registry::bootstrap().unwrap();
    for (pgn_index, def) in registry.pgns().iter().enumerate() {
        for field in def.active_fields() {
            assert_eq!(field.pgn_ref, Some(pgn_index));
            let ft_index = field.field_type_ref.unwrap();
            assert_eq!(registry.field_types()[ft_index].kind, field.kind);
            if field.lookup.is_some() {
                assert!(field.lookup_ref.is_some(), "PGN {} {:?}", def.pgn, field.name);
            }
        }
    }
}

#[test]
/// camelCase derivation, including repeated-name disambiguation.
fn test_camel_names() {
    let registry = Registry::bootstrap().unwrap();
    let idx = registry.first_index_of(126992).unwrap();
    let def = &registry.pgns()[idx];
    assert_eq!(def.camel_description, "SystemTime");
    let names: Vec<&str> = def
        .active_fields()
        .iter()
        .map(|f| f.camel_name.as_str())
        .collect();
    assert_eq!(names, vec!["sid", "source", "reserved", "date", "time"]);

    // 129026 carries two Reserved fields; the second gets a suffix.
    let idx = registry.first_index_of(129026).unwrap();
    let def = &registry.pgns()[idx];
    let reserved: Vec<&str> = def
        .active_fields()
        .iter()
        .filter(|f| f.name == "Reserved")
        .map(|f| f.camel_name.as_str())
        .collect();
    assert_eq!(reserved, vec!["reserved", "reserved2"]);

    // The '#' shorthand expands to a word.
    let idx = registry.first_index_of(126208).unwrap();
    let def = &registry.pgns()[idx];
    assert!(def
        .active_fields()
        .iter()
        .any(|f| f.camel_name == "numberOfParameters"));
}

#[test]
/// Match-field detection drives the variant resolver.
fn test_has_match_fields() {
    let registry = Registry::bootstrap().unwrap();
    let idx = registry.first_index_of(126720).unwrap();
    assert!(registry.pgns()[idx].has_match_fields);
    let idx = registry.first_index_of(126992).unwrap();
    assert!(!registry.pgns()[idx].has_match_fields);
}

#[test]
/// Every non-fallback PGN sits inside the numbering plan with a compatible
/// transport class.
fn test_range_plan() {
    let registry = Registry::bootstrap().unwrap();
    for def in registry.pgns() {
        if def.fallback || def.pgn >= ACTISENSE_BEM.min(IKONVERT_BEM) {
            continue;
        }
        let range = range_of(def.pgn).expect("validated at bootstrap");
        assert!(
            range.packet_type == PacketType::Mixed
                || def.packet_type == range.packet_type
                || def.packet_type == PacketType::IsoTp,
            "PGN {}",
            def.pgn
        );
        if range.step == 256 {
            assert_eq!(def.pgn & 0xFF, 0, "PDU1 PGN {}", def.pgn);
        }
    }
}

#[test]
/// Binary search finds the first entry of a multi-variant block.
fn test_first_index_of() {
    let registry = Registry::bootstrap().unwrap();
    let idx = registry.first_index_of(126208).unwrap();
    assert_eq!(registry.pgns()[idx].pgn, 126208);
    assert!(idx == 0 || registry.pgns()[idx - 1].pgn < 126208);
    assert!(registry.first_index_of(42).is_none());
}

#[test]
/// Field widths per iteration never exceed the transport capacity.
fn test_payload_capacity() {
    let registry = Registry::bootstrap().unwrap();
    for def in registry.pgns() {
        let bits: u32 = def.active_fields().iter().map(|f| f.size_bits).sum();
        let cap = match def.packet_type {
            PacketType::Single => 64,
            PacketType::Fast | PacketType::Mixed => 223 * 8,
            PacketType::IsoTp => 1785 * 8,
        };
        assert!(bits <= cap, "PGN {} covers {} bits", def.pgn, bits);
    }
}
