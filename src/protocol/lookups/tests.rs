//! Lookup table access and ordering checks.
use super::*;

#[test]
/// Every registered pair table must be sorted for binary search.
fn test_pair_tables_sorted() {
    for table in PAIR_TABLES {
        let mut previous = None;
        for (value, _) in table.entries {
            if let Some(prev) = previous {
                assert!(*value > prev, "table {} out of order at {}", table.name, value);
            }
            previous = Some(*value);
        }
    }
}

#[test]
/// Indirect tables are sorted by (key1, raw).
fn test_indirect_tables_sorted() {
    for table in INDIRECT_TABLES {
        let mut previous = None;
        for (key, value, _) in table.entries {
            if let Some(prev) = previous {
                assert!((*key, *value) > prev, "table {} out of order", table.name);
            }
            previous = Some((*key, *value));
        }
    }
}

#[test]
/// Direct and missing lookups.
fn test_pair_lookup() {
    assert_eq!(MANUFACTURER_CODE.label(1851), Some("Raymarine"));
    assert_eq!(MANUFACTURER_CODE.label(1234), None);
    assert_eq!(INDUSTRY_CODE.label(4), Some("Marine Industry"));
}

#[test]
/// Reverse lookup feeds the by-fields variant resolver.
fn test_reverse_lookup() {
    assert_eq!(MANUFACTURER_CODE.reverse("Raymarine"), Some(1851));
    assert_eq!(MANUFACTURER_CODE.reverse("Nonexistent"), None);
}

#[test]
/// Two-key device function lookup consults the class first.
fn test_indirect_lookup() {
    assert_eq!(
        DEVICE_FUNCTION.label(60, 145),
        Some("Ownship Position (GNSS)")
    );
    assert_eq!(DEVICE_FUNCTION.label(50, 145), None);
}

#[test]
/// Field-type keys select a concrete kind and width.
fn test_field_type_lookup() {
    let (label, kind, bits) = KEY_VALUE_TYPE.select(2).unwrap();
    assert_eq!(label, "Temperature");
    assert_eq!(kind, FieldKind::Temperature);
    assert_eq!(bits, 16);
    assert!(KEY_VALUE_TYPE.select(99).is_none());
}

#[test]
/// Name-based resolution, as performed at bootstrap.
fn test_table_resolution_by_name() {
    assert!(pair_table("MANUFACTURER_CODE").is_some());
    assert!(bit_table("ENGINE_STATUS_1").is_some());
    assert!(indirect_table("DEVICE_FUNCTION").is_some());
    assert!(field_type_table("KEY_VALUE_TYPE").is_some());
    assert!(pair_table("NO_SUCH_TABLE").is_none());
}
