//! Integration tests for parsing nomenclature data.

use okdesk_nomenclature::models::{Position, PriceListService};
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_positions() {
    let json_data = load_fixture("positions.json");

    let positions: Vec<Position> = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize positions: {}\nJSON: {}",
            e, json_data
        )
    });

    assert_eq!(positions.len(), 2);
    let group = positions[0].group.as_ref().expect("parent group");
    assert_eq!(group.id, Some(100));
    assert_eq!(group.name.as_deref(), Some("Родительская группа"));
    assert_eq!(positions[1].item_type.as_deref(), Some("work"));
    assert!(positions[1].group.is_none());
}

#[test]
fn test_deserialize_nomenclature_price_list_services() {
    let json_data = load_fixture("price_list_services.json");

    let services: Vec<PriceListService> = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize price list services: {}\nJSON: {}",
            e, json_data
        )
    });

    let service = &services[0];
    assert_eq!(service.nomenclature_item_id, Some(1));
    assert_eq!(service.kind.as_deref(), Some("service"));
    assert_eq!(service.group.as_ref().and_then(|g| g.code.as_deref()), Some("group_code"));
    assert_eq!(service.price, Some(1000.0));
}
