//! Integration tests for parsing price list data.

use okdesk_price_lists::models::Service;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_deserialize_price_list_services() {
    let fixture_path = fixtures_dir().join("price_list_services.json");
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read price list fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });

    let services: Vec<Service> = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize price list services: {}\nJSON: {}",
            e, json_data
        )
    });

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].kind.as_deref(), Some("service"));
    assert_eq!(services[0].price, Some(1000.0));
    assert_eq!(services[1].price, Some(2450.5));
    assert_eq!(services[1].visible, Some(false));
    assert!(services[1].description.is_none());
}
