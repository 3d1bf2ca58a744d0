//! Equipment models.

use okdesk_core::types::VendorMap;
use serde::{Deserialize, Serialize};

/// A piece of serviced equipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    /// Equipment id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Inventory number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_number: Option<String>,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Owning company (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<VendorMap>,
    /// Maintenance entity id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_entity_id: Option<i64>,
    /// Parent equipment id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Custom attribute values (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<VendorMap>>,
    /// Kind (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_kind: Option<VendorMap>,
    /// Manufacturer (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_manufacturer: Option<VendorMap>,
    /// Model (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_model: Option<VendorMap>,
    /// Service agreements (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreements: Option<Vec<VendorMap>>,
}

impl Equipment {
    /// Kind code, when the kind object carries one.
    #[must_use]
    pub fn kind_code(&self) -> Option<&str> {
        self.equipment_kind.as_ref()?.get("code")?.as_str()
    }
}
