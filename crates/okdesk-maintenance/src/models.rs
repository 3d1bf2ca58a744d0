//! Maintenance entity models.

use okdesk_core::types::{Attachment, VendorMap};
use serde::{Deserialize, Serialize};

/// A serviced object belonging to a company.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceEntity {
    /// Entity id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Default assignee employee id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_assignee_id: Option<i64>,
    /// Default assignee group id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_assignee_group_id: Option<i64>,
    /// Owning company id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Time zone (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<VendorMap>,
    /// Contact ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts_ids: Option<Vec<i64>>,
    /// Equipment ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipments_ids: Option<Vec<i64>>,
    /// Latitude and longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
    /// Custom attribute values (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<VendorMap>>,
    /// Work schedule (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<VendorMap>,
    /// Observer employees (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observers: Option<Vec<VendorMap>>,
    /// Observer groups (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer_groups: Option<Vec<VendorMap>>,
    /// Attached files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Service agreements (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreements: Option<Vec<VendorMap>>,
}
