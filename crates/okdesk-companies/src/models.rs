//! Company models as returned by the Okdesk API.

use okdesk_core::types::{Attachment, VendorMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A client company.
///
/// Every field is optional: the API omits keys it has no value for, and the
/// lookup endpoint may answer with a sparse object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Company {
    /// Company id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Additional (legal) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_name: Option<String>,
    /// Web site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Id in the 1C accounting system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crm_1c_id: Option<String>,
    /// False once archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Latitude and longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
    /// Observers (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observers: Option<Vec<VendorMap>>,
    /// Contacts (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Value>>,
    /// Default assignee (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_assignee: Option<VendorMap>,
    /// Category (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<VendorMap>,
    /// Attached files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Custom attribute values (vendor-shape, untyped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<VendorMap>>,
}

impl Company {
    /// Category code, when the category object carries one.
    #[must_use]
    pub fn category_code(&self) -> Option<&str> {
        self.category.as_ref()?.get("code")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_company_parses() {
        let company: Company = serde_json::from_value(json!({"id": 3, "name": "ООО Ромашка"})).unwrap();
        assert_eq!(company.id, Some(3));
        assert!(company.attachments.is_none());
    }

    #[test]
    fn null_collections_are_tolerated() {
        let company: Company =
            serde_json::from_value(json!({"id": 3, "observers": null, "category": null})).unwrap();
        assert!(company.observers.is_none());
        assert!(company.category_code().is_none());
    }

    #[test]
    fn category_code_reads_raw_map() {
        let company: Company = serde_json::from_value(json!({
            "category": {"id": 1, "code": "vip", "name": "VIP", "color": "#ff0000"}
        }))
        .unwrap();
        assert_eq!(company.category_code(), Some("vip"));
    }
}
