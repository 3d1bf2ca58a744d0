//! Vendor shapes shared across resources.
//!
//! Several nested objects in Okdesk responses are returned as loosely typed
//! JSON (authors, ratings, categories and similar). Models keep those as
//! [`VendorMap`]; the pair types below describe their usual layout and can be
//! obtained with [`typed`] when a caller wants them.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Untyped JSON object as returned by the vendor.
pub type VendorMap = Map<String, Value>;

/// Custom attribute values keyed by attribute code.
pub type CustomParameters = Map<String, Value>;

/// Read a vendor object as a typed shape.
///
/// Returns `None` when the object does not fit `T`.
#[must_use]
pub fn typed<T: DeserializeOwned>(map: &VendorMap) -> Option<T> {
    serde_json::from_value(Value::Object(map.clone())).ok()
}

/// Deserialize an optional vendor timestamp.
///
/// Accepts RFC 3339 (`2019-10-29T17:31:30.675+03:00`) and offset-less
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` forms, the latter read as UTC.
/// A bare `YYYY-MM-DD` date is read as UTC midnight.
/// `null` and the empty string map to `None`.
///
/// # Errors
///
/// Fails on any other string.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(moment));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Some(naive.and_utc().fixed_offset()))
        .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

/// File attached to a company, issue or other resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    /// Attachment id
    #[serde(default)]
    pub id: Option<i64>,
    /// Original file name
    #[serde(default)]
    pub attachment_file_name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub attachment_file_size: Option<i64>,
    /// Whether clients can see the file
    #[serde(default)]
    pub is_public: Option<bool>,
    /// Upload time
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Temporary download URL
    #[serde(default)]
    pub attachment_url: Option<String>,
}

/// `{id, name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdNamePair {
    /// Identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// `{code, name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeNamePair {
    /// Code
    #[serde(default)]
    pub code: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// `{id, value}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdValuePair {
    /// Identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Value
    #[serde(default)]
    pub value: Option<String>,
}

/// `{id, name, type}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdNameTypePair {
    /// Identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Kind of referenced entity, e.g. `employee` or `contact`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// `{id, code, name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeIdNamePair {
    /// Identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Code
    #[serde(default)]
    pub code: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Company category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Code
    #[serde(default)]
    pub code: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Label colour
    #[serde(default)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attachment_tolerates_missing_keys() {
        let attachment: Attachment = serde_json::from_value(json!({"id": 4})).unwrap();
        assert_eq!(attachment.id, Some(4));
        assert!(attachment.created_at.is_none());
    }

    #[test]
    fn attachment_parses_offset_timestamp() {
        let attachment: Attachment = serde_json::from_value(json!({
            "id": 1,
            "attachment_file_name": "act.pdf",
            "is_public": false,
            "created_at": "2019-10-29T17:31:30.675+03:00"
        }))
        .unwrap();
        let created = attachment.created_at.unwrap();
        assert_eq!(created.offset().local_minus_utc(), 3 * 3600);
    }

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "lenient_timestamp")]
        at: Option<DateTime<FixedOffset>>,
    }

    #[test]
    fn lenient_timestamp_accepts_vendor_forms() {
        let parse = |value: Value| serde_json::from_value::<Stamped>(json!({"at": value})).unwrap().at;

        assert!(parse(json!("2024-01-02T03:04:05+03:00")).is_some());
        let naive = parse(json!("2024-01-02 03:04:05")).unwrap();
        assert_eq!(naive.offset().local_minus_utc(), 0);
        assert!(parse(json!("")).is_none());
        assert!(parse(Value::Null).is_none());
        assert!(serde_json::from_value::<Stamped>(json!({})).unwrap().at.is_none());
        assert!(serde_json::from_value::<Stamped>(json!({"at": "yesterday"})).is_err());
    }

    #[test]
    fn lenient_timestamp_reads_bare_date_as_utc_midnight() {
        let parsed: Stamped = serde_json::from_value(json!({"at": "2024-03-15"})).unwrap();
        let at = parsed.at.unwrap();
        assert_eq!(at.offset().local_minus_utc(), 0);
        assert_eq!(at.to_rfc3339(), "2024-03-15T00:00:00+00:00");
        assert!(serde_json::from_value::<Stamped>(json!({"at": "2024-13-40"})).is_err());
    }

    #[test]
    fn typed_reads_vendor_map() {
        let Value::Object(map) = json!({"id": 5, "name": "Ivan", "type": "employee"}) else {
            unreachable!()
        };
        let author: IdNameTypePair = typed(&map).unwrap();
        assert_eq!(author.kind.as_deref(), Some("employee"));

        let mismatch: Option<IdNamePair> = typed(&serde_json::Map::from_iter([(
            "id".to_string(),
            json!("not a number"),
        )]));
        assert!(mismatch.is_none());
    }
}
