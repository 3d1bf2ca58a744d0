//! Equipment operations.

use crate::models::Equipment;
use chrono::NaiveDate;
use okdesk_core::request::{decode, decode_one_or_many, ApiCall, ApiRequest, Page};
use okdesk_core::types::CustomParameters;
use okdesk_core::{AttributeFilter, QueryParams, Result};
use serde::Serialize;
use serde_json::Value;

fn equipment_path(equipment_id: i64) -> String {
    format!("api/v1/equipments/{equipment_id}")
}

/// Search equipment by inventory number, serial number or free text.
///
/// The vendor answers with a bare object when exactly one piece matches;
/// the output is always a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindEquipmentRequest {
    /// Inventory number
    pub inventory_number: Option<String>,
    /// Serial number
    pub serial_number: Option<String>,
    /// Substring to search for
    pub search_string: Option<String>,
}

impl ApiRequest for FindEquipmentRequest {
    type Output = Vec<Equipment>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("inventory_number", self.inventory_number.as_deref());
        params.push_opt("serial_number", self.serial_number.as_deref());
        params.push_opt("search_string", self.search_string.as_deref());
        ApiCall::get("api/v1/equipments").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode_one_or_many(value)
    }
}

/// Optional equipment attributes shared by creation and update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EquipmentFields {
    /// Manufacturer code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_manufacturer_code: Option<String>,
    /// Model code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_model_code: Option<String>,
    /// Serial number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Inventory number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_number: Option<String>,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Owning company id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Maintenance entity id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_entity_id: Option<i64>,
    /// Parent equipment id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Custom attribute values by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<CustomParameters>,
    /// Service agreement ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_ids: Option<Vec<i64>>,
}

/// Register a piece of equipment.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateEquipmentRequest {
    /// Kind code
    pub equipment_type_code: String,
    /// Remaining attributes
    #[serde(flatten)]
    pub fields: EquipmentFields,
}

impl CreateEquipmentRequest {
    /// New equipment of kind `equipment_type_code`.
    pub fn new(equipment_type_code: impl Into<String>) -> Self {
        Self {
            equipment_type_code: equipment_type_code.into(),
            fields: EquipmentFields::default(),
        }
    }
}

impl ApiRequest for CreateEquipmentRequest {
    type Output = Equipment;

    fn to_call(&self) -> ApiCall {
        ApiCall::post("api/v1/equipments/").with_wrapped_json("equipment", self)
    }

    fn parse_response(&self, value: Value) -> Result<Equipment> {
        decode(value)
    }
}

/// Change equipment attributes. The body is sent unwrapped.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateEquipmentRequest {
    /// Equipment id
    #[serde(skip)]
    pub equipment_id: i64,
    /// New kind code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type_code: Option<String>,
    /// Other attributes to change
    #[serde(flatten)]
    pub fields: EquipmentFields,
}

impl UpdateEquipmentRequest {
    /// Update equipment `equipment_id`.
    #[must_use]
    pub fn new(equipment_id: i64) -> Self {
        Self {
            equipment_id,
            ..Self::default()
        }
    }
}

impl ApiRequest for UpdateEquipmentRequest {
    type Output = Equipment;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(equipment_path(self.equipment_id)).with_serialized(self)
    }

    fn parse_response(&self, value: Value) -> Result<Equipment> {
        decode(value)
    }
}

/// Fetch one piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetEquipmentRequest {
    /// Equipment id
    pub equipment_id: i64,
}

impl ApiRequest for GetEquipmentRequest {
    type Output = Equipment;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(equipment_path(self.equipment_id))
    }

    fn parse_response(&self, value: Value) -> Result<Equipment> {
        decode(value)
    }
}

/// List equipment with filters.
///
/// Passing `0` among the ids selects equipment without a company, entity or
/// agreement respectively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEquipmentRequest {
    /// Company ids
    pub company_ids: Vec<i64>,
    /// Maintenance entity ids
    pub maintenance_entity_ids: Vec<i64>,
    /// Service agreement ids
    pub agreement_ids: Vec<i64>,
    /// Created on or after
    pub created_since: Option<NaiveDate>,
    /// Created on or before
    pub created_until: Option<NaiveDate>,
    /// Kind codes
    pub equipment_kind_codes: Vec<String>,
    /// Manufacturer codes
    pub equipment_manufacturer_codes: Vec<String>,
    /// Model codes
    pub equipment_model_codes: Vec<String>,
    /// Custom attribute filters
    pub custom_parameters: Vec<AttributeFilter>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListEquipmentRequest {
    type Output = Vec<Equipment>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_list("company_ids", &self.company_ids);
        params.push_list("maintenance_entity_ids", &self.maintenance_entity_ids);
        params.push_list("agreement_ids", &self.agreement_ids);
        params.push_date("created_since", self.created_since);
        params.push_date("created_until", self.created_until);
        params.push_list("equipment_kind_codes", &self.equipment_kind_codes);
        params.push_list("equipment_manufacturer_codes", &self.equipment_manufacturer_codes);
        params.push_list("equipment_model_codes", &self.equipment_model_codes);
        params.push_filters("custom_parameters", &self.custom_parameters);
        self.page.apply(&mut params);
        ApiCall::get("api/v1/equipments/list/").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okdesk_core::Direction;
    use serde_json::json;

    #[test]
    fn find_returns_list_for_single_object() {
        let request = FindEquipmentRequest {
            serial_number: Some("1101040003532".into()),
            ..FindEquipmentRequest::default()
        };
        let call = request.to_call();
        assert_eq!(call.path, "api/v1/equipments");
        assert_eq!(
            call.query,
            vec![("serial_number".to_string(), "1101040003532".to_string())]
        );

        let found = request.parse_response(json!({"id": 3})).unwrap();
        assert_eq!(found.len(), 1);
        assert!(request.parse_response(json!({})).unwrap().is_empty());
        assert!(request.parse_response(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn create_is_wrapped_in_equipment() {
        let mut request = CreateEquipmentRequest::new("laptop");
        request.fields.serial_number = Some("SN-1".into());
        request.fields.agreement_ids = Some(vec![2]);
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"equipment": {
                "equipment_type_code": "laptop",
                "serial_number": "SN-1",
                "agreement_ids": [2]
            }}))
        );
    }

    #[test]
    fn update_body_is_unwrapped() {
        let mut request = UpdateEquipmentRequest::new(3);
        request.fields.comment = Some("списан".into());
        let call = request.to_call();
        assert_eq!(call.method.as_str(), "PATCH");
        assert_eq!(call.path, "api/v1/equipments/3");
        assert_eq!(call.json_body(), Some(&json!({"comment": "списан"})));
    }

    #[test]
    fn list_renders_codes_filters_and_page() {
        let request = ListEquipmentRequest {
            company_ids: vec![0],
            equipment_kind_codes: vec!["printer".into(), "laptop".into()],
            custom_parameters: vec![AttributeFilter::string("color", "black")],
            page: Page::of_size(30).from_id(10, Direction::Forward),
            ..ListEquipmentRequest::default()
        };
        let call = request.to_call();
        assert_eq!(call.path, "api/v1/equipments/list/");
        assert_eq!(
            call.query,
            vec![
                ("company_ids[]".to_string(), "0".to_string()),
                ("equipment_kind_codes[]".to_string(), "printer".to_string()),
                ("equipment_kind_codes[]".to_string(), "laptop".to_string()),
                ("custom_parameters[color]".to_string(), "black".to_string()),
                ("page[size]".to_string(), "30".to_string()),
                ("page[from_id]".to_string(), "10".to_string()),
                ("page[direction]".to_string(), "forward".to_string()),
            ]
        );
    }
}
