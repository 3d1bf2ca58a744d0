//! Reference catalog operations.

use crate::models::{EquipmentKind, EquipmentManufacturer, EquipmentModel};
use okdesk_core::request::{decode, ApiCall, ApiRequest, Page};
use okdesk_core::{QueryParams, Result};
use serde::Serialize;
use serde_json::Value;

const MANUFACTURERS_PATH: &str = "api/v1/equipments/manufacturers/";
const MODELS_PATH: &str = "api/v1/equipments/models/";
const KINDS_PATH: &str = "api/v1/equipments/kinds/";

fn search_call(path: &str, search_string: Option<&str>, page: &Page) -> ApiCall {
    let mut params = QueryParams::new();
    params.push_opt("search_string", search_string);
    page.apply(&mut params);
    ApiCall::get(path).with_query(params)
}

/// Search manufacturers by name or code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListManufacturersRequest {
    /// Substring of the name or code
    pub search_string: Option<String>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListManufacturersRequest {
    type Output = Vec<EquipmentManufacturer>;

    fn to_call(&self) -> ApiCall {
        search_call(MANUFACTURERS_PATH, self.search_string.as_deref(), &self.page)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add a manufacturer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateManufacturerRequest {
    /// Name
    pub name: String,
    /// Code
    pub code: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateManufacturerRequest {
    /// Manufacturer `name` with code `code`.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
        }
    }
}

impl ApiRequest for CreateManufacturerRequest {
    type Output = EquipmentManufacturer;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(MANUFACTURERS_PATH).with_wrapped_json("equipment_manufacturer", self)
    }

    fn parse_response(&self, value: Value) -> Result<EquipmentManufacturer> {
        decode(value)
    }
}

/// Change a manufacturer.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdateManufacturerRequest {
    /// Manufacturer id
    #[serde(skip)]
    pub id: i64,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Show or hide in pickers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ApiRequest for UpdateManufacturerRequest {
    type Output = EquipmentManufacturer;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{MANUFACTURERS_PATH}{}", self.id))
            .with_wrapped_json("equipment_manufacturer", self)
    }

    fn parse_response(&self, value: Value) -> Result<EquipmentManufacturer> {
        decode(value)
    }
}

/// Search equipment models by name or code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEquipmentModelsRequest {
    /// Substring of the name or code
    pub search_string: Option<String>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListEquipmentModelsRequest {
    type Output = Vec<EquipmentModel>;

    fn to_call(&self) -> ApiCall {
        search_call(MODELS_PATH, self.search_string.as_deref(), &self.page)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add an equipment model.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateEquipmentModelRequest {
    /// Name
    pub name: String,
    /// Code
    pub code: String,
    /// Kind id
    pub equipment_kind_id: i64,
    /// Manufacturer id
    pub equipment_manufacturer_id: i64,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiRequest for CreateEquipmentModelRequest {
    type Output = EquipmentModel;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(MODELS_PATH).with_wrapped_json("equipment_model", self)
    }

    fn parse_response(&self, value: Value) -> Result<EquipmentModel> {
        decode(value)
    }
}

/// Change an equipment model.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdateEquipmentModelRequest {
    /// Model id
    #[serde(skip)]
    pub id: i64,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Show or hide in pickers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// New kind id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_kind_id: Option<i64>,
    /// New manufacturer id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_manufacturer_id: Option<i64>,
}

impl ApiRequest for UpdateEquipmentModelRequest {
    type Output = EquipmentModel;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{MODELS_PATH}{}", self.id))
            .with_wrapped_json("equipment_model", self)
    }

    fn parse_response(&self, value: Value) -> Result<EquipmentModel> {
        decode(value)
    }
}

/// Search equipment kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEquipmentKindsRequest {
    /// Substring of the name or code
    pub search_string: Option<String>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListEquipmentKindsRequest {
    type Output = Vec<EquipmentKind>;

    fn to_call(&self) -> ApiCall {
        search_call(KINDS_PATH, self.search_string.as_deref(), &self.page)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add an equipment kind.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateEquipmentKindRequest {
    /// Name
    pub name: String,
    /// Code
    pub code: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Codes of equipment attributes bound to the kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_codes: Option<Vec<String>>,
}

impl CreateEquipmentKindRequest {
    /// Kind `name` with code `code`.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
            parameter_codes: None,
        }
    }
}

impl ApiRequest for CreateEquipmentKindRequest {
    type Output = EquipmentKind;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(KINDS_PATH).with_wrapped_json("equipment_kind", self)
    }

    fn parse_response(&self, value: Value) -> Result<EquipmentKind> {
        decode(value)
    }
}
