//! Nomenclature operations.

use crate::models::{Group, Position, PriceListService};
use okdesk_core::request::{decode, ApiCall, ApiRequest, Page};
use okdesk_core::{QueryParams, Result};
use serde::Serialize;
use serde_json::Value;

const GROUPS_PATH: &str = "api/v1/nomenclature/groups";
const ITEMS_PATH: &str = "api/v1/nomenclature/items";

fn price_list_services_path(price_list_id: i64) -> String {
    format!("api/v1/nomenclature/price_lists/{price_list_id}/services")
}

/// Kind of nomenclature position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Service
    Service,
    /// Work
    Work,
    /// Material
    Material,
    /// Product
    Product,
}

impl ItemType {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Work => "work",
            Self::Material => "material",
            Self::Product => "product",
        }
    }
}

fn push_item_types(params: &mut QueryParams, item_types: &[ItemType]) {
    let values: Vec<&str> = item_types.iter().map(|kind| kind.as_str()).collect();
    params.push_list("item_types", &values);
}

/// Search nomenclature groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListGroupsRequest {
    /// Substring of the name or code
    pub search_string: Option<String>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListGroupsRequest {
    type Output = Vec<Group>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("search_string", self.search_string.as_deref());
        self.page.apply(&mut params);
        ApiCall::get(GROUPS_PATH).with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add a nomenclature group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateGroupRequest {
    /// Code
    pub code: String,
    /// Name
    pub name: String,
    /// Parent group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl CreateGroupRequest {
    /// Root group `name` with code `code`.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            parent_id: None,
        }
    }
}

impl ApiRequest for CreateGroupRequest {
    type Output = Group;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(GROUPS_PATH).with_wrapped_json("nomenclature_group", self)
    }

    fn parse_response(&self, value: Value) -> Result<Group> {
        decode(value)
    }
}

/// Fetch one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetGroupRequest {
    /// Group id
    pub group_id: i64,
}

impl ApiRequest for GetGroupRequest {
    type Output = Group;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!("{GROUPS_PATH}/{}", self.group_id))
    }

    fn parse_response(&self, value: Value) -> Result<Group> {
        decode(value)
    }
}

/// Change a group.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdateGroupRequest {
    /// Group id
    #[serde(skip)]
    pub group_id: i64,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New parent group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Activate or deactivate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ApiRequest for UpdateGroupRequest {
    type Output = Group;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{GROUPS_PATH}/{}", self.group_id))
            .with_wrapped_json("nomenclature_group", self)
    }

    fn parse_response(&self, value: Value) -> Result<Group> {
        decode(value)
    }
}

/// Search nomenclature positions.
///
/// `group_id = Some(0)` selects positions outside any group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPositionsRequest {
    /// Substring of the name, article or description
    pub search_string: Option<String>,
    /// Exact code
    pub code: Option<String>,
    /// Kinds to include
    pub item_types: Vec<ItemType>,
    /// Owning group id
    pub group_id: Option<i64>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListPositionsRequest {
    type Output = Vec<Position>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("search_string", self.search_string.as_deref());
        params.push_opt("code", self.code.as_deref());
        push_item_types(&mut params, &self.item_types);
        params.push_opt("group_id", self.group_id);
        self.page.apply(&mut params);
        ApiCall::get(ITEMS_PATH).with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add a nomenclature position.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePositionRequest {
    /// Code
    pub code: String,
    /// Name
    pub name: String,
    /// Kind
    pub item_type: ItemType,
    /// Unit of measure
    pub unit: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Vendor article number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_code: Option<String>,
}

impl CreatePositionRequest {
    /// Position without group or article.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        item_type: ItemType,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            item_type,
            unit: unit.into(),
            description: None,
            group_id: None,
            vendor_code: None,
        }
    }
}

impl ApiRequest for CreatePositionRequest {
    type Output = Position;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(ITEMS_PATH).with_wrapped_json("nomenclature_item", self)
    }

    fn parse_response(&self, value: Value) -> Result<Position> {
        decode(value)
    }
}

/// Fetch one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetPositionRequest {
    /// Position id
    pub position_id: i64,
}

impl ApiRequest for GetPositionRequest {
    type Output = Position;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!("{ITEMS_PATH}/{}", self.position_id))
    }

    fn parse_response(&self, value: Value) -> Result<Position> {
        decode(value)
    }
}

/// Change a position.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct UpdatePositionRequest {
    /// Position id
    #[serde(skip)]
    pub position_id: i64,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    /// New unit of measure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// New vendor article number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_code: Option<String>,
    /// Activate or deactivate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ApiRequest for UpdatePositionRequest {
    type Output = Position;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{ITEMS_PATH}/{}", self.position_id))
            .with_wrapped_json("nomenclature_item", self)
    }

    fn parse_response(&self, value: Value) -> Result<Position> {
        decode(value)
    }
}

/// Positions priced in a price list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNomenclatureServicesRequest {
    /// Price list id
    pub price_list_id: i64,
    /// Substring of the name, article or description
    pub search_string: Option<String>,
    /// Kinds to include
    pub item_types: Vec<ItemType>,
    /// Owning group id, `0` for positions outside any group
    pub group_id: Option<i64>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListNomenclatureServicesRequest {
    type Output = Vec<PriceListService>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("search_string", self.search_string.as_deref());
        push_item_types(&mut params, &self.item_types);
        params.push_opt("group_id", self.group_id);
        self.page.apply(&mut params);
        ApiCall::get(price_list_services_path(self.price_list_id)).with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Price a position in a price list.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AddNomenclatureServiceRequest {
    /// Price list id
    #[serde(skip)]
    pub price_list_id: i64,
    /// Nomenclature position id
    pub nomenclature_item_id: i64,
    /// Price per unit
    pub price: f64,
    /// VAT rate, percent
    pub nds: f64,
}

impl ApiRequest for AddNomenclatureServiceRequest {
    type Output = PriceListService;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(price_list_services_path(self.price_list_id))
            .with_wrapped_json("service", self)
    }

    fn parse_response(&self, value: Value) -> Result<PriceListService> {
        decode(value)
    }
}

/// Change the price of a position in a price list.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct UpdateNomenclatureServiceRequest {
    /// Price list id
    #[serde(skip)]
    pub price_list_id: i64,
    /// Price list line id
    #[serde(skip)]
    pub service_id: i64,
    /// New price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New VAT rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nds: Option<f64>,
    /// Offer or withdraw the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ApiRequest for UpdateNomenclatureServiceRequest {
    type Output = PriceListService;

    fn to_call(&self) -> ApiCall {
        ApiCall::put(format!(
            "{}/{}",
            price_list_services_path(self.price_list_id),
            self.service_id
        ))
        .with_wrapped_json("service", self)
    }

    fn parse_response(&self, value: Value) -> Result<PriceListService> {
        decode(value)
    }
}
