//! Price list operations.

use crate::models::{PriceList, Service, ServiceWithPriceList};
use okdesk_core::request::{decode, ApiCall, ApiRequest, Page};
use okdesk_core::{QueryParams, Result};
use serde::Serialize;
use serde_json::Value;

fn services_path(price_list_id: i64) -> String {
    format!("api/v1/price_lists/{price_list_id}/services")
}

/// Kind of price list line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Service
    Service,
    /// Work
    Work,
    /// Product
    Product,
}

impl ServiceType {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Work => "work",
            Self::Product => "product",
        }
    }
}

/// All price lists of the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListPriceListsRequest {
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListPriceListsRequest {
    type Output = Vec<PriceList>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        self.page.apply(&mut params);
        ApiCall::get("api/v1/price_lists").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Lines of one price list, filtered by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPriceListServicesRequest {
    /// Price list id
    pub price_list_id: i64,
    /// Kinds to include
    pub types: Vec<ServiceType>,
    /// Pagination
    pub page: Page,
}

impl ListPriceListServicesRequest {
    /// Lines of `price_list_id` whose kind is among `types`.
    #[must_use]
    pub fn new(price_list_id: i64, types: Vec<ServiceType>) -> Self {
        Self {
            price_list_id,
            types,
            page: Page::default(),
        }
    }
}

impl ApiRequest for ListPriceListServicesRequest {
    type Output = Vec<Service>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        let types: Vec<&str> = self.types.iter().map(|kind| kind.as_str()).collect();
        params.push_list("types", &types);
        self.page.apply(&mut params);
        ApiCall::get(services_path(self.price_list_id)).with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add a line to a price list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddPriceListServiceRequest {
    /// Price list id
    #[serde(skip)]
    pub price_list_id: i64,
    /// Code
    pub code: String,
    /// Name
    pub name: String,
    /// Kind
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    /// Unit of measure
    pub unit: String,
    /// Price per unit
    pub price: f64,
    /// VAT rate, percent
    pub nds: f64,
    /// Whether the line is offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiRequest for AddPriceListServiceRequest {
    type Output = Service;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(services_path(self.price_list_id)).with_wrapped_json("service", self)
    }

    fn parse_response(&self, value: Value) -> Result<Service> {
        decode(value)
    }
}

/// Change a price list line addressed by its code.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdatePriceListServiceRequest {
    /// Price list id
    #[serde(skip)]
    pub price_list_id: i64,
    /// Line code
    #[serde(skip)]
    pub code: String,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New kind
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    /// New unit of measure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// New price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New VAT rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nds: Option<f64>,
    /// Offer or withdraw the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdatePriceListServiceRequest {
    /// Update line `code` of `price_list_id`.
    pub fn new(price_list_id: i64, code: impl Into<String>) -> Self {
        Self {
            price_list_id,
            code: code.into(),
            ..Self::default()
        }
    }
}

impl ApiRequest for UpdatePriceListServiceRequest {
    type Output = Service;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!(
            "{}/{}",
            services_path(self.price_list_id),
            urlencoding::encode(&self.code)
        ))
            .with_wrapped_json("service", self)
    }

    fn parse_response(&self, value: Value) -> Result<Service> {
        decode(value)
    }
}

/// Price list lines that may be added to an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAvailableServicesRequest {
    /// Issue id
    pub issue_id: i64,
    /// Substring of the name or code
    pub search_string: Option<String>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListAvailableServicesRequest {
    type Output = Vec<ServiceWithPriceList>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("search_string", self.search_string.as_deref());
        self.page.apply(&mut params);
        ApiCall::get(format!("api/v1/issues/{}/available_services", self.issue_id))
            .with_query(params)
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
    fn services_listing_sends_types_list() {
        let mut request =
            ListPriceListServicesRequest::new(4, vec![ServiceType::Work, ServiceType::Product]);
        request.page = Page::of_size(50);
        let call = request.to_call();
        assert_eq!(call.path, "api/v1/price_lists/4/services");
        assert_eq!(
            call.query,
            vec![
                ("types[]".to_string(), "work".to_string()),
                ("types[]".to_string(), "product".to_string()),
                ("page[size]".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn add_service_is_wrapped() {
        let request = AddPriceListServiceRequest {
            price_list_id: 4,
            code: "visit".into(),
            name: "Выезд инженера".into(),
            service_type: ServiceType::Work,
            unit: "выезд".into(),
            price: 1500.0,
            nds: 20.0,
            visible: None,
            description: None,
        };
        let call = request.to_call();
        assert_eq!(call.method.as_str(), "POST");
        assert_eq!(
            call.json_body(),
            Some(&json!({"service": {
                "code": "visit",
                "name": "Выезд инженера",
                "type": "work",
                "unit": "выезд",
                "price": 1500.0,
                "nds": 20.0
            }}))
        );
    }

    #[test]
    fn update_addresses_line_by_code() {
        let mut request = UpdatePriceListServiceRequest::new(4, "visit");
        request.visible = Some(false);
        let call = request.to_call();
        assert_eq!(call.method.as_str(), "PATCH");
        assert_eq!(call.path, "api/v1/price_lists/4/services/visit");
        assert_eq!(call.json_body(), Some(&json!({"service": {"visible": false}})));
    }

    #[test]
    fn update_encodes_code_as_one_segment() {
        let call = UpdatePriceListServiceRequest::new(4, "a/b?c #1").to_call();
        assert_eq!(call.path, "api/v1/price_lists/4/services/a%2Fb%3Fc%20%231");
        assert!(call.query.is_empty());
    }

    #[test]
    fn available_services_use_issue_path() {
        let request = ListAvailableServicesRequest {
            issue_id: 12,
            search_string: Some("выезд".into()),
            page: Page::default().from_id(7, Direction::Forward),
        };
        let call = request.to_call();
        assert_eq!(call.path, "api/v1/issues/12/available_services");
        assert_eq!(
            call.query,
            vec![
                ("search_string".to_string(), "выезд".to_string()),
                ("page[from_id]".to_string(), "7".to_string()),
                ("page[direction]".to_string(), "forward".to_string()),
            ]
        );
        assert!(ListPriceListsRequest::default().to_call().query.is_empty());
    }
}
