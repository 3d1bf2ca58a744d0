//! Company operations.

use crate::models::Company;
use chrono::NaiveDate;
use okdesk_core::request::{decode, ApiCall, ApiRequest, Page};
use okdesk_core::types::{Attachment, CustomParameters};
use okdesk_core::{AttributeFilter, QueryParams, Result};
use serde::Serialize;
use serde_json::Value;

const COMPANIES_PATH: &str = "api/v1/companies/";

fn company_path(company_id: i64) -> String {
    format!("api/v1/companies/{company_id}")
}

/// Look up one company by any of its identifying attributes.
///
/// Answers `None` when the service returns an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindCompanyRequest {
    /// Exact name
    pub name: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Company id
    pub id: Option<i64>,
    /// Id in 1C
    pub crm_1c_id: Option<String>,
    /// Full-text search string
    pub search_string: Option<String>,
}

impl ApiRequest for FindCompanyRequest {
    type Output = Option<Company>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("name", self.name.as_deref());
        params.push_opt("phone", self.phone.as_deref());
        params.push_opt("id", self.id);
        params.push_opt("crm_1c_id", self.crm_1c_id.as_deref());
        params.push_opt("search_string", self.search_string.as_deref());
        ApiCall::get(COMPANIES_PATH).with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        match value {
            Value::Null => Ok(None),
            Value::Object(ref map) if map.is_empty() => Ok(None),
            found => decode(found).map(Some),
        }
    }
}

/// Optional attributes shared by company creation and update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CompanyFields {
    /// Additional (legal) name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_name: Option<String>,
    /// Web site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude and longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Observer employee ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer_ids: Option<Vec<i64>>,
    /// Default assignee employee id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assignee_id: Option<i64>,
    /// Category code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_code: Option<String>,
    /// Id in 1C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm_1c_id: Option<String>,
    /// Custom attribute values by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<CustomParameters>,
}

/// Create a company.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateCompanyRequest {
    /// Name
    pub name: String,
    /// Remaining attributes
    #[serde(flatten)]
    pub fields: CompanyFields,
}

impl CreateCompanyRequest {
    /// Create a company called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: CompanyFields::default(),
        }
    }

    /// Adjust the remaining attributes.
    #[must_use]
    pub fn with(mut self, edit: impl FnOnce(&mut CompanyFields)) -> Self {
        edit(&mut self.fields);
        self
    }
}

impl ApiRequest for CreateCompanyRequest {
    type Output = Company;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(COMPANIES_PATH).with_wrapped_json("company", self)
    }

    fn parse_response(&self, value: Value) -> Result<Company> {
        decode(value)
    }
}

/// Update a company. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateCompanyRequest {
    /// Company id
    #[serde(skip)]
    pub company_id: i64,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attributes to change
    #[serde(flatten)]
    pub fields: CompanyFields,
}

impl UpdateCompanyRequest {
    /// Update company `company_id`.
    #[must_use]
    pub fn new(company_id: i64) -> Self {
        Self {
            company_id,
            name: None,
            fields: CompanyFields::default(),
        }
    }

    /// Rename the company.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adjust the attributes to change.
    #[must_use]
    pub fn with(mut self, edit: impl FnOnce(&mut CompanyFields)) -> Self {
        edit(&mut self.fields);
        self
    }
}

impl ApiRequest for UpdateCompanyRequest {
    type Output = Company;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(company_path(self.company_id)).with_wrapped_json("company", self)
    }

    fn parse_response(&self, value: Value) -> Result<Company> {
        decode(value)
    }
}

/// List companies matching filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCompaniesRequest {
    /// Category ids
    pub category_ids: Vec<i64>,
    /// Default assignee ids
    pub default_assignee_ids: Vec<i64>,
    /// Default assignee group ids
    pub default_assignee_group_ids: Vec<i64>,
    /// Observer employee ids
    pub observer_ids: Vec<i64>,
    /// Observer group ids
    pub observer_group_ids: Vec<i64>,
    /// Created on or after
    pub created_since: Option<NaiveDate>,
    /// Created on or before
    pub created_until: Option<NaiveDate>,
    /// Custom attribute filters
    pub custom_parameters: Vec<AttributeFilter>,
    /// Name
    pub name: Option<String>,
    /// Additional name
    pub additional_name: Option<String>,
    /// Id in 1C
    pub crm_1c_id: Option<String>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListCompaniesRequest {
    type Output = Vec<Company>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_list("category_ids", &self.category_ids);
        params.push_list("default_assignee_ids", &self.default_assignee_ids);
        params.push_list("default_assignee_group_ids", &self.default_assignee_group_ids);
        params.push_list("observer_ids", &self.observer_ids);
        params.push_list("observer_group_ids", &self.observer_group_ids);
        params.push_date("created_since", self.created_since);
        params.push_date("created_until", self.created_until);
        params.push_filters("custom_parameters", &self.custom_parameters);
        params.push_opt("name", self.name.as_deref());
        params.push_opt("additional_name", self.additional_name.as_deref());
        params.push_opt("crm_1c_id", self.crm_1c_id.as_deref());
        self.page.apply(&mut params);
        ApiCall::get("api/v1/companies/list").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Vec<Company>> {
        decode(value)
    }
}

/// Fetch one attachment of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCompanyAttachmentRequest {
    /// Company id
    pub company_id: i64,
    /// Attachment id
    pub attachment_id: i64,
}

impl ApiRequest for GetCompanyAttachmentRequest {
    type Output = Attachment;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!(
            "api/v1/companies/{}/attachments/{}",
            self.company_id, self.attachment_id
        ))
    }

    fn parse_response(&self, value: Value) -> Result<Attachment> {
        decode(value)
    }
}

/// Archive (deactivate) a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveCompanyRequest {
    /// Company id
    pub company_id: i64,
}

impl ApiRequest for ArchiveCompanyRequest {
    type Output = Company;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("api/v1/companies/{}/activations", self.company_id))
    }

    fn parse_response(&self, value: Value) -> Result<Company> {
        decode(value)
    }
}
