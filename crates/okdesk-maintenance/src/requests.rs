//! Maintenance entity operations.

use crate::models::MaintenanceEntity;
use chrono::NaiveDate;
use okdesk_core::request::{decode, ApiCall, ApiRequest, Page};
use okdesk_core::types::CustomParameters;
use okdesk_core::{AttachmentUpload, MultipartBody, QueryParams, Result};
use serde::Serialize;
use serde_json::Value;

const ENTITIES_PATH: &str = "api/v1/maintenance_entities/";

fn entity_path(entity_id: i64) -> String {
    format!("api/v1/maintenance_entities/{entity_id}")
}

/// Optional attributes of a maintenance entity.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MaintenanceEntityFields {
    /// Service agreement ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_ids: Option<Vec<i64>>,
    /// Address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude and longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
    /// Time zone name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Default assignee employee id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assignee_id: Option<i64>,
    /// Default assignee group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_assignee_group_id: Option<i64>,
    /// Work schedule id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<i64>,
    /// Observer employee ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer_ids: Option<Vec<i64>>,
    /// Observer group ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer_group_ids: Option<Vec<i64>>,
    /// Custom attribute values by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<CustomParameters>,
}

/// Create a maintenance entity for a company.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateMaintenanceEntityRequest {
    /// Name
    pub name: String,
    /// Owning company id
    pub company_id: i64,
    /// Remaining attributes
    #[serde(flatten)]
    pub fields: MaintenanceEntityFields,
}

impl CreateMaintenanceEntityRequest {
    /// Create entity `name` owned by `company_id`.
    pub fn new(name: impl Into<String>, company_id: i64) -> Self {
        Self {
            name: name.into(),
            company_id,
            fields: MaintenanceEntityFields::default(),
        }
    }
}

impl ApiRequest for CreateMaintenanceEntityRequest {
    type Output = MaintenanceEntity;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(ENTITIES_PATH).with_wrapped_json("maintenance_entity", self)
    }

    fn parse_response(&self, value: Value) -> Result<MaintenanceEntity> {
        decode(value)
    }
}

/// Search maintenance entities by name, comment or free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMaintenanceEntitiesRequest {
    /// Name
    pub name: Option<String>,
    /// Comment
    pub comment: Option<String>,
    /// Full-text search string
    pub search_string: Option<String>,
}

impl ApiRequest for SearchMaintenanceEntitiesRequest {
    type Output = Vec<MaintenanceEntity>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_opt("name", self.name.as_deref());
        params.push_opt("comment", self.comment.as_deref());
        params.push_opt("search_string", self.search_string.as_deref());
        ApiCall::get(ENTITIES_PATH).with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Update a maintenance entity. The body is sent unwrapped and repeats the id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateMaintenanceEntityRequest {
    /// Entity id
    pub id: i64,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New owning company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Other attributes to change
    #[serde(flatten)]
    pub fields: MaintenanceEntityFields,
}

impl UpdateMaintenanceEntityRequest {
    /// Update entity `id`.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            company_id: None,
            fields: MaintenanceEntityFields::default(),
        }
    }
}

impl ApiRequest for UpdateMaintenanceEntityRequest {
    type Output = MaintenanceEntity;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(entity_path(self.id)).with_serialized(self)
    }

    fn parse_response(&self, value: Value) -> Result<MaintenanceEntity> {
        decode(value)
    }
}

/// Fetch one maintenance entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetMaintenanceEntityRequest {
    /// Entity id
    pub id: i64,
}

impl ApiRequest for GetMaintenanceEntityRequest {
    type Output = MaintenanceEntity;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(entity_path(self.id))
    }

    fn parse_response(&self, value: Value) -> Result<MaintenanceEntity> {
        decode(value)
    }
}

/// List maintenance entities with filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMaintenanceEntitiesRequest {
    /// Owning company ids
    pub company_ids: Vec<i64>,
    /// Default assignee ids
    pub default_assignee_ids: Vec<i64>,
    /// Default assignee group ids
    pub default_assignee_group_ids: Vec<i64>,
    /// Created on or after
    pub created_since: Option<NaiveDate>,
    /// Created on or before
    pub created_until: Option<NaiveDate>,
    /// Updated on or after
    pub updated_since: Option<NaiveDate>,
    /// Updated on or before
    pub updated_until: Option<NaiveDate>,
    /// Pagination
    pub page: Page,
}

impl ApiRequest for ListMaintenanceEntitiesRequest {
    type Output = Vec<MaintenanceEntity>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_list("company_ids", &self.company_ids);
        params.push_list("default_assignee_ids", &self.default_assignee_ids);
        params.push_list("default_assignee_group_ids", &self.default_assignee_group_ids);
        params.push_date("created_since", self.created_since);
        params.push_date("created_until", self.created_until);
        params.push_date("updated_since", self.updated_since);
        params.push_date("updated_until", self.updated_until);
        self.page.apply(&mut params);
        ApiCall::get("api/v1/maintenance_entities/list").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Upload files to a maintenance entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMaintenanceEntityAttachmentsRequest {
    /// Entity id
    pub id: i64,
    /// Files to attach
    pub attachments: Vec<AttachmentUpload>,
}

impl ApiRequest for AddMaintenanceEntityAttachmentsRequest {
    type Output = MaintenanceEntity;

    fn to_call(&self) -> ApiCall {
        let mut body = MultipartBody::new();
        for (index, upload) in self.attachments.iter().enumerate() {
            let prefix = format!("maintenance_entity[attachments][{index}]");
            body.file(format!("{prefix}[attachment]"), upload.file.clone());
            body.text_opt(format!("{prefix}[is_public]"), upload.is_public);
            body.text_opt(format!("{prefix}[description]"), upload.description.as_deref());
        }
        ApiCall::post(format!("{}/attachments/", entity_path(self.id))).with_multipart(body)
    }

    fn parse_response(&self, value: Value) -> Result<MaintenanceEntity> {
        decode(value)
    }
}
