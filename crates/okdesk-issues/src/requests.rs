//! Issue operations.
//!
//! Requests that carry files switch from a JSON body to `multipart/form-data`
//! with Rails-style bracketed field names; without files they send JSON.

use crate::models::{CheckListItem, Comment, Issue, Specification, TimeEntry};
use chrono::{NaiveDate, NaiveDateTime};
use okdesk_core::params::{format_minutes, serialize_iso, serialize_minutes};
use okdesk_core::request::{
    decode, decode_one_or_many, take_path, to_json, ApiCall, ApiRequest, Direction,
};
use okdesk_core::types::{Attachment, CustomParameters, VendorMap};
use okdesk_core::{AttachmentUpload, AttributeFilter, MultipartBody, QueryParams, Result, UploadFile};
use serde::Serialize;
use serde_json::{json, Value};

const ISSUES_PATH: &str = "api/v1/issues/";

fn issue_path(issue_id: i64) -> String {
    format!("api/v1/issues/{issue_id}")
}

/// Who acts on an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorType {
    /// Service desk employee
    Employee,
    /// Client contact
    Contact,
}

impl AuthorType {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Contact => "contact",
        }
    }
}

/// Author of a new issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueAuthor {
    /// Employee or contact id
    pub id: i64,
    /// Kind of author
    #[serde(rename = "type")]
    pub kind: AuthorType,
}

/// Create an issue, optionally with files.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreateIssueRequest {
    /// Title
    pub title: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Client company id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Client contact id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    /// Service agreement id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_id: Option<i64>,
    /// Assignee employee id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    /// Responsible group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Observer employee ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observer_ids: Vec<i64>,
    /// Observer group ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observer_group_ids: Vec<i64>,
    /// Observer contact ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contact_observer_ids: Vec<i64>,
    /// Maintenance entity id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_entity_id: Option<i64>,
    /// Linked equipment ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equipment_ids: Vec<i64>,
    /// Issue type code
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    /// Priority code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Deadline
    #[serde(serialize_with = "serialize_iso", skip_serializing_if = "Option::is_none")]
    pub deadline_at: Option<NaiveDateTime>,
    /// Latest start of execution
    #[serde(serialize_with = "serialize_iso", skip_serializing_if = "Option::is_none")]
    pub start_execution_until: Option<NaiveDateTime>,
    /// Planned execution time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_execution_in_minutes: Option<f64>,
    /// Custom attribute values by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<CustomParameters>,
    /// Parent issue id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Author, when not the token owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<IssueAuthor>,
    /// Files to attach; switches the body to multipart
    #[serde(skip)]
    pub files: Vec<AttachmentUpload>,
}

impl CreateIssueRequest {
    /// New issue titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Attach a file.
    #[must_use]
    pub fn with_file(mut self, file: AttachmentUpload) -> Self {
        self.files.push(file);
        self
    }

    fn multipart(&self) -> Result<MultipartBody> {
        let mut body = MultipartBody::new();
        body.push_value("issue", &to_json(self)?);
        for (index, upload) in self.files.iter().enumerate() {
            let prefix = format!("issue[files_attributes][{index}]");
            body.text_opt(format!("{prefix}[description]"), upload.description.as_deref());
            body.text_opt(format!("{prefix}[is_public]"), upload.is_public);
            body.file(format!("{prefix}[attachment]"), upload.file.clone());
        }
        Ok(body)
    }
}

impl ApiRequest for CreateIssueRequest {
    type Output = i64;

    fn to_call(&self) -> ApiCall {
        let call = ApiCall::post(ISSUES_PATH);
        if self.files.is_empty() {
            call.with_wrapped_json("issue", self)
        } else {
            match self.multipart() {
                Ok(body) => call.with_multipart(body),
                Err(err) => call.rejecting(err),
            }
        }
    }

    fn parse_response(&self, value: Value) -> Result<i64> {
        decode(take_path(value, &["id"]))
    }
}

/// Reassign an issue to an employee and/or group.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ChangeIssueAssigneeRequest {
    /// Issue id
    #[serde(skip)]
    pub issue_id: i64,
    /// New assignee employee id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    /// New responsible group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl ApiRequest for ChangeIssueAssigneeRequest {
    type Output = Issue;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{}/assignees", issue_path(self.issue_id))).with_serialized(self)
    }

    fn parse_response(&self, value: Value) -> Result<Issue> {
        decode(value)
    }
}

/// Move the issue deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeIssueDeadlineRequest {
    /// Issue id
    pub issue_id: i64,
    /// New deadline; `None` sends an empty body
    pub deadline_at: Option<NaiveDateTime>,
}

impl ApiRequest for ChangeIssueDeadlineRequest {
    type Output = Issue;

    fn to_call(&self) -> ApiCall {
        let body = match self.deadline_at {
            Some(deadline) => json!({"deadline_at": format_minutes(deadline)}),
            None => json!({}),
        };
        ApiCall::patch(format!("{}/deadlines", issue_path(self.issue_id))).with_json(body)
    }

    fn parse_response(&self, value: Value) -> Result<Issue> {
        decode(value)
    }
}

/// Change the issue type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeIssueTypeRequest {
    /// Issue id
    pub issue_id: i64,
    /// New type code
    pub code: String,
}

impl ApiRequest for ChangeIssueTypeRequest {
    type Output = Issue;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{}/types", issue_path(self.issue_id)))
            .with_json(json!({"code": self.code}))
    }

    fn parse_response(&self, value: Value) -> Result<Issue> {
        decode(value)
    }
}

/// Overwrite custom attribute values. The vendor answers with an empty,
/// non-JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeIssueParametersRequest {
    /// Issue id
    pub issue_id: i64,
    /// Values by attribute code
    pub custom_parameters: CustomParameters,
}

impl ApiRequest for ChangeIssueParametersRequest {
    type Output = ();

    fn to_call(&self) -> ApiCall {
        ApiCall::post(format!("{}/parameters", issue_path(self.issue_id)))
            .with_json(json!({"custom_parameters": self.custom_parameters}))
            .allowing_non_json()
    }

    fn parse_response(&self, _value: Value) -> Result<()> {
        Ok(())
    }
}

/// Change the issue address.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeIssueAddressRequest {
    /// Issue id
    pub issue_id: i64,
    /// Address text
    pub value: String,
    /// Latitude and longitude
    pub coordinates: Vec<f64>,
}

impl ApiRequest for ChangeIssueAddressRequest {
    type Output = Issue;

    fn to_call(&self) -> ApiCall {
        ApiCall::patch(format!("{}/addresses", issue_path(self.issue_id))).with_json(json!({
            "value": self.value,
            "coordinates": self.coordinates,
        }))
    }

    fn parse_response(&self, value: Value) -> Result<Issue> {
        decode(value)
    }
}

/// Move the issue to another status.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChangeIssueStatusRequest {
    /// Issue id
    #[serde(skip)]
    pub issue_id: i64,
    /// Target status code
    pub code: String,
    /// Postpone until, for the `delayed` status
    #[serde(serialize_with = "serialize_iso", skip_serializing_if = "Option::is_none")]
    pub delay_to: Option<NaiveDateTime>,
    /// Comment left with the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the comment is visible to the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_public: Option<bool>,
    /// Custom attribute values required by the status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<CustomParameters>,
    /// Time entries logged with the change (vendor-shape, untyped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_entry: Option<Vec<Value>>,
    /// Checks to skip, e.g. `check_list`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_options: Option<Vec<String>>,
}

impl ChangeIssueStatusRequest {
    /// Move issue `issue_id` to status `code`.
    pub fn new(issue_id: i64, code: impl Into<String>) -> Self {
        Self {
            issue_id,
            code: code.into(),
            ..Self::default()
        }
    }
}

impl ApiRequest for ChangeIssueStatusRequest {
    type Output = Issue;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(format!("{}/statuses", issue_path(self.issue_id))).with_serialized(self)
    }

    fn parse_response(&self, value: Value) -> Result<Issue> {
        decode(value)
    }
}

/// Comment on an issue, optionally with files.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AddIssueCommentRequest {
    /// Issue id
    #[serde(skip)]
    pub issue_id: i64,
    /// Text
    pub content: String,
    /// Author id
    pub author_id: i64,
    /// Author kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_type: Option<AuthorType>,
    /// Visible to the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Files to attach; switches the body to multipart
    #[serde(skip)]
    pub attachments: Vec<AttachmentUpload>,
}

impl AddIssueCommentRequest {
    /// Comment `content` by `author_id` on `issue_id`.
    pub fn new(issue_id: i64, content: impl Into<String>, author_id: i64) -> Self {
        Self {
            issue_id,
            content: content.into(),
            author_id,
            author_type: None,
            public: None,
            attachments: Vec::new(),
        }
    }

    fn multipart(&self) -> MultipartBody {
        let mut body = MultipartBody::new();
        body.text("comment[content]", self.content.as_str());
        body.text("comment[author_id]", self.author_id.to_string());
        body.text_opt("comment[author_type]", self.author_type.map(AuthorType::as_str));
        body.text_opt("comment[public]", self.public);
        for (index, upload) in self.attachments.iter().enumerate() {
            let prefix = format!("comment[attachments_attributes][{index}]");
            body.file(format!("{prefix}[file]"), upload.file.clone());
            body.text_opt(format!("{prefix}[description]"), upload.description.as_deref());
        }
        body
    }
}

impl ApiRequest for AddIssueCommentRequest {
    type Output = Comment;

    fn to_call(&self) -> ApiCall {
        let call = ApiCall::post(format!("{}/comments", issue_path(self.issue_id)));
        if self.attachments.is_empty() {
            call.with_wrapped_json("comment", self)
        } else {
            call.with_multipart(self.multipart())
        }
    }

    fn parse_response(&self, value: Value) -> Result<Comment> {
        decode(value)
    }
}

/// Comments of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetIssueCommentsRequest {
    /// Issue id
    pub issue_id: i64,
}

impl ApiRequest for GetIssueCommentsRequest {
    type Output = Vec<Comment>;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!("{}/comments", issue_path(self.issue_id)))
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Ids of issues matching the filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIssueIdsRequest {
    /// Assignee employee ids
    pub assignee_ids: Vec<i64>,
    /// Assignee group ids
    pub assignee_group_ids: Vec<i64>,
    /// Company ids
    pub company_ids: Vec<i64>,
    /// Service agreement ids
    pub agreement_ids: Vec<i64>,
    /// Contact ids
    pub contact_ids: Vec<i64>,
    /// Authoring employee ids
    pub author_employee_ids: Vec<i64>,
    /// Authoring contact ids
    pub author_contact_ids: Vec<i64>,
    /// Maintenance entity ids
    pub maintenance_entity_ids: Vec<i64>,
    /// Equipment ids
    pub equipment_ids: Vec<i64>,
    /// Status codes
    pub status: Vec<String>,
    /// Excluded status codes
    pub status_not: Vec<String>,
    /// Only open issues
    pub opened: Option<bool>,
    /// Priority codes
    pub priority: Vec<String>,
    /// Type codes
    pub issue_type: Vec<String>,
    /// Ratings
    pub rate: Vec<String>,
    /// Created on or after
    pub created_since: Option<NaiveDate>,
    /// Created on or before
    pub created_until: Option<NaiveDate>,
    /// Past the deadline
    pub overdue: Option<bool>,
    /// Past the reaction time
    pub overdue_reaction: Option<bool>,
    /// Completed on or after
    pub completed_since: Option<NaiveDate>,
    /// Completed on or before
    pub completed_until: Option<NaiveDate>,
    /// Updated on or after
    pub updated_since: Option<NaiveDate>,
    /// Updated on or before
    pub updated_until: Option<NaiveDate>,
    /// Reacted at or after
    pub reacted_since: Option<NaiveDateTime>,
    /// Reacted at or before
    pub reacted_until: Option<NaiveDateTime>,
    /// Deadline at or after
    pub deadline_since: Option<NaiveDateTime>,
    /// Deadline at or before
    pub deadline_until: Option<NaiveDateTime>,
    /// Execution start at or after
    pub start_execution_since: Option<NaiveDateTime>,
    /// Execution start at or before
    pub start_execution_until: Option<NaiveDateTime>,
    /// Planned reaction at or after
    pub planned_reaction_since: Option<NaiveDateTime>,
    /// Planned reaction at or before
    pub planned_reaction_until: Option<NaiveDateTime>,
    /// Custom attribute filters
    pub custom_parameters: Vec<AttributeFilter>,
}

impl ApiRequest for GetIssueIdsRequest {
    type Output = Vec<i64>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_list("assignee_ids", &self.assignee_ids);
        params.push_list("assignee_group_ids", &self.assignee_group_ids);
        params.push_list("company_ids", &self.company_ids);
        params.push_list("agreement_ids", &self.agreement_ids);
        params.push_list("contact_ids", &self.contact_ids);
        params.push_list("author_employee_ids", &self.author_employee_ids);
        params.push_list("author_contact_ids", &self.author_contact_ids);
        params.push_list("maintenance_entity_ids", &self.maintenance_entity_ids);
        params.push_list("equipment_ids", &self.equipment_ids);
        params.push_list("status", &self.status);
        params.push_list("status_not", &self.status_not);
        params.push_opt("opened", self.opened);
        params.push_list("priority", &self.priority);
        params.push_list("type", &self.issue_type);
        params.push_list("rate", &self.rate);
        params.push_date("created_since", self.created_since);
        params.push_date("created_until", self.created_until);
        params.push_opt("overdue", self.overdue);
        params.push_opt("overdue_reaction", self.overdue_reaction);
        params.push_date("completed_since", self.completed_since);
        params.push_date("completed_until", self.completed_until);
        params.push_date("updated_since", self.updated_since);
        params.push_date("updated_until", self.updated_until);
        params.push_datetime("reacted_since", self.reacted_since);
        params.push_datetime("reacted_until", self.reacted_until);
        params.push_datetime("deadline_since", self.deadline_since);
        params.push_datetime("deadline_until", self.deadline_until);
        params.push_datetime("start_execution_since", self.start_execution_since);
        params.push_datetime("start_execution_until", self.start_execution_until);
        params.push_datetime("planned_reaction_since", self.planned_reaction_since);
        params.push_datetime("planned_reaction_until", self.planned_reaction_until);
        params.push_filters("custom_parameters", &self.custom_parameters);
        ApiCall::get("api/v1/issues/count").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Vec<i64>> {
        decode(value)
    }
}

/// Sort key of the issue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSortField {
    /// Creation time
    CreatedAt,
    /// Last update time
    UpdatedAt,
}

impl IssueSortField {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Full issue records, page by page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIssuesRequest {
    /// Company ids
    pub company_ids: Vec<i64>,
    /// Contact ids
    pub contact_ids: Vec<i64>,
    /// Maintenance entity ids
    pub service_object_ids: Vec<i64>,
    /// Status codes
    pub status_codes: Vec<String>,
    /// Priority codes
    pub priority_codes: Vec<String>,
    /// Type codes
    pub type_codes: Vec<String>,
    /// Created on or after
    pub created_since: Option<NaiveDate>,
    /// Created on or before
    pub created_until: Option<NaiveDate>,
    /// Completed on or after
    pub completed_since: Option<NaiveDate>,
    /// Completed on or before
    pub completed_until: Option<NaiveDate>,
    /// 1-based page number
    pub page_number: Option<u32>,
    /// Page size
    pub page_size: Option<u32>,
    /// Sort key
    pub sorting_field: Option<IssueSortField>,
    /// Sort direction
    pub sorting_direction: Option<Direction>,
}

impl ApiRequest for ListIssuesRequest {
    type Output = Vec<Issue>;

    fn to_call(&self) -> ApiCall {
        let mut params = QueryParams::new();
        params.push_list("company_ids", &self.company_ids);
        params.push_list("contact_ids", &self.contact_ids);
        params.push_list("service_object_ids", &self.service_object_ids);
        params.push_list("status_codes", &self.status_codes);
        params.push_list("priority_codes", &self.priority_codes);
        params.push_list("type_codes", &self.type_codes);
        params.push_date("created_since", self.created_since);
        params.push_date("created_until", self.created_until);
        params.push_date("completed_since", self.completed_since);
        params.push_date("completed_until", self.completed_until);
        params.push_opt("page[number]", self.page_number);
        params.push_opt("page[size]", self.page_size);
        params.push_opt("sorting[field]", self.sorting_field.map(IssueSortField::as_str));
        params.push_opt("sorting[direction]", self.sorting_direction.map(Direction::as_str));
        ApiCall::get("api/v1/issues/list").with_query(params)
    }

    fn parse_response(&self, value: Value) -> Result<Vec<Issue>> {
        decode(value)
    }
}

/// Client satisfaction rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueRating {
    /// Unsatisfied
    Bad,
    /// Neutral
    Normal,
    /// Satisfied
    Good,
}

/// Rate a completed issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateIssueRequest {
    /// Issue id
    pub issue_id: i64,
    /// Rating
    pub rate: IssueRating,
}

impl ApiRequest for RateIssueRequest {
    type Output = Value;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(format!("{}/rates", issue_path(self.issue_id)))
            .with_json(json!({"rate": self.rate}))
    }

    fn parse_response(&self, value: Value) -> Result<Value> {
        Ok(value)
    }
}

/// Services, works and products added to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetIssueSpecificationsRequest {
    /// Issue id
    pub issue_id: i64,
}

impl ApiRequest for GetIssueSpecificationsRequest {
    type Output = Vec<Specification>;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!("{}/services", issue_path(self.issue_id)))
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Add a price list service to an issue.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AddIssueSpecificationRequest {
    /// Issue id
    #[serde(skip)]
    pub issue_id: i64,
    /// Service code
    pub code: String,
    /// Quantity
    pub quantity: f64,
    /// Performing employee id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer_id: Option<i64>,
    /// Price list id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list_id: Option<i64>,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Total overriding the price list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl AddIssueSpecificationRequest {
    /// Add `quantity` of service `code` to issue `issue_id`.
    pub fn new(issue_id: i64, code: impl Into<String>, quantity: f64) -> Self {
        Self {
            issue_id,
            code: code.into(),
            quantity,
            ..Self::default()
        }
    }
}

impl ApiRequest for AddIssueSpecificationRequest {
    type Output = Specification;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(format!("{}/services", issue_path(self.issue_id)))
            .with_wrapped_json("issue_service", self)
    }

    fn parse_response(&self, value: Value) -> Result<Specification> {
        decode(value)
    }
}

/// Time logged on an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetIssueTimeEntriesRequest {
    /// Issue id
    pub issue_id: i64,
}

impl ApiRequest for GetIssueTimeEntriesRequest {
    type Output = Vec<TimeEntry>;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!("{}/time_entries", issue_path(self.issue_id)))
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Log time on an issue.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddIssueTimeEntryRequest {
    /// Issue id
    #[serde(skip)]
    pub issue_id: i64,
    /// Employee who did the work
    pub employee_id: i64,
    /// Duration such as `1:30` or `1.5`
    pub formatted_spent_time: String,
    /// When the work was done
    #[serde(serialize_with = "serialize_minutes")]
    pub logged_at: NaiveDateTime,
    /// Comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Custom attribute values by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<CustomParameters>,
}

impl AddIssueTimeEntryRequest {
    /// Log `formatted_spent_time` for `employee_id` at `logged_at`.
    pub fn new(
        issue_id: i64,
        employee_id: i64,
        formatted_spent_time: impl Into<String>,
        logged_at: NaiveDateTime,
    ) -> Self {
        Self {
            issue_id,
            employee_id,
            formatted_spent_time: formatted_spent_time.into(),
            logged_at,
            comment: None,
            custom_parameters: None,
        }
    }
}

impl ApiRequest for AddIssueTimeEntryRequest {
    type Output = Vec<TimeEntry>;

    fn to_call(&self) -> ApiCall {
        let call = ApiCall::post(format!("{}/time_entries", issue_path(self.issue_id)));
        match to_json(self) {
            Ok(entry) => call.with_json(json!({"time_entries": [entry]})),
            Err(err) => call.rejecting(err),
        }
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode_one_or_many(value)
    }
}

/// One file attached to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetIssueAttachmentRequest {
    /// Issue id
    pub issue_id: i64,
    /// Attachment id
    pub attachment_id: i64,
}

impl ApiRequest for GetIssueAttachmentRequest {
    type Output = Attachment;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!(
            "{}/attachments/{}",
            issue_path(self.issue_id),
            self.attachment_id
        ))
    }

    fn parse_response(&self, value: Value) -> Result<Attachment> {
        decode(value)
    }
}

/// Check list of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetIssueCheckListRequest {
    /// Issue id
    pub issue_id: i64,
}

impl ApiRequest for GetIssueCheckListRequest {
    type Output = Vec<CheckListItem>;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(format!("{}/check_lists/items", issue_path(self.issue_id)))
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode(value)
    }
}

/// Kind of check list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckListItemType {
    /// Checkable point
    Point,
    /// Section header grouping points
    Header,
}

/// New check list entry, possibly with nested entries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckListItemDraft {
    /// Name
    pub name: String,
    /// Point or header
    pub item_type: CheckListItemType,
    /// Must be checked before moving to these statuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_to_status_codes: Option<Vec<String>>,
    /// Must be checked before leaving these statuses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_from_status_codes: Option<Vec<String>>,
    /// Visible to the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_for_clients: Option<bool>,
    /// Planned execution time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_execution_in_minutes: Option<i64>,
    /// Item attribute values (vendor-shape, untyped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<VendorMap>,
    /// Nested entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CheckListItemDraft>,
}

impl CheckListItemDraft {
    /// Checkable point.
    pub fn point(name: impl Into<String>) -> Self {
        Self::new(name, CheckListItemType::Point)
    }

    /// Header grouping other entries.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, CheckListItemType::Header)
    }

    fn new(name: impl Into<String>, item_type: CheckListItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            required_to_status_codes: None,
            required_from_status_codes: None,
            visible_for_clients: None,
            planned_execution_in_minutes: None,
            parameters: None,
            children: Vec::new(),
        }
    }

    /// Nest an entry.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// Append entries to an issue check list.
#[derive(Debug, Clone, PartialEq)]
pub struct AddIssueCheckListItemsRequest {
    /// Issue id
    pub issue_id: i64,
    /// Top-level entries
    pub items: Vec<CheckListItemDraft>,
}

#[derive(Serialize)]
struct CheckListPayload<'a> {
    items: &'a [CheckListItemDraft],
}

impl ApiRequest for AddIssueCheckListItemsRequest {
    type Output = Vec<CheckListItem>;

    fn to_call(&self) -> ApiCall {
        ApiCall::post(format!("{}/check_lists/items", issue_path(self.issue_id)))
            .with_wrapped_json("check_list", &CheckListPayload { items: &self.items })
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode_one_or_many(take_path(value, &["check_list", "items"]))
    }
}

/// Check or uncheck a check list item, optionally with a file.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIssueCheckListItemRequest {
    /// Issue id
    pub issue_id: i64,
    /// Item id
    pub item_id: i64,
    /// New state
    pub checked: bool,
    /// Item attribute values
    pub item_parameters: Option<VendorMap>,
    /// File for the item; switches the body to multipart
    pub attachment: Option<UploadFile>,
}

impl CheckIssueCheckListItemRequest {
    /// Set item `item_id` of issue `issue_id` to `checked`.
    #[must_use]
    pub const fn new(issue_id: i64, item_id: i64, checked: bool) -> Self {
        Self {
            issue_id,
            item_id,
            checked,
            item_parameters: None,
            attachment: None,
        }
    }
}

impl ApiRequest for CheckIssueCheckListItemRequest {
    type Output = Vec<CheckListItem>;

    fn to_call(&self) -> ApiCall {
        let call = ApiCall::patch(format!(
            "{}/check_lists/items/{}/check",
            issue_path(self.issue_id),
            self.item_id
        ));
        match &self.attachment {
            None => {
                let mut item = json!({"checked": self.checked});
                if let Some(parameters) = &self.item_parameters {
                    item["item_parameters"] = Value::Object(parameters.clone());
                }
                call.with_json(json!({"check_list_item": item}))
            }
            Some(file) => {
                let mut body = MultipartBody::new();
                body.text("check_list_item[checked]", self.checked.to_string());
                if let Some(parameters) = &self.item_parameters {
                    body.push_value(
                        "check_list_item[item_parameters]",
                        &Value::Object(parameters.clone()),
                    );
                }
                body.file(
                    "check_list_item[item_parameters][files][0][attachment]",
                    file.clone(),
                );
                call.with_multipart(body)
            }
        }
    }

    fn parse_response(&self, value: Value) -> Result<Self::Output> {
        decode_one_or_many(value)
    }
}

/// One issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetIssueRequest {
    /// Issue id
    pub issue_id: i64,
}

impl ApiRequest for GetIssueRequest {
    type Output = Issue;

    fn to_call(&self) -> ApiCall {
        ApiCall::get(issue_path(self.issue_id))
    }

    fn parse_response(&self, value: Value) -> Result<Issue> {
        decode(value)
    }
}

/// Delete an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteIssueRequest {
    /// Issue id
    pub issue_id: i64,
}

impl ApiRequest for DeleteIssueRequest {
    type Output = ();

    fn to_call(&self) -> ApiCall {
        ApiCall::delete(issue_path(self.issue_id))
    }

    fn parse_response(&self, _value: Value) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okdesk_core::multipart::MultipartField;
    use serde_json::Map;

    fn moment(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn names(call: &ApiCall) -> Vec<&str> {
        call.multipart_body()
            .unwrap()
            .fields()
            .iter()
            .map(MultipartField::name)
            .collect()
    }

    #[test]
    fn create_without_files_sends_wrapped_json() {
        let mut request = CreateIssueRequest::new("Сломался принтер");
        request.company_id = Some(3);
        request.observer_ids = vec![4, 5];
        request.issue_type = Some("service".into());
        request.deadline_at = Some(moment(18, 0));
        request.author = Some(IssueAuthor {
            id: 12,
            kind: AuthorType::Contact,
        });

        let call = request.to_call();
        assert_eq!(call.method.as_str(), "POST");
        assert_eq!(call.path, "api/v1/issues/");
        assert_eq!(
            call.json_body(),
            Some(&json!({"issue": {
                "title": "Сломался принтер",
                "company_id": 3,
                "observer_ids": [4, 5],
                "type": "service",
                "deadline_at": "2024-05-20T18:00:00",
                "author": {"id": 12, "type": "contact"}
            }}))
        );
    }

    #[test]
    fn create_with_files_switches_to_multipart() {
        let mut parameters = Map::new();
        parameters.insert("address".into(), json!("Тверская, 1"));
        let mut request = CreateIssueRequest::new("Замена картриджа").with_file(
            AttachmentUpload::new(UploadFile::from_bytes("photo.jpg", vec![0xff, 0xd8]))
                .with_description("фото")
                .with_public(false),
        );
        request.observer_ids = vec![1, 2];
        request.custom_parameters = Some(parameters);
        request.author = Some(IssueAuthor {
            id: 7,
            kind: AuthorType::Employee,
        });

        let call = request.to_call();
        assert!(call.json_body().is_none());
        assert_eq!(
            names(&call),
            vec![
                "issue[title]",
                "issue[observer_ids][]",
                "issue[observer_ids][]",
                "issue[custom_parameters][address]",
                "issue[author][id]",
                "issue[author][type]",
                "issue[files_attributes][0][description]",
                "issue[files_attributes][0][is_public]",
                "issue[files_attributes][0][attachment]",
            ]
        );
        let body = call.multipart_body().unwrap();
        assert_eq!(body.text_value("issue[author][type]"), Some("employee"));
        assert_eq!(body.text_value("issue[files_attributes][0][is_public]"), Some("false"));
    }

    #[test]
    fn create_returns_new_issue_id() {
        let request = CreateIssueRequest::new("x");
        assert_eq!(request.parse_response(json!({"id": 1056})).unwrap(), 1056);
        assert!(request.parse_response(json!({})).is_err());
    }

    #[test]
    fn assignee_change_sends_only_set_fields() {
        let request = ChangeIssueAssigneeRequest {
            issue_id: 9,
            group_id: Some(2),
            ..ChangeIssueAssigneeRequest::default()
        };
        let call = request.to_call();
        assert_eq!(call.path, "api/v1/issues/9/assignees");
        assert_eq!(call.json_body(), Some(&json!({"group_id": 2})));
    }

    #[test]
    fn deadline_uses_minute_precision() {
        let request = ChangeIssueDeadlineRequest {
            issue_id: 9,
            deadline_at: Some(moment(9, 30)),
        };
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"deadline_at": "2024-05-20 09:30"}))
        );
    }

    #[test]
    fn parameters_change_tolerates_empty_answer() {
        let request = ChangeIssueParametersRequest {
            issue_id: 3,
            custom_parameters: Map::from_iter([("kpi".to_string(), json!(true))]),
        };
        let call = request.to_call();
        assert!(call.allow_non_json);
        assert_eq!(call.json_body(), Some(&json!({"custom_parameters": {"kpi": true}})));
        request.parse_response(json!({})).unwrap();
    }

    #[test]
    fn status_change_includes_only_given_options() {
        let mut request = ChangeIssueStatusRequest::new(4, "delayed");
        request.delay_to = Some(moment(12, 0));
        request.comment_public = Some(false);
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({
                "code": "delayed",
                "delay_to": "2024-05-20T12:00:00",
                "comment_public": false
            }))
        );
    }

    #[test]
    fn comment_without_files_is_json() {
        let mut request = AddIssueCommentRequest::new(8, "Готово", 3);
        request.author_type = Some(AuthorType::Employee);
        request.public = Some(true);
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"comment": {
                "content": "Готово",
                "author_id": 3,
                "author_type": "employee",
                "public": true
            }}))
        );
    }

    #[test]
    fn comment_with_files_uses_attachment_attributes() {
        let mut request = AddIssueCommentRequest::new(8, "Акт", 3);
        request.attachments = vec![AttachmentUpload::new(UploadFile::from_bytes(
            "act.pdf",
            b"%PDF".to_vec(),
        ))
        .with_description("подписан")];
        assert_eq!(
            names(&request.to_call()),
            vec![
                "comment[content]",
                "comment[author_id]",
                "comment[attachments_attributes][0][file]",
                "comment[attachments_attributes][0][description]",
            ]
        );
    }

    #[test]
    fn issue_ids_render_filters_in_order() {
        let request = GetIssueIdsRequest {
            assignee_ids: vec![1, 2],
            status: vec!["opened".into()],
            opened: Some(true),
            created_since: NaiveDate::from_ymd_opt(2024, 1, 1),
            reacted_until: Some(moment(8, 15)),
            custom_parameters: vec![AttributeFilter::checkbox("urgent", true)],
            ..GetIssueIdsRequest::default()
        };
        let call = request.to_call();
        assert_eq!(call.path, "api/v1/issues/count");
        assert_eq!(
            call.query,
            vec![
                ("assignee_ids[]".to_string(), "1".to_string()),
                ("assignee_ids[]".to_string(), "2".to_string()),
                ("status[]".to_string(), "opened".to_string()),
                ("opened".to_string(), "true".to_string()),
                ("created_since".to_string(), "2024-01-01".to_string()),
                ("reacted_until".to_string(), "2024-05-20T08:15:00".to_string()),
                ("custom_parameters[urgent]".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn list_uses_page_number_and_sorting() {
        let request = ListIssuesRequest {
            status_codes: vec!["completed".into()],
            page_number: Some(2),
            page_size: Some(50),
            sorting_field: Some(IssueSortField::UpdatedAt),
            sorting_direction: Some(Direction::Reverse),
            ..ListIssuesRequest::default()
        };
        assert_eq!(
            request.to_call().query,
            vec![
                ("status_codes[]".to_string(), "completed".to_string()),
                ("page[number]".to_string(), "2".to_string()),
                ("page[size]".to_string(), "50".to_string()),
                ("sorting[field]".to_string(), "updated_at".to_string()),
                ("sorting[direction]".to_string(), "reverse".to_string()),
            ]
        );
    }

    #[test]
    fn rating_is_lowercase() {
        let request = RateIssueRequest {
            issue_id: 2,
            rate: IssueRating::Good,
        };
        assert_eq!(request.to_call().json_body(), Some(&json!({"rate": "good"})));
    }

    #[test]
    fn specification_is_wrapped_in_issue_service() {
        let mut request = AddIssueSpecificationRequest::new(5, "install", 2.0);
        request.discount = Some(10.0);
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"issue_service": {"code": "install", "quantity": 2.0, "discount": 10.0}}))
        );
    }

    #[test]
    fn time_entry_is_sent_as_single_element_list() {
        let request = AddIssueTimeEntryRequest::new(5, 3, "1:30", moment(17, 45));
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"time_entries": [{
                "employee_id": 3,
                "formatted_spent_time": "1:30",
                "logged_at": "2024-05-20 17:45"
            }]}))
        );
        assert_eq!(request.parse_response(json!({"id": 1})).unwrap().len(), 1);
        assert_eq!(request.parse_response(json!([{"id": 1}, {"id": 2}])).unwrap().len(), 2);
    }

    #[test]
    fn check_list_drafts_nest_children() {
        let request = AddIssueCheckListItemsRequest {
            issue_id: 6,
            items: vec![CheckListItemDraft::header("Подготовка")
                .with_child(CheckListItemDraft::point("Выключить питание"))],
        };
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"check_list": {"items": [{
                "name": "Подготовка",
                "item_type": "header",
                "children": [{"name": "Выключить питание", "item_type": "point"}]
            }]}}))
        );

        let items = request
            .parse_response(json!({"check_list": {"items": [{"id": 1}, {"id": 2, "parent_id": 1}]}}))
            .unwrap();
        assert_eq!(items[1].parent_id, Some(1));
        assert!(request.parse_response(json!({})).unwrap().is_empty());
    }

    #[test]
    fn checking_item_with_file_uses_multipart() {
        let mut request = CheckIssueCheckListItemRequest::new(6, 40, true);
        request.item_parameters = Some(Map::from_iter([("note".to_string(), json!("ok"))]));
        request.attachment = Some(UploadFile::from_bytes("scan.png", vec![1]));

        let call = request.to_call();
        assert_eq!(call.method.as_str(), "PATCH");
        assert_eq!(call.path, "api/v1/issues/6/check_lists/items/40/check");
        assert_eq!(
            names(&call),
            vec![
                "check_list_item[checked]",
                "check_list_item[item_parameters][note]",
                "check_list_item[item_parameters][files][0][attachment]",
            ]
        );
        assert_eq!(
            call.multipart_body().unwrap().text_value("check_list_item[checked]"),
            Some("true")
        );
    }

    #[test]
    fn checking_item_without_file_is_json() {
        let request = CheckIssueCheckListItemRequest::new(6, 40, false);
        assert_eq!(
            request.to_call().json_body(),
            Some(&json!({"check_list_item": {"checked": false}}))
        );
    }

    #[test]
    fn delete_expects_no_body() {
        let call = DeleteIssueRequest { issue_id: 3 }.to_call();
        assert_eq!(call.method.as_str(), "DELETE");
        assert_eq!(call.path, "api/v1/issues/3");
        assert!(!call.allow_non_json);
    }
}
