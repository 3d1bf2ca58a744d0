//! Asynchronous issues client.

use crate::models::{CheckListItem, Comment, Issue, Specification, TimeEntry};
use crate::requests::{
    AddIssueCheckListItemsRequest, AddIssueCommentRequest, AddIssueSpecificationRequest,
    AddIssueTimeEntryRequest, ChangeIssueAddressRequest, ChangeIssueAssigneeRequest,
    ChangeIssueDeadlineRequest, ChangeIssueParametersRequest, ChangeIssueStatusRequest,
    ChangeIssueTypeRequest, CheckIssueCheckListItemRequest, CheckListItemDraft,
    CreateIssueRequest, DeleteIssueRequest, GetIssueAttachmentRequest, GetIssueCheckListRequest,
    GetIssueCommentsRequest, GetIssueIdsRequest, GetIssueRequest, GetIssueSpecificationsRequest,
    GetIssueTimeEntriesRequest, IssueRating, ListIssuesRequest, RateIssueRequest,
};
use crate::Result;
use chrono::NaiveDateTime;
use okdesk_core::client::{send, Transport};
use okdesk_core::types::{Attachment, CustomParameters};
use okdesk_core::{ApiRequest, OkdeskClient};
use serde_json::Value;
use std::sync::Arc;

/// Client for the issues endpoints.
#[derive(Clone)]
pub struct IssuesClient {
    transport: Arc<dyn Transport>,
}

impl IssuesClient {
    /// Wrap an HTTP client.
    #[must_use]
    pub fn new(client: OkdeskClient) -> Self {
        Self::with_transport(Arc::new(client))
    }

    /// Use an arbitrary transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create an issue and return its id.
    pub async fn create_issue(&self, request: &CreateIssueRequest) -> Result<i64> {
        self.send(request).await
    }

    /// Reassign an issue.
    pub async fn change_issue_assignee(
        &self,
        request: &ChangeIssueAssigneeRequest,
    ) -> Result<Issue> {
        self.send(request).await
    }

    /// Move the deadline.
    pub async fn change_issue_deadline(
        &self,
        issue_id: i64,
        deadline_at: Option<NaiveDateTime>,
    ) -> Result<Issue> {
        self.send(&ChangeIssueDeadlineRequest {
            issue_id,
            deadline_at,
        })
        .await
    }

    /// Change the issue type.
    pub async fn change_issue_type(&self, issue_id: i64, code: impl Into<String>) -> Result<Issue> {
        self.send(&ChangeIssueTypeRequest {
            issue_id,
            code: code.into(),
        })
        .await
    }

    /// Overwrite custom attribute values.
    pub async fn change_issue_parameters(
        &self,
        issue_id: i64,
        custom_parameters: CustomParameters,
    ) -> Result<()> {
        self.send(&ChangeIssueParametersRequest {
            issue_id,
            custom_parameters,
        })
        .await
    }

    /// Change the address.
    pub async fn change_issue_address(
        &self,
        issue_id: i64,
        value: impl Into<String>,
        coordinates: Vec<f64>,
    ) -> Result<Issue> {
        self.send(&ChangeIssueAddressRequest {
            issue_id,
            value: value.into(),
            coordinates,
        })
        .await
    }

    /// Change the status.
    pub async fn change_issue_status(&self, request: &ChangeIssueStatusRequest) -> Result<Issue> {
        self.send(request).await
    }

    /// Add a comment.
    pub async fn add_issue_comment(&self, request: &AddIssueCommentRequest) -> Result<Comment> {
        self.send(request).await
    }

    /// Comments of an issue.
    pub async fn get_issue_comments(&self, issue_id: i64) -> Result<Vec<Comment>> {
        self.send(&GetIssueCommentsRequest { issue_id }).await
    }

    /// Ids of matching issues.
    pub async fn get_issue_ids(&self, request: &GetIssueIdsRequest) -> Result<Vec<i64>> {
        self.send(request).await
    }

    /// Full issue records.
    pub async fn list_issues(&self, request: &ListIssuesRequest) -> Result<Vec<Issue>> {
        self.send(request).await
    }

    /// Rate an issue. The vendor reply is returned as is.
    pub async fn rate_issue(&self, issue_id: i64, rate: IssueRating) -> Result<Value> {
        self.send(&RateIssueRequest { issue_id, rate }).await
    }

    /// Specification lines of an issue.
    pub async fn get_issue_specifications(&self, issue_id: i64) -> Result<Vec<Specification>> {
        self.send(&GetIssueSpecificationsRequest { issue_id }).await
    }

    /// Add a specification line.
    pub async fn add_issue_specification(
        &self,
        request: &AddIssueSpecificationRequest,
    ) -> Result<Specification> {
        self.send(request).await
    }

    /// Logged time of an issue.
    pub async fn get_issue_time_entries(&self, issue_id: i64) -> Result<Vec<TimeEntry>> {
        self.send(&GetIssueTimeEntriesRequest { issue_id }).await
    }

    /// Log time.
    pub async fn add_issue_time_entry(
        &self,
        request: &AddIssueTimeEntryRequest,
    ) -> Result<Vec<TimeEntry>> {
        self.send(request).await
    }

    /// One attachment of an issue.
    pub async fn get_issue_attachment(
        &self,
        issue_id: i64,
        attachment_id: i64,
    ) -> Result<Attachment> {
        self.send(&GetIssueAttachmentRequest {
            issue_id,
            attachment_id,
        })
        .await
    }

    /// Check list of an issue.
    pub async fn get_issue_check_list(&self, issue_id: i64) -> Result<Vec<CheckListItem>> {
        self.send(&GetIssueCheckListRequest { issue_id }).await
    }

    /// Append check list entries.
    pub async fn add_issue_check_list_items(
        &self,
        issue_id: i64,
        items: Vec<CheckListItemDraft>,
    ) -> Result<Vec<CheckListItem>> {
        self.send(&AddIssueCheckListItemsRequest { issue_id, items })
            .await
    }

    /// Check or uncheck a check list item.
    pub async fn check_issue_check_list_item(
        &self,
        request: &CheckIssueCheckListItemRequest,
    ) -> Result<Vec<CheckListItem>> {
        self.send(request).await
    }

    /// Fetch an issue.
    pub async fn get_issue(&self, issue_id: i64) -> Result<Issue> {
        self.send(&GetIssueRequest { issue_id }).await
    }

    /// Delete an issue.
    pub async fn delete_issue(&self, issue_id: i64) -> Result<()> {
        self.send(&DeleteIssueRequest { issue_id }).await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okdesk_core::{ApiCall, AttachmentUpload, ClientConfig, Error, UploadFile};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    mockall::mock! {
        Transport {}

        #[async_trait::async_trait]
        impl Transport for Transport {
            async fn execute(&self, call: ApiCall) -> Result<Value>;
        }
    }

    fn test_client(server: &MockServer) -> IssuesClient {
        let config = ClientConfig::custom_endpoint(server.uri(), "token").unwrap();
        IssuesClient::new(OkdeskClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn create_issue_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/issues/"))
            .and(query_param("api_token", "token"))
            .and(body_json(json!({"issue": {"title": "Нет интернета", "priority": "high"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2051})))
            .mount(&server)
            .await;

        let mut request = CreateIssueRequest::new("Нет интернета");
        request.priority = Some("high".into());
        let id = test_client(&server).create_issue(&request).await.unwrap();
        assert_eq!(id, 2051);
    }

    #[tokio::test]
    async fn create_issue_with_file_posts_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/issues/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2052})))
            .mount(&server)
            .await;

        let request = CreateIssueRequest::new("Скан").with_file(AttachmentUpload::new(
            UploadFile::from_bytes("scan.pdf", b"%PDF".to_vec()),
        ));
        let id = test_client(&server).create_issue(&request).await.unwrap();
        assert_eq!(id, 2052);

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("multipart/form-data"));
        let raw = String::from_utf8_lossy(&requests[0].body);
        assert!(raw.contains("name=\"issue[files_attributes][0][attachment]\"; filename=\"scan.pdf\""));
    }

    #[tokio::test]
    async fn change_parameters_accepts_non_json_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/issues/5/parameters"))
            .and(body_json(json!({"custom_parameters": {"kpi": "yes"}})))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let mut parameters = CustomParameters::new();
        parameters.insert("kpi".into(), json!("yes"));
        test_client(&server)
            .change_issue_parameters(5, parameters)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_issue_reports_missing_issue() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/issues/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"errors": "Заявка не найдена"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server).get_issue(404).await.unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(api.messages, vec!["Заявка не найдена".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn issue_ids_are_listed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/issues/count"))
            .and(query_param("company_ids[]", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([10, 11, 12])))
            .mount(&server)
            .await;

        let request = GetIssueIdsRequest {
            company_ids: vec![8],
            ..GetIssueIdsRequest::default()
        };
        let ids = test_client(&server).get_issue_ids(&request).await.unwrap();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn check_list_item_reply_is_normalised() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|call| call.path == "api/v1/issues/3/check_lists/items/7/check")
            .times(1)
            .returning(|_| Ok(json!({"id": 7, "checked": true})));

        let client = IssuesClient::with_transport(Arc::new(transport));
        let items = client
            .check_issue_check_list_item(&CheckIssueCheckListItemRequest::new(3, 7, true))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].checked, Some(true));
    }

    #[tokio::test]
    async fn delete_issue_ignores_reply_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|call| call.method.as_str() == "DELETE" && call.path == "api/v1/issues/9")
            .returning(|_| Ok(json!({})));

        IssuesClient::with_transport(Arc::new(transport))
            .delete_issue(9)
            .await
            .unwrap();
    }
}
