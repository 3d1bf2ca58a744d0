//! Asynchronous maintenance entities client.

use crate::models::MaintenanceEntity;
use crate::requests::{
    AddMaintenanceEntityAttachmentsRequest, CreateMaintenanceEntityRequest,
    GetMaintenanceEntityRequest, ListMaintenanceEntitiesRequest,
    SearchMaintenanceEntitiesRequest, UpdateMaintenanceEntityRequest,
};
use crate::Result;
use okdesk_core::client::{send, Transport};
use okdesk_core::{ApiRequest, AttachmentUpload, OkdeskClient};
use std::sync::Arc;

/// Client for the maintenance entities endpoints.
#[derive(Clone)]
pub struct MaintenanceEntitiesClient {
    transport: Arc<dyn Transport>,
}

impl MaintenanceEntitiesClient {
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

    /// Create a maintenance entity.
    pub async fn create_maintenance_entity(
        &self,
        request: &CreateMaintenanceEntityRequest,
    ) -> Result<MaintenanceEntity> {
        self.send(request).await
    }

    /// Search maintenance entities.
    pub async fn search_maintenance_entities(
        &self,
        request: &SearchMaintenanceEntitiesRequest,
    ) -> Result<Vec<MaintenanceEntity>> {
        self.send(request).await
    }

    /// Update a maintenance entity.
    pub async fn update_maintenance_entity(
        &self,
        request: &UpdateMaintenanceEntityRequest,
    ) -> Result<MaintenanceEntity> {
        self.send(request).await
    }

    /// Fetch a maintenance entity.
    pub async fn get_maintenance_entity(&self, id: i64) -> Result<MaintenanceEntity> {
        self.send(&GetMaintenanceEntityRequest { id }).await
    }

    /// List maintenance entities.
    pub async fn list_maintenance_entities(
        &self,
        request: &ListMaintenanceEntitiesRequest,
    ) -> Result<Vec<MaintenanceEntity>> {
        self.send(request).await
    }

    /// Upload files to a maintenance entity.
    pub async fn add_maintenance_entity_attachments(
        &self,
        id: i64,
        attachments: Vec<AttachmentUpload>,
    ) -> Result<MaintenanceEntity> {
        self.send(&AddMaintenanceEntityAttachmentsRequest { id, attachments })
            .await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okdesk_core::{ClientConfig, UploadFile};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> MaintenanceEntitiesClient {
        let config = ClientConfig::custom_endpoint(server.uri(), "token").unwrap();
        MaintenanceEntitiesClient::new(OkdeskClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn search_returns_entities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/maintenance_entities/"))
            .and(query_param("search_string", "склад"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Склад №1", "company_id": 4, "coordinates": [55.75, 37.61]}
            ])))
            .mount(&server)
            .await;

        let request = SearchMaintenanceEntitiesRequest {
            search_string: Some("склад".into()),
            ..SearchMaintenanceEntitiesRequest::default()
        };
        let found = test_client(&server)
            .search_maintenance_entities(&request)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].coordinates, Some(vec![55.75, 37.61]));
    }

    #[tokio::test]
    async fn update_patches_entity() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/maintenance_entities/8"))
            .and(body_json(json!({"id": 8, "comment": "ночной доступ"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8,
                "comment": "ночной доступ"
            })))
            .mount(&server)
            .await;

        let mut request = UpdateMaintenanceEntityRequest::new(8);
        request.fields.comment = Some("ночной доступ".into());
        let entity = test_client(&server)
            .update_maintenance_entity(&request)
            .await
            .unwrap();
        assert_eq!(entity.comment.as_deref(), Some("ночной доступ"));
    }

    #[tokio::test]
    async fn attachments_are_uploaded_as_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/maintenance_entities/8/attachments/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8,
                "attachments": [{"id": 31, "attachment_file_name": "plan.pdf", "is_public": true}]
            })))
            .mount(&server)
            .await;

        let upload = AttachmentUpload::new(UploadFile::from_bytes("plan.pdf", b"%PDF".to_vec()))
            .with_public(true);
        let entity = test_client(&server)
            .add_maintenance_entity_attachments(8, vec![upload])
            .await
            .unwrap();
        let attachments = entity.attachments.unwrap();
        assert_eq!(attachments[0].attachment_file_name.as_deref(), Some("plan.pdf"));

        let requests = server.received_requests().await.unwrap();
        let raw = String::from_utf8_lossy(&requests[0].body);
        assert!(raw.contains("name=\"maintenance_entity[attachments][0][attachment]\""));
    }
}
