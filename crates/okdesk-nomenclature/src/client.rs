//! Asynchronous nomenclature client.

use crate::models::{Group, Position, PriceListService};
use crate::requests::{
    AddNomenclatureServiceRequest, CreateGroupRequest, CreatePositionRequest, GetGroupRequest,
    GetPositionRequest, ListGroupsRequest, ListNomenclatureServicesRequest, ListPositionsRequest,
    UpdateGroupRequest, UpdateNomenclatureServiceRequest, UpdatePositionRequest,
};
use crate::Result;
use okdesk_core::client::{send, Transport};
use okdesk_core::{ApiRequest, OkdeskClient};
use std::sync::Arc;

/// Client for the nomenclature endpoints.
#[derive(Clone)]
pub struct NomenclatureClient {
    transport: Arc<dyn Transport>,
}

impl NomenclatureClient {
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

    /// Search groups.
    pub async fn list_groups(&self, request: &ListGroupsRequest) -> Result<Vec<Group>> {
        self.send(request).await
    }

    /// Add a group.
    pub async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group> {
        self.send(request).await
    }

    /// Fetch a group.
    pub async fn get_group(&self, group_id: i64) -> Result<Group> {
        self.send(&GetGroupRequest { group_id }).await
    }

    /// Change a group.
    pub async fn update_group(&self, request: &UpdateGroupRequest) -> Result<Group> {
        self.send(request).await
    }

    /// Search positions.
    pub async fn list_positions(&self, request: &ListPositionsRequest) -> Result<Vec<Position>> {
        self.send(request).await
    }

    /// Add a position.
    pub async fn create_position(&self, request: &CreatePositionRequest) -> Result<Position> {
        self.send(request).await
    }

    /// Fetch a position.
    pub async fn get_position(&self, position_id: i64) -> Result<Position> {
        self.send(&GetPositionRequest { position_id }).await
    }

    /// Change a position.
    pub async fn update_position(&self, request: &UpdatePositionRequest) -> Result<Position> {
        self.send(request).await
    }

    /// Positions priced in a price list.
    pub async fn list_price_list_services(
        &self,
        request: &ListNomenclatureServicesRequest,
    ) -> Result<Vec<PriceListService>> {
        self.send(request).await
    }

    /// Price a position in a price list.
    pub async fn add_price_list_service(
        &self,
        request: &AddNomenclatureServiceRequest,
    ) -> Result<PriceListService> {
        self.send(request).await
    }

    /// Change a priced position.
    pub async fn update_price_list_service(
        &self,
        request: &UpdateNomenclatureServiceRequest,
    ) -> Result<PriceListService> {
        self.send(request).await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::ItemType;
    use okdesk_core::{ApiCall, ClientConfig, Error};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    mockall::mock! {
        Transport {}

        #[async_trait::async_trait]
        impl Transport for Transport {
            async fn execute(&self, call: ApiCall) -> Result<Value>;
        }
    }

    fn test_client(server: &MockServer) -> NomenclatureClient {
        let config = ClientConfig::custom_endpoint(server.uri(), "token").unwrap();
        NomenclatureClient::new(OkdeskClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn get_group_parses_parent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/nomenclature/groups/2058"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2058,
                "code": "test-group-1-1",
                "name": "test-group-1-1",
                "active": true,
                "group": {"id": 2057, "code": "test-group-1", "name": "test-group-1"}
            })))
            .mount(&server)
            .await;

        let group = test_client(&server).get_group(2058).await.unwrap();
        let parent = group.group.unwrap();
        assert_eq!(parent.id, Some(2057));
        assert_eq!(parent.code.as_deref(), Some("test-group-1"));
    }

    #[tokio::test]
    async fn list_positions_sends_item_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/nomenclature/items"))
            .and(query_param("item_types[]", "work"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 100,
                "code": "item_code1",
                "name": "Доставка в сервис",
                "active": true,
                "item_type": "work",
                "unit": "выезд",
                "vendor_code": "",
                "description": "",
                "group": null
            }])))
            .mount(&server)
            .await;

        let request = ListPositionsRequest {
            item_types: vec![ItemType::Work],
            ..ListPositionsRequest::default()
        };
        let positions = test_client(&server).list_positions(&request).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert!(positions[0].group.is_none());
        assert_eq!(positions[0].vendor_code.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn add_price_list_service_posts_wrapped_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/nomenclature/price_lists/3/services"))
            .and(body_json(json!({"service": {
                "nomenclature_item_id": 101,
                "price": 1000.0,
                "nds": 20.0
            }})))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "errors": {"nomenclature_item_id": ["уже добавлен в прайс-лист"]}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .add_price_list_service(&AddNomenclatureServiceRequest {
                price_list_id: 3,
                nomenclature_item_id: 101,
                price: 1000.0,
                nds: 20.0,
            })
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 422);
                assert_eq!(
                    api.messages,
                    vec!["nomenclature_item_id: уже добавлен в прайс-лист".to_string()]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_price_list_service_uses_put() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|call| {
                call.method.as_str() == "PUT"
                    && call.path == "api/v1/nomenclature/price_lists/3/services/14"
            })
            .times(1)
            .returning(|_| Ok(json!({"id": 14, "visible": false})));

        let client = NomenclatureClient::with_transport(Arc::new(transport));
        let service = client
            .update_price_list_service(&UpdateNomenclatureServiceRequest {
                price_list_id: 3,
                service_id: 14,
                visible: Some(false),
                ..UpdateNomenclatureServiceRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(service.visible, Some(false));
    }
}
