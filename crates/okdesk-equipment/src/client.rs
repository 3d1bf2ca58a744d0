//! Asynchronous equipment client.

use crate::models::Equipment;
use crate::requests::{
    CreateEquipmentRequest, FindEquipmentRequest, GetEquipmentRequest, ListEquipmentRequest,
    UpdateEquipmentRequest,
};
use crate::Result;
use okdesk_core::client::{send, Transport};
use okdesk_core::{ApiRequest, OkdeskClient};
use std::sync::Arc;

/// Client for the equipment endpoints.
#[derive(Clone)]
pub struct EquipmentClient {
    transport: Arc<dyn Transport>,
}

impl EquipmentClient {
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

    /// Search equipment.
    pub async fn find_equipment(&self, request: &FindEquipmentRequest) -> Result<Vec<Equipment>> {
        self.send(request).await
    }

    /// Register equipment.
    pub async fn create_equipment(&self, request: &CreateEquipmentRequest) -> Result<Equipment> {
        self.send(request).await
    }

    /// Update equipment.
    pub async fn update_equipment(&self, request: &UpdateEquipmentRequest) -> Result<Equipment> {
        self.send(request).await
    }

    /// Fetch equipment by id.
    pub async fn get_equipment(&self, equipment_id: i64) -> Result<Equipment> {
        self.send(&GetEquipmentRequest { equipment_id }).await
    }

    /// List equipment.
    pub async fn list_equipment(&self, request: &ListEquipmentRequest) -> Result<Vec<Equipment>> {
        self.send(request).await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}
