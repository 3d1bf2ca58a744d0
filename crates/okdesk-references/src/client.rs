//! Asynchronous reference catalogs client.

use crate::models::{EquipmentKind, EquipmentManufacturer, EquipmentModel};
use crate::requests::{
    CreateEquipmentKindRequest, CreateEquipmentModelRequest, CreateManufacturerRequest,
    ListEquipmentKindsRequest, ListEquipmentModelsRequest, ListManufacturersRequest,
    UpdateEquipmentModelRequest, UpdateManufacturerRequest,
};
use crate::Result;
use okdesk_core::client::{send, Transport};
use okdesk_core::{ApiRequest, OkdeskClient};
use std::sync::Arc;

/// Client for the equipment reference catalogs.
#[derive(Clone)]
pub struct ReferencesClient {
    transport: Arc<dyn Transport>,
}

impl ReferencesClient {
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

    /// Search manufacturers.
    pub async fn list_manufacturers(
        &self,
        request: &ListManufacturersRequest,
    ) -> Result<Vec<EquipmentManufacturer>> {
        self.send(request).await
    }

    /// Add a manufacturer.
    pub async fn create_manufacturer(
        &self,
        request: &CreateManufacturerRequest,
    ) -> Result<EquipmentManufacturer> {
        self.send(request).await
    }

    /// Change a manufacturer.
    pub async fn update_manufacturer(
        &self,
        request: &UpdateManufacturerRequest,
    ) -> Result<EquipmentManufacturer> {
        self.send(request).await
    }

    /// Search equipment models.
    pub async fn list_equipment_models(
        &self,
        request: &ListEquipmentModelsRequest,
    ) -> Result<Vec<EquipmentModel>> {
        self.send(request).await
    }

    /// Add an equipment model.
    pub async fn create_equipment_model(
        &self,
        request: &CreateEquipmentModelRequest,
    ) -> Result<EquipmentModel> {
        self.send(request).await
    }

    /// Change an equipment model.
    pub async fn update_equipment_model(
        &self,
        request: &UpdateEquipmentModelRequest,
    ) -> Result<EquipmentModel> {
        self.send(request).await
    }

    /// Search equipment kinds.
    pub async fn list_equipment_kinds(
        &self,
        request: &ListEquipmentKindsRequest,
    ) -> Result<Vec<EquipmentKind>> {
        self.send(request).await
    }

    /// Add an equipment kind.
    pub async fn create_equipment_kind(
        &self,
        request: &CreateEquipmentKindRequest,
    ) -> Result<EquipmentKind> {
        self.send(request).await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}
