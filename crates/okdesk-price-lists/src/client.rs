//! Asynchronous price lists client.

use crate::models::{PriceList, Service, ServiceWithPriceList};
use crate::requests::{
    AddPriceListServiceRequest, ListAvailableServicesRequest, ListPriceListServicesRequest,
    ListPriceListsRequest, UpdatePriceListServiceRequest,
};
use crate::Result;
use okdesk_core::client::{send, Transport};
use okdesk_core::request::Page;
use okdesk_core::{ApiRequest, OkdeskClient};
use std::sync::Arc;

/// Client for the price list endpoints.
#[derive(Clone)]
pub struct PriceListsClient {
    transport: Arc<dyn Transport>,
}

impl PriceListsClient {
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

    /// Price lists of the account.
    pub async fn list_price_lists(&self, page: Page) -> Result<Vec<PriceList>> {
        self.send(&ListPriceListsRequest { page }).await
    }

    /// Lines of a price list.
    pub async fn list_price_list_services(
        &self,
        request: &ListPriceListServicesRequest,
    ) -> Result<Vec<Service>> {
        self.send(request).await
    }

    /// Add a line to a price list.
    pub async fn add_price_list_service(
        &self,
        request: &AddPriceListServiceRequest,
    ) -> Result<Service> {
        self.send(request).await
    }

    /// Change a price list line.
    pub async fn update_price_list_service(
        &self,
        request: &UpdatePriceListServiceRequest,
    ) -> Result<Service> {
        self.send(request).await
    }

    /// Lines that may be added to an issue specification.
    pub async fn list_available_services_for_issue(
        &self,
        request: &ListAvailableServicesRequest,
    ) -> Result<Vec<ServiceWithPriceList>> {
        self.send(request).await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}
