//! Typed asynchronous client for the Okdesk helpdesk REST API.
//!
//! [`Okdesk`] owns one transport and hands out per-resource clients that
//! share it. Every operation is also available as a request type that can be
//! sent directly with [`Okdesk::send`].
//!
//! # Quick Start
//!
//! ```no_run
//! use okdesk::{ClientConfig, Okdesk};
//!
//! # async fn run() -> okdesk::Result<()> {
//! let config = ClientConfig::new("https://acme.okdesk.ru/", "secret-token")?;
//! let okdesk = Okdesk::new(config)?;
//!
//! let issue = okdesk.issues().get_issue(42).await?;
//! println!("{:?}", issue.title);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

use okdesk_core::client::send;
use std::sync::Arc;
use tracing::debug;

pub use okdesk_companies as companies;
pub use okdesk_equipment as equipment;
pub use okdesk_issues as issues;
pub use okdesk_maintenance as maintenance;
pub use okdesk_nomenclature as nomenclature;
pub use okdesk_price_lists as price_lists;
pub use okdesk_references as references;

pub use okdesk_companies::CompaniesClient;
pub use okdesk_core::{
    ApiCall, ApiError, ApiRequest, AttachmentUpload, AttributeFilter, ClientConfig, Direction,
    Error, OkdeskClient, Page, Transport, UploadFile,
};
pub use okdesk_core::types::{Attachment, CustomParameters, VendorMap};
pub use okdesk_equipment::EquipmentClient;
pub use okdesk_issues::IssuesClient;
pub use okdesk_maintenance::MaintenanceEntitiesClient;
pub use okdesk_nomenclature::NomenclatureClient;
pub use okdesk_price_lists::PriceListsClient;
pub use okdesk_references::ReferencesClient;

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;

/// Entry point owning the transport shared by every resource client.
#[derive(Clone)]
pub struct Okdesk {
    transport: Arc<dyn Transport>,
}

impl Okdesk {
    /// Build an HTTP client for the configured account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        debug!(base_url = config.base_url(), "Creating Okdesk client");
        Ok(Self::from_client(OkdeskClient::new(config)?))
    }

    /// Reuse an existing HTTP client.
    #[must_use]
    pub fn from_client(client: OkdeskClient) -> Self {
        Self::with_transport(Arc::new(client))
    }

    /// Use an arbitrary transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Companies.
    #[must_use]
    pub fn companies(&self) -> CompaniesClient {
        CompaniesClient::with_transport(Arc::clone(&self.transport))
    }

    /// Maintenance entities.
    #[must_use]
    pub fn maintenance_entities(&self) -> MaintenanceEntitiesClient {
        MaintenanceEntitiesClient::with_transport(Arc::clone(&self.transport))
    }

    /// Issues with their comments, specifications, time entries and check lists.
    #[must_use]
    pub fn issues(&self) -> IssuesClient {
        IssuesClient::with_transport(Arc::clone(&self.transport))
    }

    /// Equipment.
    #[must_use]
    pub fn equipment(&self) -> EquipmentClient {
        EquipmentClient::with_transport(Arc::clone(&self.transport))
    }

    /// Equipment manufacturers, models and kinds.
    #[must_use]
    pub fn references(&self) -> ReferencesClient {
        ReferencesClient::with_transport(Arc::clone(&self.transport))
    }

    /// Price lists.
    #[must_use]
    pub fn price_lists(&self) -> PriceListsClient {
        PriceListsClient::with_transport(Arc::clone(&self.transport))
    }

    /// Nomenclature groups, positions and their prices.
    #[must_use]
    pub fn nomenclature(&self) -> NomenclatureClient {
        NomenclatureClient::with_transport(Arc::clone(&self.transport))
    }

    /// Send any request and parse its typed output.
    ///
    /// # Errors
    ///
    /// Propagates transport, API and decoding errors.
    pub async fn send<R>(&self, request: &R) -> Result<R::Output>
    where
        R: ApiRequest + ?Sized,
    {
        send(self.transport.as_ref(), request).await
    }
}

impl From<OkdeskClient> for Okdesk {
    fn from(client: OkdeskClient) -> Self {
        Self::from_client(client)
    }
}
