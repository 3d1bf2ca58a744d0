//! Asynchronous companies client.

use crate::models::Company;
use crate::requests::{
    ArchiveCompanyRequest, CreateCompanyRequest, FindCompanyRequest, GetCompanyAttachmentRequest,
    ListCompaniesRequest, UpdateCompanyRequest,
};
use crate::Result;
use okdesk_core::client::{send, Transport};
use okdesk_core::types::Attachment;
use okdesk_core::{ApiRequest, OkdeskClient};
use std::sync::Arc;

/// Client for the companies endpoints.
#[derive(Clone)]
pub struct CompaniesClient {
    transport: Arc<dyn Transport>,
}

impl CompaniesClient {
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

    /// Look up one company; `None` when nothing matches.
    pub async fn find_company(&self, request: &FindCompanyRequest) -> Result<Option<Company>> {
        self.send(request).await
    }

    /// Create a company.
    pub async fn create_company(&self, request: &CreateCompanyRequest) -> Result<Company> {
        self.send(request).await
    }

    /// Update a company.
    pub async fn update_company(&self, request: &UpdateCompanyRequest) -> Result<Company> {
        self.send(request).await
    }

    /// List companies.
    pub async fn list_companies(&self, request: &ListCompaniesRequest) -> Result<Vec<Company>> {
        self.send(request).await
    }

    /// Fetch a company attachment.
    pub async fn get_company_attachment(
        &self,
        company_id: i64,
        attachment_id: i64,
    ) -> Result<Attachment> {
        self.send(&GetCompanyAttachmentRequest {
            company_id,
            attachment_id,
        })
        .await
    }

    /// Archive a company.
    pub async fn archive_company(&self, company_id: i64) -> Result<Company> {
        self.send(&ArchiveCompanyRequest { company_id }).await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Output> {
        send(self.transport.as_ref(), request).await
    }
}
