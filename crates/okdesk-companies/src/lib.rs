//! Okdesk companies client and data models.
//!
//! Provides typed structures and asynchronous client utilities for the
//! `api/v1/companies` endpoints: lookup, creation, update, listing,
//! attachments and archiving.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::CompaniesClient;
pub use models::Company;
pub use requests::{
    ArchiveCompanyRequest, CompanyFields, CreateCompanyRequest, FindCompanyRequest,
    GetCompanyAttachmentRequest, ListCompaniesRequest, UpdateCompanyRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
