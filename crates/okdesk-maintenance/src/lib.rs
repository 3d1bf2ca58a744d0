//! Okdesk maintenance entities client and data models.
//!
//! A maintenance entity is a serviced site or object belonging to a company
//! (an office, a shop, a branch). This crate covers the
//! `api/v1/maintenance_entities` endpoints.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::MaintenanceEntitiesClient;
pub use models::MaintenanceEntity;
pub use requests::{
    AddMaintenanceEntityAttachmentsRequest, CreateMaintenanceEntityRequest,
    GetMaintenanceEntityRequest, ListMaintenanceEntitiesRequest, MaintenanceEntityFields,
    SearchMaintenanceEntitiesRequest, UpdateMaintenanceEntityRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
