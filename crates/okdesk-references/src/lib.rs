//! Okdesk equipment reference catalogs.
//!
//! Manufacturers, models and kinds live under `api/v1/equipments` and are
//! shared by every equipment record.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::ReferencesClient;
pub use models::{EquipmentKind, EquipmentManufacturer, EquipmentModel};
pub use requests::{
    CreateEquipmentKindRequest, CreateEquipmentModelRequest, CreateManufacturerRequest,
    ListEquipmentKindsRequest, ListEquipmentModelsRequest, ListManufacturersRequest,
    UpdateEquipmentModelRequest, UpdateManufacturerRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
