//! Okdesk equipment client and data models.
//!
//! Provides typed structures and asynchronous client utilities for the
//! `api/v1/equipments` endpoints: search, creation, update, lookup and
//! filtered listing.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::EquipmentClient;
pub use models::Equipment;
pub use requests::{
    CreateEquipmentRequest, EquipmentFields, FindEquipmentRequest, GetEquipmentRequest,
    ListEquipmentRequest, UpdateEquipmentRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
