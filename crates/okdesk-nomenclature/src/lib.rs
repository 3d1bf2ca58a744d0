//! Okdesk nomenclature catalog.
//!
//! Groups organise nomenclature positions into a tree; positions are then
//! priced per price list through nomenclature price list services.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::NomenclatureClient;
pub use models::{Group, GroupRef, Position, PriceListService};
pub use requests::{
    AddNomenclatureServiceRequest, CreateGroupRequest, CreatePositionRequest, GetGroupRequest,
    GetPositionRequest, ItemType, ListGroupsRequest, ListNomenclatureServicesRequest,
    ListPositionsRequest, UpdateGroupRequest, UpdateNomenclatureServiceRequest,
    UpdatePositionRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
