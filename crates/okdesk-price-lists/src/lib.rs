//! Okdesk price lists.
//!
//! Price lists hold the services, works and products that can be added to an
//! issue specification, each with a price and a VAT rate.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::PriceListsClient;
pub use models::{PriceList, Service, ServiceWithPriceList};
pub use requests::{
    AddPriceListServiceRequest, ListAvailableServicesRequest, ListPriceListServicesRequest,
    ListPriceListsRequest, ServiceType, UpdatePriceListServiceRequest,
};

/// Convenient result alias that reuses the shared Okdesk error type.
pub type Result<T> = okdesk_core::Result<T>;
