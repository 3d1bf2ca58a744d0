//! # okdesk-core
//!
//! Core types and utilities for working with the Okdesk helpdesk REST API.
//!
//! This crate provides the transport, error handling and parameter encoding
//! shared by the per-resource client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and flattening of vendor error bodies
//! - [`config`] - Account endpoint and token configuration
//! - [`client`] - HTTP transport and the [`client::Transport`] seam
//! - [`request`] - Typed request trait, wire call description and pagination
//! - [`query`] - Query string builder with `key[]` list encoding
//! - [`params`] - Scalar coercion of parameter values
//! - [`filters`] - Custom attribute filter encoding
//! - [`multipart`] - File uploads and multipart bodies
//! - [`types`] - Vendor shapes shared across resources

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod multipart;
pub mod params;
pub mod query;
pub mod request;
pub mod types;

// Re-export commonly used types
pub use client::{OkdeskClient, OkdeskClientBuilder, Transport};
pub use config::ClientConfig;
pub use error::{ApiError, Error, Result, TransportError};
pub use filters::AttributeFilter;
pub use multipart::{AttachmentUpload, MultipartBody, UploadFile};
pub use query::QueryParams;
pub use request::{ApiCall, ApiRequest, Direction, Page, RequestBody};
pub use types::{Attachment, CustomParameters, VendorMap};
