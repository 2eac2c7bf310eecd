//! Vitrine Storefront library.
//!
//! Data-access layer for the storefront: a session-scoped product catalog
//! with read-through / write-through caching, and a batch upload
//! coordinator for product images.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_storefront::{CatalogService, StorefrontConfig};
//! use vitrine_core::{ProductId, ProductQuery};
//!
//! let config = StorefrontConfig::from_env()?;
//! let catalog = CatalogService::connect(&config)?;
//!
//! // First call hits the API, the second is served from cache
//! let page = catalog.fetch_list(ProductQuery::default()).await?;
//! let page = catalog.fetch_list(ProductQuery::default()).await?;
//!
//! // The placeholder id never reaches the network
//! let blank = catalog.fetch_product(&ProductId::placeholder()).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod uploads;

#[cfg(test)]
mod testing;

pub use api::{ApiError, HttpProductsApi, ProductsApi};
pub use catalog::{CatalogError, CatalogService};
pub use config::{ConfigError, StorefrontConfig};
