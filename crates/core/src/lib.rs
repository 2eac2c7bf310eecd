//! Vitrine Core - Shared catalog types.
//!
//! This crate provides the types used across all Vitrine components:
//! - `storefront` - Catalog client with read-through cache and batch uploads
//! - `cli` - Command-line access to the catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no caching, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, products, listing queries and upload payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
