//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod gender;
pub mod id;
pub mod product;
pub mod query;
pub mod upload;

pub use gender::{Gender, GenderError};
pub use id::*;
pub use product::{Product, ProductPatch, ProductsPage, User};
pub use query::{DEFAULT_LIMIT, DEFAULT_OFFSET, ProductQuery, QueryKey, parse_page};
pub use upload::FileUpload;
