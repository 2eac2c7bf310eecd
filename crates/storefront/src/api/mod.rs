//! Catalog API collaborator.
//!
//! # Architecture
//!
//! - [`ProductsApi`] is the network contract the catalog cache and the upload
//!   coordinator are written against
//! - [`HttpProductsApi`] implements it over HTTP with `reqwest`
//! - Calls are made once; retries, if any, belong to the transport
//!
//! # Endpoints
//!
//! | Operation        | Request                                   |
//! |------------------|-------------------------------------------|
//! | `list_products`  | `GET {base}/products?limit=&offset=&gender=` |
//! | `get_product`    | `GET {base}/products/{id_or_slug}`        |
//! | `create_product` | `POST {base}/products`                    |
//! | `update_product` | `PATCH {base}/products/{id}`              |
//! | `upload_file`    | `POST {base}/files/product` (multipart)   |

mod http;

pub use http::HttpProductsApi;

use async_trait::async_trait;
use thiserror::Error;
use vitrine_core::{FileUpload, Product, ProductId, ProductPatch, ProductsPage, QueryKey};

/// Errors that can occur when calling the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Network operations the catalog depends on.
///
/// Implementations perform exactly one request per call and never touch any
/// cache.
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// Fetch one listing page.
    async fn list_products(&self, key: &QueryKey) -> Result<ProductsPage, ApiError>;

    /// Fetch one product by id or slug.
    async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError>;

    /// Create a product; the server assigns its id.
    async fn create_product(&self, patch: &ProductPatch) -> Result<Product, ApiError>;

    /// Apply a partial update and return the stored product.
    async fn update_product(&self, id: &ProductId, patch: &ProductPatch)
    -> Result<Product, ApiError>;

    /// Upload one file and return the server-assigned file name.
    async fn upload_file(&self, file: &FileUpload) -> Result<String, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound("products/abc".to_string());
        assert_eq!(err.to_string(), "Not found: products/abc");
    }
}
