//! Integration tests for Vitrine.
//!
//! The catalog is exercised over real HTTP against a `wiremock` server, so
//! the tests cover request shapes (paths, query strings, headers, multipart
//! bodies) as well as cache behavior.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_http` - Listing, lookup and update through the cache
//! - `uploads_http` - Batch uploads to the file endpoint

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use vitrine_storefront::{CatalogService, HttpProductsApi, StorefrontConfig};
use wiremock::MockServer;

/// Token configured on every test client.
pub const TEST_TOKEN: &str = "test-token";

/// API prefix the mock server is mounted under.
pub const API_PREFIX: &str = "/api";

/// Catalog talking to `server` under [`API_PREFIX`], authenticated with
/// [`TEST_TOKEN`].
#[must_use]
pub fn catalog_for(server: &MockServer) -> CatalogService<HttpProductsApi> {
    let url = Url::parse(&format!("{}{API_PREFIX}", server.uri())).unwrap();
    let mut config = StorefrontConfig::new(url);
    config.api_token = Some(SecretString::from(TEST_TOKEN));
    CatalogService::connect(&config).unwrap()
}

/// Full request path for an API path such as `/products`.
#[must_use]
pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

/// Product JSON as the server sends it.
#[must_use]
pub fn product_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": 35.5,
        "description": format!("{title} description"),
        "slug": title.to_lowercase().replace(' ', "_"),
        "stock": 7,
        "sizes": ["S", "M", "L"],
        "gender": "men",
        "tags": ["shirt"],
        "images": [format!("{id}.jpg")],
        "user": {
            "id": "u-1",
            "email": "test1@example.com",
            "fullName": "Test One",
            "isActive": true,
            "roles": ["admin"]
        }
    })
}

/// Listing JSON holding `products`.
#[must_use]
pub fn page_json(count: u64, pages: u32, products: Vec<Value>) -> Value {
    json!({
        "count": count,
        "pages": pages,
        "products": products,
    })
}
