//! `reqwest`-backed implementation of [`ProductsApi`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use vitrine_core::{FileUpload, Product, ProductId, ProductPatch, ProductsPage, QueryKey};

use super::{ApiError, ProductsApi};
use crate::config::StorefrontConfig;

/// How much of an error body is kept for logs and error values.
const ERROR_BODY_LIMIT: usize = 200;

/// Response of the product file upload endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_name: String,
}

// =============================================================================
// HttpProductsApi
// =============================================================================

/// HTTP client for the catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpProductsApi {
    inner: Arc<HttpProductsApiInner>,
}

struct HttpProductsApiInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpProductsApi {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry path segments or the
    /// HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        if config.api_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.api_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpProductsApiInner {
                client,
                base_url: config.api_url.clone(),
                token: config.api_token.clone(),
            }),
        })
    }

    /// Base URL requests are built from.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Public URL of an uploaded product image.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry path segments.
    pub fn image_url(&self, file_name: &str) -> Result<Url, ApiError> {
        self.endpoint(&["files", "product", file_name])
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Listing endpoint with the key's parameters in the query string.
    fn listing_url(&self, key: &QueryKey) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["products"])?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in key.query_pairs() {
                query.append_pair(name, &value);
            }
        }
        Ok(url)
    }

    /// Send a request and decode a JSON response.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match &self.inner.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        let path = response.url().path().to_string();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            debug!(path = %path, "Catalog API returned 404");
            return Err(ApiError::NotFound(path));
        }

        if !status.is_success() {
            let body: String = response_text.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::error!(
                status = %status,
                path = %path,
                body = %body,
                "Catalog API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %response_text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "Failed to parse catalog API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[async_trait]
impl ProductsApi for HttpProductsApi {
    #[instrument(skip(self), fields(key = %key))]
    async fn list_products(&self, key: &QueryKey) -> Result<ProductsPage, ApiError> {
        let url = self.listing_url(key)?;
        self.send(self.inner.client.get(url)).await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", id_or_slug])?;
        self.send(self.inner.client.get(url)).await
    }

    #[instrument(skip(self, patch))]
    async fn create_product(&self, patch: &ProductPatch) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products"])?;
        self.send(self.inner.client.post(url).json(patch)).await
    }

    #[instrument(skip(self, patch), fields(product_id = %id))]
    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", id.as_str()])?;
        self.send(self.inner.client.patch(url).json(patch)).await
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, len = file.len()))]
    async fn upload_file(&self, file: &FileUpload) -> Result<String, ApiError> {
        let url = self.endpoint(&["files", "product"])?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let response: UploadResponse = self.send(self.inner.client.post(url).multipart(form)).await?;
        Ok(response.file_name)
    }
}
