//! Read-through / write-through catalog cache.
//!
//! [`CatalogService`] owns two stores for one client session:
//!
//! - products by id (plus a slug index), filled by product fetches, creates
//!   and updates
//! - listing pages by [`QueryKey`](vitrine_core::QueryKey), filled by listing fetches
//!
//! Reads return cached values without a network call and otherwise fetch once
//! and store the result. Writes go to the server first; only a confirmed
//! response is written to the stores. An update is also copied into every
//! cached page that lists the product. Creates are not added to cached pages;
//! callers re-fetch listings to see new products.
//!
//! Concurrent misses on the same key are not merged into one request. Each
//! miss calls the server and the last response to arrive wins.
//!
//! Each network call and its store write run on a spawned task. A caller that
//! stops waiting does not cancel the request, and a successful response is
//! still written to the stores.

mod store;

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tokio::task::JoinError;
use tracing::{Instrument, debug, info, instrument, warn};
use vitrine_core::{FileUpload, Product, ProductId, ProductPatch, ProductQuery, ProductsPage};

use crate::api::{ApiError, HttpProductsApi, ProductsApi};
use crate::config::StorefrontConfig;
use crate::uploads;
use store::CatalogStore;

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog API call failed; no store was modified.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An update targeted the placeholder id of an unsaved product.
    #[error("product has not been saved yet; create it instead of updating")]
    UnsavedProduct,

    /// The task running the request panicked or was aborted.
    #[error("catalog task failed: {0}")]
    Task(#[from] JoinError),
}

impl CatalogError {
    /// Returns `true` if the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound(_)))
    }
}

type SharedStore = Arc<RwLock<CatalogStore>>;

// Guards are never held across an `.await`.
fn read_store(store: &RwLock<CatalogStore>) -> RwLockReadGuard<'_, CatalogStore> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_store(store: &RwLock<CatalogStore>) -> RwLockWriteGuard<'_, CatalogStore> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}

/// Session-scoped product catalog with read-through caching.
///
/// Construct one per client session and share it by reference or `Arc`.
/// Operations must be called from within a Tokio runtime.
pub struct CatalogService<A> {
    api: Arc<A>,
    store: SharedStore,
}

impl<A: ProductsApi + 'static> CatalogService<A> {
    /// Create a catalog with empty stores.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            store: Arc::new(RwLock::new(CatalogStore::default())),
        }
    }

    /// The underlying API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogStore> {
        read_store(&self.store)
    }

    /// Run `step` on its own task and wait for it.
    ///
    /// The task keeps running if the returned future is dropped.
    async fn detached<T, F, Fut>(&self, step: F) -> Result<T, CatalogError>
    where
        F: FnOnce(Arc<A>, SharedStore) -> Fut,
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
        T: Send + 'static,
    {
        let task = step(Arc::clone(&self.api), Arc::clone(&self.store));
        tokio::spawn(task.in_current_span()).await?
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a listing page, from cache when the effective query was seen before.
    ///
    /// # Errors
    ///
    /// Returns an error if the page is not cached and the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_list(&self, query: ProductQuery) -> Result<ProductsPage, CatalogError> {
        let key = query.key();

        let cached = self.read().page(&key).cloned();
        if let Some(page) = cached {
            debug!(key = %key, "Cache hit for products");
            return Ok(page);
        }

        debug!(key = %key, "Cache miss for products");
        self.detached(|api, store| async move {
            let page = api.list_products(&key).await?;
            write_store(&store).insert_page(key, page.clone());
            Ok(page)
        })
        .await
    }

    /// Get a product by id.
    ///
    /// The placeholder id `"new"` returns [`Product::empty`] without touching
    /// the cache or the network. The product is stored under the id the
    /// server returns, so an id that the server resolved as a slug is served
    /// from cache through the slug index.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not cached and the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        if id.is_placeholder() {
            return Ok(Product::empty());
        }

        let cached = {
            let store = self.read();
            store
                .product(id)
                .or_else(|| store.product_by_slug(id.as_str()))
                .cloned()
        };
        if let Some(product) = cached {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let id = id.clone();
        self.detached(|api, store| async move {
            let product = api.get_product(id.as_str()).await?;
            store_product(&store, &product);
            Ok(product)
        })
        .await
    }

    /// Get a product by its slug.
    ///
    /// The product is stored under its id, so later updates are visible
    /// through the slug as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not cached and the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_product_by_slug(&self, slug: &str) -> Result<Product, CatalogError> {
        let cached = self.read().product_by_slug(slug).cloned();
        if let Some(product) = cached {
            debug!("Cache hit for product slug");
            return Ok(product);
        }

        let slug = slug.to_string();
        self.detached(|api, store| async move {
            let product = api.get_product(&slug).await?;
            store_product(&store, &product);
            Ok(product)
        })
        .await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create a product and cache the server's copy.
    ///
    /// Cached listing pages are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails; no store is modified.
    #[instrument(skip(self, patch))]
    pub async fn on_create(&self, patch: &ProductPatch) -> Result<Product, CatalogError> {
        let patch = patch.clone();
        self.detached(|api, store| async move {
            let product = api.create_product(&patch).await?;
            store_product(&store, &product);
            info!(product_id = %product.id, "Product created");
            Ok(product)
        })
        .await
    }

    /// Update a product and propagate the server's copy into every cache.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsavedProduct`] for the placeholder id, or an
    /// error if the API request fails; no store is modified in either case.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn on_update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, CatalogError> {
        if id.is_placeholder() {
            return Err(CatalogError::UnsavedProduct);
        }

        let id = id.clone();
        let patch = patch.clone();
        self.detached(|api, store| async move {
            let product = api.update_product(&id, &patch).await?;

            let replaced = {
                let mut store = write_store(&store);
                store.insert_product(id.clone(), product.clone());
                store.propagate_update(&id, &product)
            };
            info!(replaced, "Product updated");
            Ok(product)
        })
        .await
    }

    /// Upload files concurrently; see [`uploads::upload_all`].
    ///
    /// # Errors
    ///
    /// Returns the error of the first upload that fails.
    pub async fn upload_all(&self, files: &[FileUpload]) -> Result<Vec<String>, CatalogError> {
        Ok(uploads::upload_all(self.api.as_ref(), files).await?)
    }

    /// Upload images, then create or update the product with them.
    ///
    /// Uploaded names are appended to `patch.images`. When the patch leaves
    /// images unset, they are appended to the product's current images,
    /// fetched through the cache. The placeholder id creates a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if any upload fails (before any create or update is
    /// sent), if the current product cannot be fetched, or if the create or
    /// update fails.
    #[instrument(skip(self, patch, files), fields(product_id = %id, files = files.len()))]
    pub async fn save_product(
        &self,
        id: &ProductId,
        mut patch: ProductPatch,
        files: &[FileUpload],
    ) -> Result<Product, CatalogError> {
        let uploaded = self.upload_all(files).await?;

        if !uploaded.is_empty() {
            let mut images = match patch.images.take() {
                Some(images) => images,
                None if id.is_placeholder() => Vec::new(),
                None => self.fetch_product(id).await?.images,
            };
            images.extend(uploaded);
            patch.images = Some(images);
        }

        if id.is_placeholder() {
            self.on_create(&patch).await
        } else {
            self.on_update(id, &patch).await
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Cached product, without any network call.
    #[must_use]
    pub fn peek_product(&self, id: &ProductId) -> Option<Product> {
        self.read().product(id).cloned()
    }

    /// Cached listing page, without any network call.
    #[must_use]
    pub fn peek_page(&self, query: ProductQuery) -> Option<ProductsPage> {
        self.read().page(&query.key()).cloned()
    }

    /// Number of cached products and listing pages.
    #[must_use]
    pub fn cached_counts(&self) -> (usize, usize) {
        let store = self.read();
        (store.product_count(), store.page_count())
    }
}

/// Store a server response under the id it carries.
fn store_product(store: &RwLock<CatalogStore>, product: &Product) {
    if !write_store(store).insert_product(product.id.clone(), product.clone()) {
        warn!("Server returned the placeholder id; not caching");
    }
}

impl CatalogService<HttpProductsApi> {
    /// Catalog backed by the HTTP API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn connect(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Ok(Self::new(HttpProductsApi::new(config)?))
    }
}
