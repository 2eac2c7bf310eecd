//! In-memory `ProductsApi` for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::oneshot;
use vitrine_core::{FileUpload, Gender, Product, ProductId, ProductPatch, ProductsPage, QueryKey};

use crate::api::{ApiError, ProductsApi};

/// A product with a slug derived from its title.
pub(crate) fn product(id: &str, title: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Decimal::from(25),
        description: String::new(),
        slug: title.to_lowercase().replace(' ', "-"),
        stock: 5,
        sizes: vec!["M".to_string(), "L".to_string()],
        gender: Gender::Unisex,
        tags: vec![],
        images: vec![],
        user: None,
    }
}

/// A single-page listing holding `products`.
pub(crate) fn page_of(products: Vec<Product>) -> ProductsPage {
    ProductsPage {
        count: products.len() as u64,
        pages: 1,
        products,
    }
}

fn apply(product: &mut Product, patch: &ProductPatch) {
    if let Some(title) = &patch.title {
        product.title.clone_from(title);
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    if let Some(description) = &patch.description {
        product.description.clone_from(description);
    }
    if let Some(slug) = &patch.slug {
        product.slug.clone_from(slug);
    }
    if let Some(stock) = patch.stock {
        product.stock = stock;
    }
    if let Some(sizes) = &patch.sizes {
        product.sizes.clone_from(sizes);
    }
    if let Some(gender) = patch.gender {
        product.gender = gender;
    }
    if let Some(tags) = &patch.tags {
        product.tags.clone_from(tags);
    }
    if let Some(images) = &patch.images {
        product.images.clone_from(images);
    }
}

/// Scriptable fake server with call counters.
#[derive(Default)]
pub(crate) struct FakeApi {
    pages: Mutex<HashMap<QueryKey, ProductsPage>>,
    products: Mutex<HashMap<ProductId, Product>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<ProductsPage>>>,
    failing_uploads: Mutex<HashSet<String>>,
    upload_delays: Mutex<HashMap<String, usize>>,
    pub(crate) fail_lists: AtomicBool,
    pub(crate) fail_writes: AtomicBool,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    in_flight_uploads: AtomicUsize,
    max_in_flight_uploads: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn with_page(self, key: QueryKey, page: ProductsPage) -> Self {
        {
            let mut products = self.products.lock().unwrap();
            for p in &page.products {
                products.insert(p.id.clone(), p.clone());
            }
        }
        self.pages.lock().unwrap().insert(key, page);
        self
    }

    pub(crate) fn with_product(self, product: Product) -> Self {
        self.products.lock().unwrap().insert(product.id.clone(), product);
        self
    }

    /// Listing calls consume these receivers in order and answer with what is
    /// sent on them.
    pub(crate) fn gate_lists(&self, gates: impl IntoIterator<Item = oneshot::Receiver<ProductsPage>>) {
        self.list_gates.lock().unwrap().extend(gates);
    }

    pub(crate) fn fail_upload(&self, file_name: &str) {
        self.failing_uploads.lock().unwrap().insert(file_name.to_string());
    }

    /// Make the upload of `file_name` yield `yields` times before finishing.
    pub(crate) fn delay_upload(&self, file_name: &str, yields: usize) {
        self.upload_delays.lock().unwrap().insert(file_name.to_string(), yields);
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight_uploads(&self) -> usize {
        self.max_in_flight_uploads.load(Ordering::SeqCst)
    }

    fn write_failure(&self) -> Option<ApiError> {
        self.fail_writes.load(Ordering::SeqCst).then(|| ApiError::Status {
            status: 500,
            body: "write rejected".to_string(),
        })
    }
}

#[async_trait]
impl ProductsApi for FakeApi {
    async fn list_products(&self, key: &QueryKey) -> Result<ProductsPage, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.list_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate.await.map_err(|_| ApiError::Status {
                status: 503,
                body: "gate closed".to_string(),
            });
        }

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "listing unavailable".to_string(),
            });
        }

        self.pages
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(key.to_string()))
    }

    async fn get_product(&self, id_or_slug: &str) -> Result<Product, ApiError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let products = self.products.lock().unwrap();
        products
            .get(&ProductId::new(id_or_slug))
            .or_else(|| products.values().find(|p| p.slug == id_or_slug))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/products/{id_or_slug}")))
    }

    async fn create_product(&self, patch: &ProductPatch) -> Result<Product, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.write_failure() {
            return Err(err);
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = product(&format!("created-{n}"), "");
        apply(&mut created, patch);
        self.products
            .lock()
            .unwrap()
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.write_failure() {
            return Err(err);
        }

        let mut products = self.products.lock().unwrap();
        let current = products
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(format!("/products/{id}")))?;
        apply(current, patch);
        Ok(current.clone())
    }

    async fn upload_file(&self, file: &FileUpload) -> Result<String, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight_uploads.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight_uploads.fetch_max(in_flight, Ordering::SeqCst);

        let yields = self
            .upload_delays
            .lock()
            .unwrap()
            .get(&file.file_name)
            .copied()
            .unwrap_or(0);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }

        self.in_flight_uploads.fetch_sub(1, Ordering::SeqCst);

        if self.failing_uploads.lock().unwrap().contains(&file.file_name) {
            return Err(ApiError::Status {
                status: 500,
                body: file.file_name.clone(),
            });
        }
        Ok(format!("srv-{}", file.file_name))
    }
}
