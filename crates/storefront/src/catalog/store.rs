//! In-memory entity and listing stores backing [`super::CatalogService`].

use std::collections::HashMap;

use vitrine_core::{Product, ProductId, ProductsPage, QueryKey};

/// Products by id, a slug index, and listing pages by query key.
///
/// Entries are only written after a successful server response and live
/// until the store is dropped.
#[derive(Debug, Default)]
pub(crate) struct CatalogStore {
    products: HashMap<ProductId, Product>,
    slugs: HashMap<String, ProductId>,
    pages: HashMap<QueryKey, ProductsPage>,
}

impl CatalogStore {
    pub(crate) fn page(&self, key: &QueryKey) -> Option<&ProductsPage> {
        self.pages.get(key)
    }

    /// Store a page verbatim, replacing any previous page for the key.
    pub(crate) fn insert_page(&mut self, key: QueryKey, page: ProductsPage) {
        self.pages.insert(key, page);
    }

    pub(crate) fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub(crate) fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.slugs.get(slug).and_then(|id| self.products.get(id))
    }

    /// Store the confirmed state of a product under `id`.
    ///
    /// Returns `false` without storing anything for the placeholder id.
    pub(crate) fn insert_product(&mut self, id: ProductId, product: Product) -> bool {
        if id.is_placeholder() {
            return false;
        }

        // A changed slug must no longer resolve to this product.
        self.slugs
            .retain(|slug, mapped| *mapped != id || *slug == product.slug);
        if !product.slug.is_empty() {
            self.slugs.insert(product.slug.clone(), id.clone());
        }

        self.products.insert(id, product);
        true
    }

    /// Replace every cached listing element with identifier `id` by `product`.
    ///
    /// Page lengths, element order and pagination metadata are left as they
    /// are. Returns the number of replaced elements.
    pub(crate) fn propagate_update(&mut self, id: &ProductId, product: &Product) -> usize {
        let mut replaced = 0;
        for page in self.pages.values_mut() {
            for current in page.products.iter_mut().filter(|p| p.id == *id) {
                *current = product.clone();
                replaced += 1;
            }
        }
        replaced
    }

    pub(crate) fn product_count(&self) -> usize {
        self.products.len()
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use vitrine_core::{Gender, ProductQuery};

    use super::*;
    use crate::testing::{page_of, product};

    #[test]
    fn test_placeholder_is_never_stored() {
        let mut store = CatalogStore::default();
        assert!(!store.insert_product(ProductId::placeholder(), Product::empty()));
        assert_eq!(store.product_count(), 0);
    }

    #[test]
    fn test_slug_index_follows_slug_changes() {
        let mut store = CatalogStore::default();
        let id = ProductId::new("p-1");
        let mut tee = product("p-1", "Tee");
        store.insert_product(id.clone(), tee.clone());
        assert_eq!(store.product_by_slug("tee").map(|p| &p.title), Some(&"Tee".to_string()));

        tee.slug = "classic-tee".to_string();
        store.insert_product(id, tee);
        assert!(store.product_by_slug("tee").is_none());
        assert!(store.product_by_slug("classic-tee").is_some());
    }

    #[test]
    fn test_propagate_update_replaces_in_place() {
        let mut store = CatalogStore::default();
        let all = ProductQuery::default().key();
        let kids = ProductQuery {
            gender: Some(Gender::Kid),
            ..ProductQuery::default()
        }
        .key();
        store.insert_page(all, page_of(vec![product("a", "A"), product("b", "B"), product("c", "C")]));
        store.insert_page(kids, page_of(vec![product("b", "B")]));

        let updated = product("b", "B v2");
        let replaced = store.propagate_update(&ProductId::new("b"), &updated);
        assert_eq!(replaced, 2);

        let page = store.page(&all).unwrap_or_else(|| panic!("page missing"));
        let titles: Vec<_> = page.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B v2", "C"]);
        assert_eq!(page.count, 3);
        assert_eq!(store.page_count(), 2);
    }

    #[test]
    fn test_propagate_update_without_matches() {
        let mut store = CatalogStore::default();
        store.insert_page(ProductQuery::default().key(), page_of(vec![product("a", "A")]));
        assert_eq!(store.propagate_update(&ProductId::new("zzz"), &product("zzz", "Z")), 0);
    }
}
