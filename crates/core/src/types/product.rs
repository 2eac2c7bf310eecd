//! Product, page and patch types exchanged with the catalog API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::gender::Gender;
use super::id::{ProductId, UserId};

/// A catalog product as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// URL-friendly handle, unique per product.
    pub slug: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image file names, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Owner of the product listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Product {
    /// The blank product handed to forms creating a new product.
    ///
    /// Carries the placeholder id and is never cached.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: ProductId::placeholder(),
            title: String::new(),
            price: Decimal::ZERO,
            description: String::new(),
            slug: String::new(),
            stock: 0,
            sizes: Vec::new(),
            gender: Gender::Men,
            tags: Vec::new(),
            images: Vec::new(),
            user: None,
        }
    }
}

/// The user that owns a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// One page of a product listing, stored verbatim as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsPage {
    /// Total number of products matching the query across all pages.
    pub count: u64,
    /// Number of pages at the requested page size.
    pub pages: u32,
    pub products: Vec<Product>,
}

impl ProductsPage {
    /// 1-based page numbers for pagination controls.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.pages).collect()
    }

    /// Returns `true` if the page holds a product with the given id.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == id)
    }
}

/// Partial product fields sent on create and update.
///
/// Unset fields are omitted from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ProductPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&Product> for ProductPatch {
    fn from(product: &Product) -> Self {
        Self {
            title: Some(product.title.clone()),
            price: Some(product.price),
            description: Some(product.description.clone()),
            slug: Some(product.slug.clone()),
            stock: Some(product.stock),
            sizes: Some(product.sizes.clone()),
            gender: Some(product.gender),
            tags: Some(product.tags.clone()),
            images: Some(product.images.clone()),
        }
    }
}
