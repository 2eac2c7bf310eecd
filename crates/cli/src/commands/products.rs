//! `vitrine products ...`

use std::path::PathBuf;

use tracing::info;
use vitrine_core::{DEFAULT_LIMIT, Gender, ProductId, ProductPatch, ProductQuery, parse_page};
use vitrine_storefront::{CatalogService, HttpProductsApi};

use super::{print_json, read_files};

type Catalog = CatalogService<HttpProductsApi>;

/// Print one listing page.
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched.
pub async fn list(
    catalog: &Catalog,
    limit: Option<u32>,
    offset: Option<u32>,
    page: Option<&str>,
    gender: Option<Gender>,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = match page {
        Some(raw) => {
            ProductQuery::for_page(parse_page(Some(raw)), limit.unwrap_or(DEFAULT_LIMIT), gender)
        }
        None => ProductQuery {
            limit,
            offset,
            gender,
        },
    };

    let page = catalog.fetch_list(query).await?;
    info!(
        count = page.count,
        pages = page.pages,
        shown = page.products.len(),
        "Fetched products"
    );
    print_json(&page)?;
    Ok(())
}

/// Print one product by id.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched.
pub async fn get(catalog: &Catalog, id: &ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let product = catalog.fetch_product(id).await?;
    print_json(&product)?;
    Ok(())
}

/// Print one product by slug.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched.
pub async fn by_slug(catalog: &Catalog, slug: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = catalog.fetch_product_by_slug(slug).await?;
    print_json(&product)?;
    Ok(())
}

/// Create (placeholder id) or update a product, uploading `images` first.
///
/// # Errors
///
/// Returns an error if an image cannot be read or uploaded, or if the save
/// is rejected.
pub async fn save(
    catalog: &Catalog,
    id: &ProductId,
    patch: ProductPatch,
    images: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    let files = read_files(images).await?;
    let product = catalog.save_product(id, patch, &files).await?;
    info!(product_id = %product.id, images = product.images.len(), "Saved product");
    print_json(&product)?;
    Ok(())
}
