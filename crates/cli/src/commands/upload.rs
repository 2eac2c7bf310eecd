//! `vitrine upload ...`

use std::path::PathBuf;

use vitrine_storefront::{CatalogService, HttpProductsApi};

use super::{print_json, read_files};

/// Upload `paths` as one batch and print the assigned names in input order.
///
/// # Errors
///
/// Returns an error if a file cannot be read or any upload fails.
pub async fn files(
    catalog: &CatalogService<HttpProductsApi>,
    paths: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    let files = read_files(paths).await?;
    let names = catalog.upload_all(&files).await?;
    print_json(&names)?;
    Ok(())
}
