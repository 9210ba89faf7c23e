//! Catalog query commands.
//!
//! # Usage
//!
//! ```bash
//! gallery-cli catalog products
//! gallery-cli catalog products --category jewelery --sort rating-high
//! gallery-cli catalog categories
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Catalog API base URL (default `https://fakestoreapi.com`)

use product_gallery_core::{Category, SortKey};
use product_gallery_storefront::catalog::CatalogClient;
use product_gallery_storefront::config::StorefrontConfig;

use super::CommandError;

/// List products, optionally filtered by category and sorted.
pub async fn products(
    config: &StorefrontConfig,
    category: Option<&str>,
    sort: &str,
) -> Result<(), CommandError> {
    let sort: SortKey = sort.parse()?;
    let category = category.and_then(Category::from_selection);

    let client = CatalogClient::new(&config.catalog);
    let products = sort.sorted(&client.products(category.as_ref()).await?);

    for product in &products {
        tracing::info!(
            "{:>4}  ${:>8}  {:>3}  {}",
            product.id,
            product.price.to_fixed(),
            product.rating.rate,
            product.title
        );
    }
    tracing::info!("{} products ({})", products.len(), sort.label());
    Ok(())
}

/// List categories.
pub async fn categories(config: &StorefrontConfig) -> Result<(), CommandError> {
    let client = CatalogClient::new(&config.catalog);
    let categories = client.categories().await?;

    for category in &categories {
        tracing::info!("{category}");
    }
    tracing::info!("{} categories", categories.len());
    Ok(())
}
