//! Cart management commands.
//!
//! These edit the same cart file the storefront reads at startup. A running
//! storefront does not pick up changes until it restarts.
//!
//! # Environment Variables
//!
//! - `GALLERY_CART_PATH` - Cart file (default `.product-gallery/cart.json`)
//! - `CATALOG_API_URL` - Catalog API used by `cart add`

use product_gallery_core::ProductId;
use product_gallery_storefront::cart::{CartStore, FileSlot};
use product_gallery_storefront::catalog::CatalogClient;
use product_gallery_storefront::config::StorefrontConfig;

use super::CommandError;

fn open(config: &StorefrontConfig) -> CartStore {
    CartStore::load(FileSlot::new(config.cart_path.clone()))
}

/// Show cart entries and total.
pub fn show(config: &StorefrontConfig) {
    let store = open(config);

    for (position, entry) in store.cart().entries().iter().enumerate() {
        tracing::info!(
            "{position:>3}  ${:>8}  {}",
            entry.price().to_fixed(),
            entry.product().title
        );
    }
    tracing::info!(
        "{} entries, total ${}",
        store.cart().len(),
        store.cart().total_display()
    );
}

/// Add a catalog product to the cart.
pub async fn add(config: &StorefrontConfig, id: ProductId) -> Result<(), CommandError> {
    let client = CatalogClient::new(&config.catalog);
    let product = client
        .products(None)
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(CommandError::ProductNotFound(id))?;

    let mut store = open(config);
    store.add(&product);
    tracing::info!(
        "Added {} (total ${})",
        product.title,
        store.cart().total_display()
    );
    Ok(())
}

/// Remove the entry at `position`.
pub fn remove(config: &StorefrontConfig, position: usize) -> Result<(), CommandError> {
    let mut store = open(config);
    let len = store.cart().len();
    let removed = store
        .remove(position)
        .ok_or(CommandError::PositionOutOfRange { position, len })?;

    tracing::info!(
        "Removed {} (total ${})",
        removed.product().title,
        store.cart().total_display()
    );
    Ok(())
}

/// Remove every entry.
pub fn clear(config: &StorefrontConfig) {
    let mut store = open(config);
    store.clear();
    tracing::info!("Cart cleared");
}
