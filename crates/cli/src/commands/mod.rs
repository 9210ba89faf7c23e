//! CLI command implementations.

pub mod cart;
pub mod catalog;

use product_gallery_core::{ProductId, SortKeyError};
use product_gallery_storefront::catalog::CatalogError;
use product_gallery_storefront::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid environment or flag configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog API request failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Unknown sort key.
    #[error(transparent)]
    Sort(#[from] SortKeyError),

    /// Product ID not present in the catalog.
    #[error("Product {0} not found in catalog")]
    ProductNotFound(ProductId),

    /// Cart position out of range.
    #[error("No cart entry at position {position} (cart has {len} entries)")]
    PositionOutOfRange { position: usize, len: usize },
}
