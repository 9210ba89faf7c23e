//! The last successfully fetched catalog.

use std::sync::{Arc, PoisonError, RwLock};

use product_gallery_core::{Category, Product, ProductId};
use tracing::instrument;

use super::{CatalogClient, CatalogError};

/// Products and categories as of the last successful fetch of each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    /// Products in API order.
    pub products: Vec<Product>,
    /// Category labels in API order.
    pub categories: Vec<Category>,
}

/// What a refresh did to the stored list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced wholesale with this many items.
    Replaced(usize),
    /// The fetch failed and the previous list was kept.
    Kept,
}

/// Shared catalog state fed by a [`CatalogClient`].
///
/// The lock is only held to swap lists in or clone them out, never across
/// a request. Two overlapping refreshes both write; the one that completes
/// last wins.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<CatalogStoreInner>,
}

struct CatalogStoreInner {
    client: CatalogClient,
    snapshot: RwLock<CatalogSnapshot>,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            inner: Arc::new(CatalogStoreInner {
                client,
                snapshot: RwLock::new(CatalogSnapshot::default()),
            }),
        }
    }

    /// The underlying API client.
    #[must_use]
    pub fn client(&self) -> &CatalogClient {
        &self.inner.client
    }

    /// Clone out the current lists.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Look up a product in the current list.
    #[must_use]
    pub fn find_product(&self, id: ProductId) -> Option<Product> {
        self.inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Fetch products and categories concurrently.
    pub async fn initial_load(&self, category: Option<&Category>) -> (FetchOutcome, FetchOutcome) {
        tokio::join!(self.refresh_products(category), self.refresh_categories())
    }

    /// Replace the product list with a fresh fetch.
    ///
    /// On failure the error is logged and the previous list is kept.
    #[instrument(skip_all, fields(category = category.map(Category::as_str)))]
    pub async fn refresh_products(&self, category: Option<&Category>) -> FetchOutcome {
        match self.inner.client.products(category).await {
            Ok(products) => {
                let count = products.len();
                self.write().products = products;
                tracing::info!(count, "Product list replaced");
                FetchOutcome::Replaced(count)
            }
            Err(e) => {
                report_fetch_failure("products", &e);
                FetchOutcome::Kept
            }
        }
    }

    /// Replace the category list with a fresh fetch.
    ///
    /// On failure the error is logged and the previous list is kept.
    #[instrument(skip_all)]
    pub async fn refresh_categories(&self) -> FetchOutcome {
        match self.inner.client.categories().await {
            Ok(categories) => {
                let count = categories.len();
                self.write().categories = categories;
                tracing::info!(count, "Category list replaced");
                FetchOutcome::Replaced(count)
            }
            Err(e) => {
                report_fetch_failure("categories", &e);
                FetchOutcome::Kept
            }
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogSnapshot> {
        self.inner
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn report_fetch_failure(list: &'static str, error: &CatalogError) {
    let event_id = sentry::capture_error(error);
    tracing::error!(
        list,
        error = %error,
        sentry_event_id = %event_id,
        "Catalog fetch failed, keeping previous list"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn unreachable_store() -> CatalogStore {
        let config = CatalogConfig::parse("http://127.0.0.1:9").unwrap();
        CatalogStore::new(CatalogClient::new(&config))
    }

    #[test]
    fn test_new_store_is_empty() {
        assert_eq!(unreachable_store().snapshot(), CatalogSnapshot::default());
    }

    #[tokio::test]
    async fn test_failed_initial_load_leaves_lists_empty() {
        let store = unreachable_store();
        let outcomes = store.initial_load(None).await;
        assert_eq!(outcomes, (FetchOutcome::Kept, FetchOutcome::Kept));
        assert!(store.snapshot().products.is_empty());
        assert!(store.snapshot().categories.is_empty());
    }

    #[tokio::test]
    async fn test_failed_category_refresh_does_not_panic() {
        let store = unreachable_store();
        let category = Category::new("electronics");
        assert_eq!(
            store.refresh_products(Some(&category)).await,
            FetchOutcome::Kept
        );
        assert!(store.find_product(ProductId::new(1)).is_none());
    }
}
