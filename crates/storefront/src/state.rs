//! Application state shared across handlers.
//!
//! One storefront process serves one shopper, so the view state and cart are
//! single instances behind mutexes. Locks are held only for in-memory work
//! and the synchronous cart write, never across a catalog fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use product_gallery_core::{Cart, CartEntry, ProductId};

use crate::cart::{CartSlot, CartStore};
use crate::catalog::{CatalogClient, CatalogSnapshot, CatalogStore, FetchOutcome};
use crate::config::StorefrontConfig;
use crate::error::add_breadcrumb;
use crate::view::{Action, Effect, Transition, ViewState};

/// Everything needed to render the page once.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub catalog: CatalogSnapshot,
    pub view: ViewState,
    pub cart: Cart,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    view: Mutex<ViewState>,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cart is seeded from `slot`; the catalog starts empty until
    /// [`AppState::initial_load`] runs.
    pub fn new(config: StorefrontConfig, slot: impl CartSlot + 'static) -> Self {
        let catalog = CatalogStore::new(CatalogClient::new(&config.catalog));
        let cart = CartStore::load(slot);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                view: Mutex::new(ViewState::default()),
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Fetch products (for the current category) and categories.
    pub async fn initial_load(&self) -> (FetchOutcome, FetchOutcome) {
        let category = self.lock_view().category.clone();
        self.inner.catalog.initial_load(category.as_ref()).await
    }

    /// Apply a user action and carry out its effect.
    pub async fn dispatch(&self, action: Action) {
        let effect = {
            let mut view = self.lock_view();
            let Transition { state, effect } = std::mem::take(&mut *view).apply(action);
            *view = state;
            effect
        };

        match effect {
            Some(Effect::FetchProducts(category)) => {
                add_breadcrumb(
                    "catalog",
                    "Category selected",
                    Some(&[(
                        "category",
                        category.as_ref().map_or("", |c| c.as_str()),
                    )]),
                );
                self.inner.catalog.refresh_products(category.as_ref()).await;
            }
            Some(Effect::AddToCart(product)) => {
                let product_id = product.id.to_string();
                add_breadcrumb(
                    "cart",
                    "Added to cart",
                    Some(&[("product_id", product_id.as_str())]),
                );
                self.lock_cart().add(&product);
            }
            None => {}
        }
    }

    /// Open the detail dialog for a product in the current catalog.
    ///
    /// Returns `false` if the product is not in the catalog.
    pub async fn open_product(&self, id: ProductId) -> bool {
        match self.inner.catalog.find_product(id) {
            Some(product) => {
                self.dispatch(Action::OpenProduct(product)).await;
                true
            }
            None => false,
        }
    }

    /// Remove the cart entry at `position`.
    ///
    /// Returns `None` if the position is out of range.
    pub fn remove_from_cart(&self, position: usize) -> Option<CartEntry> {
        let removed = self.lock_cart().remove(position)?;
        let product_id = removed.product().id.to_string();
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        Some(removed)
    }

    /// Clone out everything the page renders from.
    #[must_use]
    pub fn page(&self) -> PageSnapshot {
        PageSnapshot {
            catalog: self.inner.catalog.snapshot(),
            view: self.lock_view().clone(),
            cart: self.lock_cart().cart().clone(),
        }
    }

    fn lock_view(&self) -> MutexGuard<'_, ViewState> {
        self.inner.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
