//! Gallery page: header, selectors, grid, and the two dialogs.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use product_gallery_core::{Cart, Product, SortKey};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::{AppState, PageSnapshot};

// =============================================================================
// View Models
// =============================================================================

/// Header cart summary.
#[derive(Debug, Clone)]
pub struct HeaderView {
    /// Cart total with two decimals.
    pub total: String,
    /// Number of cart entries.
    pub count: usize,
}

/// One entry of the category selector.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: String,
    pub selected: bool,
}

/// One entry of the sort selector.
#[derive(Debug, Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Product display data for the grid and the detail dialog.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub image: String,
    pub rating: String,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            rating: product.rating.rate.to_string(),
            description: product.description.clone(),
        }
    }
}

/// One cart dialog line; `position` is what the remove control posts.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub position: usize,
    pub title: String,
    pub price: String,
    pub image: String,
}

/// Cart dialog contents.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .entries()
                .iter()
                .enumerate()
                .map(|(position, entry)| CartLineView {
                    position,
                    title: entry.product().title.clone(),
                    price: entry.price().to_string(),
                    image: entry.product().image.clone(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Template
// =============================================================================

/// The whole page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct GalleryTemplate {
    pub header: HeaderView,
    pub all_categories_selected: bool,
    pub categories: Vec<CategoryOption>,
    pub sorts: Vec<SortOption>,
    pub products: Vec<ProductView>,
    pub product_dialog: Option<ProductView>,
    pub cart_dialog: Option<CartView>,
}

impl From<&PageSnapshot> for GalleryTemplate {
    fn from(page: &PageSnapshot) -> Self {
        let view = &page.view;

        Self {
            header: HeaderView {
                total: page.cart.total_display(),
                count: page.cart.len(),
            },
            all_categories_selected: view.category.is_none(),
            categories: page
                .catalog
                .categories
                .iter()
                .map(|category| CategoryOption {
                    value: category.to_string(),
                    selected: view.category.as_ref() == Some(category),
                })
                .collect(),
            sorts: SortKey::ALL
                .into_iter()
                .map(|key| SortOption {
                    value: key.as_str(),
                    label: key.label(),
                    selected: key == view.sort,
                })
                .collect(),
            products: view
                .sort
                .sorted(&page.catalog.products)
                .iter()
                .map(ProductView::from)
                .collect(),
            product_dialog: view.product_dialog.product().map(ProductView::from),
            cart_dialog: view
                .cart_dialog
                .is_open()
                .then(|| CartView::from(&page.cart)),
        }
    }
}

/// Render the page from current state.
///
/// # Errors
///
/// Returns `AppError::Internal` if the template fails to render.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    GalleryTemplate::from(&state.page())
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Failed to render gallery: {e}")))
}
