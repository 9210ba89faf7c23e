//! View-state route handlers.
//!
//! Each handler maps one page control to an [`Action`] and redirects back to
//! the page.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use product_gallery_core::{Category, ProductId, SortKey};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::view::Action;

/// Category selector form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    /// Empty string selects all categories.
    #[serde(default)]
    pub category: String,
}

/// Sort selector form data.
#[derive(Debug, Deserialize)]
pub struct SortForm {
    #[serde(default)]
    pub sort: String,
}

/// Change the selected category and re-fetch products when it differs.
#[instrument(skip(state))]
pub async fn select_category(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Redirect {
    let category = Category::from_selection(&form.category);
    state.dispatch(Action::SelectCategory(category)).await;
    Redirect::to("/")
}

/// Change the sort key.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unknown sort value.
#[instrument(skip(state))]
pub async fn select_sort(
    State(state): State<AppState>,
    Form(form): Form<SortForm>,
) -> Result<Redirect> {
    let sort: SortKey = form
        .sort
        .parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))?;
    state.dispatch(Action::SelectSort(sort)).await;
    Ok(Redirect::to("/"))
}

/// Open the detail dialog for a product in the current catalog.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed ID and `AppError::NotFound`
/// if the product is not in the current catalog.
#[instrument(skip(state))]
pub async fn open_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let product_id: ProductId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid product ID: {id}")))?;

    if !state.open_product(product_id).await {
        return Err(AppError::NotFound(format!("product {product_id}")));
    }
    Ok(Redirect::to("/"))
}

/// Close the detail dialog (close control or backdrop).
#[instrument(skip(state))]
pub async fn dismiss_product(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::DismissProduct).await;
    Redirect::to("/")
}

/// Open the cart dialog.
#[instrument(skip(state))]
pub async fn open_cart(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::OpenCart).await;
    Redirect::to("/")
}

/// Close the cart dialog.
#[instrument(skip(state))]
pub async fn close_cart(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::CloseCart).await;
    Redirect::to("/")
}
