//! Cart route handlers.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::view::Action;

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    /// Zero-based position in the cart.
    pub position: usize,
}

/// Add the product shown in the detail dialog and close the dialog.
///
/// Does nothing when the dialog is closed.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::AddSelectedToCart).await;
    Redirect::to("/")
}

/// Remove the entry at a position.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the position is out of range.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    state.remove_from_cart(form.position).ok_or_else(|| {
        AppError::BadRequest(format!("cart position {} out of range", form.position))
    })?;
    Ok(Redirect::to("/"))
}
