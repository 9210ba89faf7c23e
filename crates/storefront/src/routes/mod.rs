//! HTTP route handlers for the gallery page.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Gallery page
//! GET  /health                 - Health check
//!
//! # View state (each redirects to /)
//! POST /view/category          - Select category (form: category, "" = all)
//! POST /view/sort              - Select sort key (form: sort)
//! POST /view/product/{id}      - Open product detail dialog
//! POST /view/product/dismiss   - Close product detail dialog
//! POST /view/cart/open         - Open cart dialog
//! POST /view/cart/close        - Close cart dialog
//!
//! # Cart (each redirects to /)
//! POST /cart/add               - Add the product in the detail dialog
//! POST /cart/remove            - Remove entry (form: position)
//! ```

pub mod cart;
pub mod home;
pub mod view;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header::CACHE_CONTROL},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the view-state routes router.
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/category", post(view::select_category))
        .route("/sort", post(view::select_sort))
        .route("/product/dismiss", post(view::dismiss_product))
        .route("/product/{id}", post(view::open_product))
        .route("/cart/open", post(view::open_cart))
        .route("/cart/close", post(view::close_cart))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .nest("/view", view_routes())
        .nest("/cart", cart_routes())
}

/// Build the full application with middleware and state.
///
/// Sentry layers are added by the binary, outside this stack.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    routes().layer(middleware).with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::MemorySlot;
    use crate::config::{CatalogConfig, SentryConfig, StorefrontConfig};
    use axum::http::{StatusCode, header};
    use tower::ServiceExt;

    fn offline_app() -> Router {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            catalog: CatalogConfig::parse("http://127.0.0.1:9").unwrap(),
            cart_path: std::path::PathBuf::from("unused.json"),
            sentry: SentryConfig::default(),
        };
        app(AppState::new(config, MemorySlot::new()))
    }

    fn form(uri: &str, body: &'static str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = offline_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_open_cart_then_render() {
        let app = offline_app();

        let response = app
            .clone()
            .oneshot(form("/view/cart/open", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Your cart is empty"));
        assert!(html.contains("Total: $0.00"));
    }

    #[tokio::test]
    async fn test_unknown_sort_is_rejected() {
        let response = offline_app()
            .oneshot(form("/view/sort", "sort=alphabetical"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_remove_out_of_range_is_rejected() {
        let response = offline_app()
            .oneshot(form("/cart/remove", "position=0"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let response = offline_app()
            .oneshot(form("/view/product/42", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_with_closed_dialog_is_a_no_op() {
        let app = offline_app();
        let response = app.clone().oneshot(form("/cart/add", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body_text(
            app.oneshot(Request::get("/").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Cart (0)"));
    }
}
