//! Integration tests for Product Gallery.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p product-gallery-integration-tests
//! ```
//!
//! Each test starts a stub catalog API and a storefront on loopback
//! (ephemeral ports), then drives the page with form posts exactly as the
//! browser would. No external network access is needed.

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use product_gallery_storefront::cart::CartSlot;
use product_gallery_storefront::config::{CatalogConfig, SentryConfig, StorefrontConfig};
use product_gallery_storefront::routes;
use product_gallery_storefront::state::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;

// =============================================================================
// Stub Catalog API
// =============================================================================

/// Fake Store compatible catalog served from memory.
///
/// Counts requests per endpoint and can be switched into a failing mode in
/// which every endpoint answers 500.
#[derive(Clone)]
pub struct StubCatalog {
    inner: Arc<StubInner>,
    addr: SocketAddr,
}

struct StubInner {
    products: Vec<Value>,
    categories: Vec<String>,
    product_hits: AtomicUsize,
    category_hits: AtomicUsize,
    failing: AtomicBool,
}

impl StubCatalog {
    /// Serve `products` on an ephemeral loopback port.
    ///
    /// Categories are derived from the products, in first-seen order.
    pub async fn start(products: Vec<Value>) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for product in &products {
            if let Some(label) = product["category"].as_str()
                && !labels.iter().any(|l| l == label)
            {
                labels.push(label.to_string());
            }
        }

        let inner = Arc::new(StubInner {
            products,
            categories: labels,
            product_hits: AtomicUsize::new(0),
            category_hits: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        });

        let app = Router::new()
            .route("/products", get(all_products))
            .route("/products/categories", get(category_labels))
            .route("/products/category/{category}", get(products_in_category))
            .with_state(inner.clone());

        let addr = serve(app).await;
        Self { inner, addr }
    }

    /// Base URL to configure the storefront with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests served by either product endpoint.
    #[must_use]
    pub fn product_hits(&self) -> usize {
        self.inner.product_hits.load(Ordering::SeqCst)
    }

    /// Requests served by the categories endpoint.
    #[must_use]
    pub fn category_hits(&self) -> usize {
        self.inner.category_hits.load(Ordering::SeqCst)
    }

    /// Make every endpoint answer 500 (or recover).
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response()
}

async fn all_products(State(stub): State<Arc<StubInner>>) -> Response {
    stub.product_hits.fetch_add(1, Ordering::SeqCst);
    if stub.failing.load(Ordering::SeqCst) {
        return failure();
    }
    Json(stub.products.clone()).into_response()
}

async fn products_in_category(
    State(stub): State<Arc<StubInner>>,
    Path(category): Path<String>,
) -> Response {
    stub.product_hits.fetch_add(1, Ordering::SeqCst);
    if stub.failing.load(Ordering::SeqCst) {
        return failure();
    }
    let matching: Vec<Value> = stub
        .products
        .iter()
        .filter(|p| p["category"].as_str() == Some(category.as_str()))
        .cloned()
        .collect();
    Json(matching).into_response()
}

async fn category_labels(State(stub): State<Arc<StubInner>>) -> Response {
    stub.category_hits.fetch_add(1, Ordering::SeqCst);
    if stub.failing.load(Ordering::SeqCst) {
        return failure();
    }
    Json(stub.categories.clone()).into_response()
}

/// Product JSON in the catalog API's shape.
#[must_use]
pub fn product_json(id: i64, price: f64, rate: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "price": price,
        "description": format!("Description of product {id}"),
        "category": category,
        "image": format!("https://images.example.test/{id}.jpg"),
        "rating": { "rate": rate, "count": 10 },
    })
}

// =============================================================================
// Storefront Under Test
// =============================================================================

/// A running storefront plus an HTTP client that follows its redirects.
pub struct Gallery {
    pub state: AppState,
    pub client: reqwest::Client,
    addr: SocketAddr,
}

impl Gallery {
    /// Start a storefront against `catalog_url` with the given cart slot.
    ///
    /// The initial catalog load is not run; call [`AppState::initial_load`].
    pub async fn start(catalog_url: &str, slot: impl CartSlot + 'static) -> Self {
        let state = AppState::new(test_config(catalog_url), slot);
        let addr = serve(routes::app(state.clone())).await;

        Self {
            state,
            client: reqwest::Client::new(),
            addr,
        }
    }

    /// Render the page.
    pub async fn page(&self) -> String {
        let response = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .expect("page request failed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.expect("page body")
    }

    /// Submit a form and return the response after redirects.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("form post failed")
    }

    /// Submit a form that must succeed and return the re-rendered page.
    pub async fn act(&self, path: &str, form: &[(&str, &str)]) -> String {
        let response = self.post(path, form).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK, "POST {path}");
        response.text().await.expect("page body")
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Storefront configuration pointing at a stub catalog.
#[must_use]
pub fn test_config(catalog_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        catalog: CatalogConfig::parse(catalog_url).expect("valid catalog URL"),
        cart_path: "unused-cart.json".into(),
        sentry: SentryConfig::default(),
    }
}

/// Product IDs in grid order, read from the rendered page.
#[must_use]
pub fn grid_ids(html: &str) -> Vec<i64> {
    const MARKER: &str = "action=\"/view/product/";

    html.split(MARKER)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|id| id.parse().ok())
        .collect()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_serves_category_labels_in_first_seen_order() {
        let stub = StubCatalog::start(vec![
            product_json(1, 1.0, 1.0, "jewelery"),
            product_json(2, 2.0, 2.0, "electronics"),
            product_json(3, 3.0, 3.0, "jewelery"),
        ])
        .await;

        let labels: Vec<String> = reqwest::get(format!("{}/products/categories", stub.base_url()))
            .await
            .expect("categories request")
            .json()
            .await
            .expect("categories body");
        assert_eq!(labels, vec!["jewelery", "electronics"]);
        assert_eq!(stub.category_hits(), 1);
        assert_eq!(stub.product_hits(), 0);
    }

    #[test]
    fn test_grid_ids_skips_dismiss_control() {
        let html = r#"
            <form method="post" action="/view/product/3"></form>
            <form method="post" action="/view/product/1"></form>
            <form method="post" action="/view/product/dismiss"></form>
        "#;
        assert_eq!(grid_ids(html), vec![3, 1]);
    }
}
