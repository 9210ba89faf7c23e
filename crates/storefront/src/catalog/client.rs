//! HTTP client for the product catalog API.

use std::sync::Arc;

use product_gallery_core::{Category, Product};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use crate::config::CatalogConfig;

/// Maximum number of body characters kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for the product catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch all products, or only those of `category`.
    ///
    /// `GET /products` or `GET /products/category/{category}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a product list.
    #[instrument(skip_all, fields(category = category.map(Category::as_str)))]
    pub async fn products(&self, category: Option<&Category>) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url(category)?;
        let products: Vec<Product> = self.get_json(url).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetch the category labels.
    ///
    /// `GET /products/categories`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a list of labels.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint(&["products", "categories"])?;
        let categories: Vec<Category> = self.get_json(url).await?;
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// URL of the product list, filtered server-side when a category is given.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidBaseUrl` if the base URL cannot carry a path.
    pub fn products_url(&self, category: Option<&Category>) -> Result<Url, CatalogError> {
        match category {
            Some(category) => self.endpoint(&["products", "category", category.as_str()]),
            None => self.endpoint(&["products"]),
        }
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a `GET` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body = excerpt(&response_text);
            tracing::error!(
                status = %status,
                body = %body,
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status { status, body });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&response_text),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig::parse(base).unwrap())
    }

    #[test]
    fn test_all_products_url() {
        let url = client("https://fakestoreapi.com").products_url(None).unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products");
    }

    #[test]
    fn test_category_products_url_is_encoded() {
        let category = Category::new("men's clothing");
        let url = client("https://fakestoreapi.com")
            .products_url(Some(&category))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fakestoreapi.com/products/category/men's%20clothing"
        );
    }

    #[test]
    fn test_category_with_slash_stays_one_segment() {
        let category = Category::new("home/garden");
        let url = client("http://localhost:9000")
            .products_url(Some(&category))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/products/category/home%2Fgarden"
        );
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let url = client("http://localhost:9000/api/")
            .endpoint(&["products", "categories"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/products/categories");
    }

    #[test]
    fn test_cannot_be_a_base_url_is_rejected() {
        let err = client("mailto:shop@example.com")
            .products_url(None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(BODY_EXCERPT_CHARS * 2);
        assert_eq!(excerpt(&long).len(), BODY_EXCERPT_CHARS);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_http_error() {
        // Port 9 (discard) on loopback is not listening in test environments
        let err = client("http://127.0.0.1:9").categories().await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }
}
