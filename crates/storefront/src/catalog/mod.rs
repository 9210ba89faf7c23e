//! Product catalog API client and the in-memory catalog it feeds.
//!
//! # Architecture
//!
//! - [`CatalogClient`] issues the three read-only `GET` requests the page
//!   needs (all products, products of one category, category labels)
//! - [`CatalogStore`] holds the last successful result of each and swallows
//!   failures: a failed fetch is logged and the previous list stays
//! - No caching, retry, or request sequencing: whichever fetch completes last
//!   wins
//!
//! # Example
//!
//! ```rust,ignore
//! use product_gallery_storefront::catalog::{CatalogClient, CatalogStore};
//!
//! let store = CatalogStore::new(CatalogClient::new(&config.catalog));
//! store.initial_load(None).await;
//!
//! let snapshot = store.snapshot();
//! println!("{} products", snapshot.products.len());
//! ```

mod client;
mod store;

pub use client::CatalogClient;
pub use store::{CatalogSnapshot, CatalogStore, FetchOutcome};

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
///
/// These never reach the page: [`CatalogStore`] logs and drops them.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid catalog base URL: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog API returned 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn test_invalid_base_url_display() {
        let err = CatalogError::InvalidBaseUrl("mailto:shop@example.com".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid catalog base URL: mailto:shop@example.com"
        );
    }
}
