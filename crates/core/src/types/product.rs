//! Catalog products as served by the external API.

use serde::{Deserialize, Serialize};

use super::{Category, Price, ProductId};

/// Average customer rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average rate (e.g., 3.9).
    pub rate: f64,
    /// Number of ratings behind the average.
    pub count: u32,
}

/// A catalog product.
///
/// Field names match the catalog's JSON exactly, so the same shape is used
/// for API responses and for the durable cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Externally assigned identifier.
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: Category,
    /// Image URL.
    pub image: String,
    pub rating: Rating,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_product() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995).unwrap());
        assert_eq!(product.category, Category::new("men's clothing"));
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_rating_is_rejected() {
        let json = r#"{"id":1,"title":"t","price":1,"description":"d","category":"c","image":"i"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
