//! Sort orders for the product grid.
//!
//! Sorting is a pure derivation: [`SortKey::sorted`] never touches the list
//! it was given and always returns a permutation of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Product;

/// Error parsing a sort selector value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0:?}")]
pub struct SortKeyError(pub String);

/// How the grid orders products.
///
/// Wire values match the selector options: `""`, `price-low`, `price-high`,
/// `rating-high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "price-low")]
    PriceAscending,
    #[serde(rename = "price-high")]
    PriceDescending,
    #[serde(rename = "rating-high")]
    RatingDescending,
}

impl SortKey {
    /// Every key, in selector order.
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::RatingDescending,
    ];

    /// Selector value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::PriceAscending => "price-low",
            Self::PriceDescending => "price-high",
            Self::RatingDescending => "rating-high",
        }
    }

    /// Human-readable selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Sort By",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
            Self::RatingDescending => "Rating: High to Low",
        }
    }

    /// Return a sorted copy of `products`.
    ///
    /// The sort is stable, so ties keep catalog order.
    #[must_use]
    pub fn sorted(self, products: &[Product]) -> Vec<Product> {
        let mut sorted = products.to_vec();
        match self {
            Self::None => {}
            Self::PriceAscending => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDescending => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::RatingDescending => {
                sorted.sort_by(|a, b| b.rating.rate.total_cmp(&a.rating.rate));
            }
        }
        sorted
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| SortKeyError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Category, Price, ProductId, Rating};

    fn product(id: i64, cents: i64, rate: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            description: String::new(),
            category: Category::new("electronics"),
            image: format!("https://example.test/{id}.jpg"),
            rating: Rating { rate, count: 1 },
        }
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, 1000, 4.0),
            product(2, 500, 2.0),
            product(3, 2599, 4.7),
            product(4, 99, 3.1),
        ]
    }

    #[test]
    fn test_none_preserves_catalog_order() {
        assert_eq!(ids(&SortKey::None.sorted(&catalog())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_price_ascending() {
        assert_eq!(
            ids(&SortKey::PriceAscending.sorted(&catalog())),
            vec![4, 2, 1, 3]
        );
    }

    #[test]
    fn test_rating_descending() {
        assert_eq!(
            ids(&SortKey::RatingDescending.sorted(&catalog())),
            vec![3, 1, 4, 2]
        );
    }

    #[test]
    fn test_every_key_yields_a_permutation() {
        let source = catalog();
        for key in SortKey::ALL {
            let mut sorted = ids(&key.sorted(&source));
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 2, 3, 4], "{key:?} dropped or duplicated");
        }
    }

    #[test]
    fn test_ascending_reversed_is_descending() {
        let source = catalog();
        let mut ascending = SortKey::PriceAscending.sorted(&source);
        ascending.reverse();
        assert_eq!(ascending, SortKey::PriceDescending.sorted(&source));
    }

    #[test]
    fn test_sorting_does_not_mutate_source() {
        let source = catalog();
        let _ = SortKey::PriceDescending.sorted(&source);
        assert_eq!(ids(&source), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let source = vec![product(1, 500, 1.0), product(2, 500, 1.0), product(3, 100, 1.0)];
        assert_eq!(ids(&SortKey::PriceAscending.sorted(&source)), vec![3, 1, 2]);
        assert_eq!(ids(&SortKey::RatingDescending.sorted(&source)), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_selector_values() {
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::None);
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceAscending);
        assert_eq!("price-high".parse::<SortKey>().unwrap(), SortKey::PriceDescending);
        assert_eq!("rating-high".parse::<SortKey>().unwrap(), SortKey::RatingDescending);
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(SortKeyError("cheapest".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_selector_values() {
        assert_eq!(
            serde_json::to_string(&SortKey::RatingDescending).unwrap(),
            "\"rating-high\""
        );
        assert_eq!(serde_json::from_str::<SortKey>("\"\"").unwrap(), SortKey::None);
    }
}
