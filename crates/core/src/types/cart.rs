//! The shopping cart as a flat list of product snapshots.
//!
//! Every add is a new line: adding the same product twice yields two
//! entries. Removal is by position, and later entries shift down by one.
//! Persistence lives in the storefront crate; this type is pure.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Category, Price, Product, ProductId, Rating};

/// A product as it was when added to the cart.
///
/// Later catalog refreshes never change an entry. Saved entries only need
/// `id` and `price` to load; missing display fields come back empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartEntry(Product);

/// Saved entry shape, tolerant of fields the catalog has since dropped.
#[derive(Deserialize)]
struct SavedEntry {
    id: ProductId,
    price: Price,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    image: String,
    #[serde(default)]
    rating: Rating,
}

impl<'de> Deserialize<'de> for CartEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let saved = SavedEntry::deserialize(deserializer)?;
        Ok(Self(Product {
            id: saved.id,
            title: saved.title,
            price: saved.price,
            description: saved.description,
            category: saved.category,
            image: saved.image,
            rating: saved.rating,
        }))
    }
}

impl CartEntry {
    /// The snapshotted product.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.0
    }

    /// The snapshotted price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.0.price
    }
}

impl From<Product> for CartEntry {
    fn from(product: Product) -> Self {
        Self(product)
    }
}

/// Ordered cart entries.
///
/// Serializes as a plain JSON array of products.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a snapshot of `product`.
    pub fn add(&mut self, product: &Product) {
        self.entries.push(CartEntry::from(product.clone()));
    }

    /// Remove the entry at `position`, shifting later entries down.
    ///
    /// Returns `None` and leaves the cart untouched when `position` is out
    /// of range.
    pub fn remove(&mut self, position: usize) -> Option<CartEntry> {
        (position < self.entries.len()).then(|| self.entries.remove(position))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of all entry prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::price).sum()
    }

    /// Sum of all entry prices with two decimals, e.g. `"15.00"`.
    #[must_use]
    pub fn total_display(&self) -> String {
        self.total().to_fixed()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CartEntry> for Cart {
    fn from_iter<I: IntoIterator<Item = CartEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
