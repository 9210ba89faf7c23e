//! Catalog category labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category label as served by the catalog API (e.g. `"electronics"`).
///
/// Only used as a filter key. The empty selection ("All Categories") is
/// modelled as `Option<Category>::None`, never as an empty label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category from its label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Parse a selector value, treating blank input as "all categories".
    #[must_use]
    pub fn from_selection(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self::new(value))
        }
    }

    /// The label as served by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
