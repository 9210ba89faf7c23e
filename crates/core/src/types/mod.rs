//! Core types for Product Gallery.
//!
//! This module provides type-safe wrappers for the catalog and cart.

pub mod cart;
pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod sort;

pub use cart::{Cart, CartEntry};
pub use category::Category;
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, Rating};
pub use sort::{SortKey, SortKeyError};
