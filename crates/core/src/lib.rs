//! Product Gallery Core - Shared types library.
//!
//! This crate provides the types used across all Product Gallery components:
//! - `storefront` - The single-page gallery view and its cart
//! - `cli` - Command-line tools for inspecting the catalog and cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP
//! clients, no storage. Sorting and cart arithmetic live here so they can be
//! tested in isolation from rendering and persistence.
//!
//! # Modules
//!
//! - [`types`] - Product, price, category, sort key and cart types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
