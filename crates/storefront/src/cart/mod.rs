//! Cart store: the in-memory cart mirrored to a durable slot.
//!
//! Every mutation writes the full entry list to the slot before returning,
//! so the slot and memory agree after each `add`/`remove`/`clear`. A failed
//! write is logged and reported; the in-memory cart still changes.

mod slot;

pub use slot::{CartSlot, FileSlot, MemorySlot, SlotError};

use product_gallery_core::{Cart, CartEntry, Price, Product};

/// Cart with durable persistence.
pub struct CartStore {
    cart: Cart,
    slot: Box<dyn CartSlot>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Seed a cart from `slot`.
    ///
    /// An absent or unreadable slot, or one that is not a JSON array, yields
    /// an empty cart. Array elements are decoded one by one: each element
    /// that decodes is kept in order, and each that does not is dropped with
    /// a warning.
    pub fn load(slot: impl CartSlot + 'static) -> Self {
        let cart = match slot.read() {
            Ok(Some(contents)) => decode_entries(&contents),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved cart, starting empty");
                Cart::new()
            }
        };

        tracing::debug!(entries = cart.len(), "Cart loaded");

        Self {
            cart,
            slot: Box::new(slot),
        }
    }

    /// Append a snapshot of `product` and persist.
    pub fn add(&mut self, product: &Product) {
        self.cart.add(product);
        self.persist();
    }

    /// Remove the entry at `position` and persist.
    ///
    /// Out-of-range positions change nothing, write nothing, and return
    /// `None`.
    pub fn remove(&mut self, position: usize) -> Option<CartEntry> {
        let removed = self.cart.remove(position)?;
        self.persist();
        Some(removed)
    }

    /// Remove every entry and persist.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Sum of entry prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// The in-memory cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                sentry_event_id = %event_id,
                "Failed to persist cart"
            );
        }
    }

    fn try_persist(&self) -> Result<(), SlotError> {
        let contents = serde_json::to_string(&self.cart)?;
        self.slot.write(&contents)
    }
}

fn decode_entries(contents: &str) -> Cart {
    let values = match serde_json::from_str::<Vec<serde_json::Value>>(contents) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unparseable saved cart");
            return Cart::new();
        }
    };

    values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            serde_json::from_value::<CartEntry>(value)
                .inspect_err(|e| {
                    tracing::warn!(position, error = %e, "Dropping unreadable saved cart entry");
                })
                .ok()
        })
        .collect()
}
