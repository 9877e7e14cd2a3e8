//! A single product's entry in the cart.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// One product in the cart together with how many of it the shopper wants.
///
/// A `LineItem` held by a [`CartState`](crate::CartState) always has a
/// quantity of at least 1; items that drop to zero are removed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    /// Product key, unique within a cart.
    pub id: ProductId,
    /// Number of units, always >= 1 inside a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(id: ProductId, quantity: u32) -> Self {
        Self { id, quantity }
    }

    /// A freshly added item with a single unit.
    #[must_use]
    pub const fn single(id: ProductId) -> Self {
        Self { id, quantity: 1 }
    }
}
