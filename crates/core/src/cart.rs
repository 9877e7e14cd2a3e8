//! Pure cart state transitions.
//!
//! [`CartState`] is an immutable value: every transition returns the next
//! state and leaves the receiver untouched. Persistence lives in
//! [`crate::store`], so everything here can be tested without a slot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{LineItem, ProductId};

/// Errors raised when building a cart from untrusted line items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The same product appears in more than one line item.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),

    /// A line item carries a quantity of zero.
    #[error("line item for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// The full set of line items at a point in time.
///
/// Items keep insertion order. Serializes as a bare JSON array of
/// `{"id": .., "quantity": ..}` objects; deserialization rejects duplicate ids
/// and zero quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

fn validate(items: &[LineItem]) -> Result<(), CartError> {
    for (i, item) in items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(CartError::ZeroQuantity(item.id));
        }
        if items.iter().skip(i + 1).any(|other| other.id == item.id) {
            return Err(CartError::DuplicateItem(item.id));
        }
    }
    Ok(())
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from line items, checking the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if two items share an id or any quantity is zero.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        validate(&items)?;
        Ok(Self { items })
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of `id` in the cart, or 0 if absent.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map_or(0, |item| item.quantity)
    }

    /// Sum of all quantities. Recomputed on every call.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add one unit of `id`, appending a new item if it isn't in the cart yet.
    ///
    /// An item already at `u32::MAX` is left unchanged, so `increase` followed
    /// by `decrease` restores the previous state only below that limit.
    #[must_use]
    pub fn increase(&self, id: ProductId) -> Self {
        match self.quantity(id) {
            0 => {
                let mut items = self.items.clone();
                items.push(LineItem::single(id));
                Self { items }
            }
            u32::MAX => self.clone(),
            _ => self.map_item(id, |item| LineItem {
                quantity: item.quantity + 1,
                ..item
            }),
        }
    }

    /// Take one unit of `id` away. An item at quantity 1 is removed.
    ///
    /// Absent ids leave the cart unchanged.
    #[must_use]
    pub fn decrease(&self, id: ProductId) -> Self {
        if self.quantity(id) == 1 {
            return self.remove(id);
        }

        self.map_item(id, |item| LineItem {
            quantity: item.quantity - 1,
            ..item
        })
    }

    /// Drop `id` from the cart regardless of its quantity.
    #[must_use]
    pub fn remove(&self, id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .copied()
                .collect(),
        }
    }

    fn map_item(&self, id: ProductId, f: impl Fn(LineItem) -> LineItem) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|&item| if item.id == id { f(item) } else { item })
                .collect(),
        }
    }
}

impl TryFrom<Vec<LineItem>> for CartState {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}
