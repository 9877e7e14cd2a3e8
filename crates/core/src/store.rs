//! Cart store: the current cart plus panel visibility, backed by a slot.
//!
//! Mutations run as a two-step pipeline: compute the next [`CartState`] with a
//! pure transition, then hand it to the [`PersistentSlot`]. The store is
//! passed explicitly to whatever needs it; there is no global instance.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cart::CartState;
use crate::slot::PersistentSlot;
use crate::types::{LineItem, ProductId};

/// Slot key the cart is stored under unless another is given.
pub const CART_STORAGE_KEY: &str = "shopping-cart";

/// Read-only view of the cart for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Sum of all quantities.
    pub total_quantity: u64,
    /// Whether the cart panel is open.
    pub is_open: bool,
}

/// Shopping cart state with durable line items and a transient open flag.
#[derive(Debug)]
pub struct CartStore<S: PersistentSlot> {
    state: CartState,
    is_open: bool,
    slot: S,
    key: String,
}

impl<S: PersistentSlot> CartStore<S> {
    /// Load the cart from `slot` under [`CART_STORAGE_KEY`].
    ///
    /// A missing, unreadable, or malformed document yields an empty cart.
    pub fn load(slot: S) -> Self {
        Self::load_with_key(slot, CART_STORAGE_KEY)
    }

    /// Load the cart from `slot` under a custom key.
    pub fn load_with_key(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = read_state(&slot, &key);
        debug!(key = %key, items = state.len(), "Cart loaded");

        Self {
            state,
            is_open: false,
            slot,
            key,
        }
    }

    /// Quantity of `id` in the cart, or 0 if absent.
    #[must_use]
    pub fn get_quantity(&self, id: ProductId) -> u32 {
        self.state.quantity(id)
    }

    /// Add one unit of `id`.
    pub fn increase(&mut self, id: ProductId) {
        let next = self.state.increase(id);
        self.commit(next);
    }

    /// Remove one unit of `id`, dropping the item when it reaches zero.
    pub fn decrease(&mut self, id: ProductId) {
        let next = self.state.decrease(id);
        self.commit(next);
    }

    /// Drop `id` from the cart entirely.
    pub fn remove(&mut self, id: ProductId) {
        let next = self.state.remove(id);
        self.commit(next);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.commit(CartState::new());
    }

    /// Open the cart panel.
    pub const fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the cart panel.
    pub const fn close(&mut self) {
        self.is_open = false;
    }

    /// Whether the cart panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Sum of all quantities, recomputed on every call.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Everything a view needs to render the cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.state.items().to_vec(),
            total_quantity: self.state.total_quantity(),
            is_open: self.is_open,
        }
    }

    /// Key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing slot.
    #[must_use]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    /// Consume the store and return its slot.
    #[must_use]
    pub fn into_slot(self) -> S {
        self.slot
    }

    fn commit(&mut self, next: CartState) {
        if next == self.state {
            return;
        }
        self.state = next;
        debug!(
            items = self.state.len(),
            total = self.state.total_quantity(),
            "Cart updated"
        );
        self.persist();
    }

    /// Write the current state to the slot. Failures are logged, not returned.
    fn persist(&mut self) {
        let document = match serde_json::to_string(&self.state) {
            Ok(document) => document,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.slot.store(&self.key, &document) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

fn read_state<S: PersistentSlot>(slot: &S, key: &str) -> CartState {
    let document = match slot.load(key) {
        Ok(Some(document)) => document,
        Ok(None) => return CartState::new(),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read cart slot, starting empty");
            return CartState::new();
        }
    };

    serde_json::from_str(&document).unwrap_or_else(|e| {
        warn!(key = %key, error = %e, "Discarding malformed cart document");
        CartState::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::slot::{JsonFileSlot, MemorySlot, SlotError};

    fn pid(id: u32) -> ProductId {
        ProductId::new(id)
    }

    fn empty_store() -> CartStore<MemorySlot> {
        CartStore::load(MemorySlot::new())
    }

    /// Slot whose every operation fails.
    struct BrokenSlot;

    impl PersistentSlot for BrokenSlot {
        fn load(&self, _key: &str) -> Result<Option<String>, SlotError> {
            Err(SlotError::InvalidKey("broken".to_string()))
        }

        fn store(&mut self, _key: &str, _value: &str) -> Result<(), SlotError> {
            Err(SlotError::InvalidKey("broken".to_string()))
        }
    }

    #[test]
    fn test_increase_on_empty_cart() {
        let mut store = empty_store();
        store.increase(pid(5));

        assert_eq!(store.items(), &[LineItem::new(pid(5), 1)]);
        assert_eq!(store.total_quantity(), 1);
    }

    #[test]
    fn test_decrease_last_unit_empties_cart() {
        let mut store = CartStore::load(MemorySlot::with_value(
            CART_STORAGE_KEY,
            r#"[{"id":5,"quantity":1}]"#,
        ));
        store.decrease(pid(5));

        assert!(store.items().is_empty());
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn test_remove_drops_all_units() {
        let mut store = CartStore::load(MemorySlot::with_value(
            CART_STORAGE_KEY,
            r#"[{"id":5,"quantity":3}]"#,
        ));
        store.remove(pid(5));
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_get_quantity_absent_is_zero() {
        assert_eq!(empty_store().get_quantity(pid(42)), 0);
    }

    #[test]
    fn test_noop_mutations_do_not_write() {
        let mut store = empty_store();
        store.increase(pid(1));
        store.decrease(pid(99));
        store.remove(pid(99));

        assert_eq!(store.items(), &[LineItem::new(pid(1), 1)]);
        assert_eq!(store.slot().writes(), 1);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = empty_store();
        store.increase(pid(3));
        store.increase(pid(3));
        store.increase(pid(8));
        store.decrease(pid(3));

        let slot = store.into_slot();
        assert_eq!(slot.writes(), 4);
        assert_eq!(
            slot.get(CART_STORAGE_KEY),
            Some(r#"[{"id":3,"quantity":1},{"id":8,"quantity":1}]"#)
        );
    }

    #[test]
    fn test_visibility_is_not_persisted() {
        let mut store = empty_store();
        store.open();
        assert!(store.is_open());
        assert_eq!(store.slot().writes(), 0);

        store.close();
        assert!(!store.is_open());
    }

    #[test]
    fn test_reload_restores_items_and_closes_panel() {
        let mut slot = MemorySlot::new();
        {
            let mut store = CartStore::load(&mut slot);
            store.increase(pid(2));
            store.increase(pid(7));
            store.increase(pid(7));
            store.open();
        }

        let reloaded = CartStore::load(&mut slot);
        assert_eq!(
            reloaded.items(),
            &[LineItem::new(pid(2), 1), LineItem::new(pid(7), 2)]
        );
        assert!(!reloaded.is_open());
    }

    #[test]
    fn test_malformed_documents_load_empty() {
        for document in [
            "not json",
            "{}",
            r#"[{"id":-1,"quantity":1}]"#,
            r#"[{"id":1,"quantity":0}]"#,
            r#"[{"id":1,"quantity":1},{"id":1,"quantity":2}]"#,
        ] {
            let store = CartStore::load(MemorySlot::with_value(CART_STORAGE_KEY, document));
            assert!(store.items().is_empty(), "document: {document}");
        }
    }

    #[test]
    fn test_custom_key() {
        let slot = MemorySlot::with_value("other-cart", r#"[{"id":4,"quantity":2}]"#);
        let store = CartStore::load_with_key(slot, "other-cart");
        assert_eq!(store.key(), "other-cart");
        assert_eq!(store.get_quantity(pid(4)), 2);
    }

    #[test]
    fn test_broken_slot_is_fail_soft() {
        let mut store = CartStore::load(BrokenSlot);
        assert!(store.items().is_empty());

        store.increase(pid(1));
        assert_eq!(store.get_quantity(pid(1)), 1);
    }

    #[test]
    fn test_unreadable_file_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("shopping-cart.json")).unwrap();

        let store = CartStore::load(JsonFileSlot::new(dir.path()));
        assert!(store.items().is_empty());
        assert!(!store.is_open());
    }

    #[test]
    fn test_failed_file_write_keeps_new_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("shopping-cart.json");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let mut store = CartStore::load(JsonFileSlot::new(dir.path()));
        store.increase(pid(6));
        store.increase(pid(6));

        assert_eq!(store.get_quantity(pid(6)), 2);
        assert_eq!(store.total_quantity(), 2);
        assert!(blocker.is_dir());
    }

    #[test]
    fn test_increase_at_max_does_not_write() {
        let document = format!(r#"[{{"id":1,"quantity":{}}}]"#, u32::MAX);
        let mut store = CartStore::load(MemorySlot::with_value(CART_STORAGE_KEY, document));
        store.increase(pid(1));

        assert_eq!(store.get_quantity(pid(1)), u32::MAX);
        assert_eq!(store.slot().writes(), 0);
    }

    #[test]
    fn test_clear() {
        let mut store = empty_store();
        store.increase(pid(1));
        store.increase(pid(2));
        store.clear();

        assert!(store.items().is_empty());
        assert_eq!(store.slot().get(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_snapshot() {
        let mut store = empty_store();
        store.increase(pid(5));
        store.increase(pid(5));
        store.open();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items, vec![LineItem::new(pid(5), 2)]);
        assert_eq!(snapshot.total_quantity, 2);
        assert!(snapshot.is_open);
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"items":[{"id":5,"quantity":2}],"total_quantity":2,"is_open":true}"#
        );
    }
}
