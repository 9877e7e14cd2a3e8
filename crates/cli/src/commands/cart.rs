//! One-shot cart commands.
//!
//! # Usage
//!
//! ```bash
//! cart add 5
//! cart decrease 5
//! cart remove 5
//! cart qty 5
//! cart show --json
//! ```
//!
//! Each invocation is a fresh load, so the panel is always closed here; use
//! `cart shell` to work with visibility.

use std::io::Write;

use shopping_cart_core::{CartStore, PersistentSlot, ProductId};
use tracing::info;

use super::{CommandError, write_items};

/// Print the cart, either as text or as a JSON snapshot.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn show<S: PersistentSlot>(
    store: &CartStore<S>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if json {
        serde_json::to_writer(&mut *out, &store.snapshot())?;
        writeln!(out)?;
        return Ok(());
    }
    write_items(store, out)
}

/// Print the quantity of one product.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn quantity<S: PersistentSlot>(
    store: &CartStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    writeln!(out, "{}", store.get_quantity(id))?;
    Ok(())
}

/// Add one unit of a product and report the new quantity.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn add<S: PersistentSlot>(
    store: &mut CartStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    store.increase(id);
    info!(product = %id, quantity = store.get_quantity(id), "Added to cart");
    report(store, id, out)
}

/// Remove one unit of a product and report the new quantity.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn decrease<S: PersistentSlot>(
    store: &mut CartStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    store.decrease(id);
    info!(product = %id, quantity = store.get_quantity(id), "Decreased in cart");
    report(store, id, out)
}

/// Drop a product from the cart.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn remove<S: PersistentSlot>(
    store: &mut CartStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    store.remove(id);
    info!(product = %id, "Removed from cart");
    report(store, id, out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn clear<S: PersistentSlot>(
    store: &mut CartStore<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    store.clear();
    info!("Cart cleared");
    writeln!(out, "Cart is empty")?;
    Ok(())
}

fn report<S: PersistentSlot>(
    store: &CartStore<S>,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    writeln!(
        out,
        "#{id} x {} (cart total: {})",
        store.get_quantity(id),
        store.total_quantity()
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopping_cart_core::MemorySlot;

    use super::*;

    fn run(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_reports_quantity_and_total() {
        let mut store = CartStore::load(MemorySlot::new());
        let id = ProductId::new(5);
        run(|out| add(&mut store, id, out).unwrap());
        let output = run(|out| add(&mut store, id, out).unwrap());
        assert_eq!(output, "#5 x 2 (cart total: 2)\n");
    }

    #[test]
    fn test_decrease_absent_is_quiet_noop() {
        let mut store = CartStore::load(MemorySlot::new());
        let output = run(|out| decrease(&mut store, ProductId::new(99), out).unwrap());
        assert_eq!(output, "#99 x 0 (cart total: 0)\n");
        assert_eq!(store.slot().writes(), 0);
    }

    #[test]
    fn test_show_text() {
        let mut store = CartStore::load(MemorySlot::new());
        store.increase(ProductId::new(1));
        store.increase(ProductId::new(2));
        store.increase(ProductId::new(2));

        let output = run(|out| show(&store, false, out).unwrap());
        assert_eq!(output, "Cart (3 items)\n  #1 x 1\n  #2 x 2\n");
    }

    #[test]
    fn test_show_single_unit() {
        let mut store = CartStore::load(MemorySlot::new());
        store.increase(ProductId::new(1));

        let output = run(|out| show(&store, false, out).unwrap());
        assert_eq!(output, "Cart (1 item)\n  #1 x 1\n");
    }

    #[test]
    fn test_show_empty() {
        let store = CartStore::load(MemorySlot::new());
        let output = run(|out| show(&store, false, out).unwrap());
        assert_eq!(output, "Cart is empty\n");
    }

    #[test]
    fn test_show_json() {
        let mut store = CartStore::load(MemorySlot::new());
        store.increase(ProductId::new(3));

        let output = run(|out| show(&store, true, out).unwrap());
        assert_eq!(
            output,
            "{\"items\":[{\"id\":3,\"quantity\":1}],\"total_quantity\":1,\"is_open\":false}\n"
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = CartStore::load(MemorySlot::new());
        store.increase(ProductId::new(3));
        store.increase(ProductId::new(4));

        run(|out| remove(&mut store, ProductId::new(3), out).unwrap());
        assert_eq!(store.get_quantity(ProductId::new(3)), 0);

        let output = run(|out| clear(&mut store, out).unwrap());
        assert_eq!(output, "Cart is empty\n");
        assert!(store.items().is_empty());
    }
}
