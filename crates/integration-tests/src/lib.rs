//! Integration tests for the shopping cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopping-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `reload` - Cart survives a reload through a real file slot
//! - `shell` - Scripted shell sessions against a file slot

use std::path::Path;

use shopping_cart_core::{CartStore, JsonFileSlot};

/// Open the cart persisted under `dir`, as a fresh page load would.
#[must_use]
pub fn load_cart(dir: &Path) -> CartStore<JsonFileSlot> {
    CartStore::load(JsonFileSlot::new(dir))
}
