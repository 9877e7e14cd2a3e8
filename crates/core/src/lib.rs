//! Shopping Cart Core - cart state, transitions, and persistence.
//!
//! This crate provides the client-side cart used by the storefront views:
//! - which products are in the cart and in what quantity
//! - the derived total quantity
//! - whether the cart panel is open
//!
//! # Architecture
//!
//! State transitions are pure functions on [`CartState`]. [`CartStore`] wraps
//! the current state, applies a transition, and writes the result to an
//! injected [`PersistentSlot`]. Nothing in this crate is global; the view layer
//! owns a `CartStore` and passes it where it is needed.
//!
//! # Modules
//!
//! - [`types`] - Newtype product IDs and line items
//! - [`cart`] - Immutable cart state and its transitions
//! - [`slot`] - Durable key-value slots (in-memory and JSON file)
//! - [`store`] - The cart store that ties state and slot together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod slot;
pub mod store;
pub mod types;

pub use cart::{CartError, CartState};
pub use slot::{JsonFileSlot, MemorySlot, PersistentSlot, SlotError};
pub use store::{CART_STORAGE_KEY, CartSnapshot, CartStore};
pub use types::*;
