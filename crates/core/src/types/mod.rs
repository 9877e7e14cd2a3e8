//! Core types for the shopping cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;

pub use id::*;
pub use line_item::LineItem;
