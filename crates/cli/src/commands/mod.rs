//! Cart commands.
//!
//! - [`cart`] - One-shot commands run from the command line
//! - [`shell`] - Interactive event loop over stdin

pub mod cart;
pub mod shell;

use std::io::Write;

use shopping_cart_core::{CartStore, PersistentSlot};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing output or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Shell input named a command that doesn't exist.
    #[error("Unknown command: {0} (type `help` for a list)")]
    UnknownCommand(String),

    /// Shell command had a missing or unparseable argument.
    #[error("Invalid argument for `{command}`: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },
}

/// Write the item list and total.
pub(crate) fn write_items<S: PersistentSlot>(
    store: &CartStore<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    if store.items().is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    writeln!(out, "Cart ({})", units(store.total_quantity()))?;
    for item in store.items() {
        writeln!(out, "  #{} x {}", item.id, item.quantity)?;
    }
    Ok(())
}

/// "1 item", "3 items".
pub(crate) fn units(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
