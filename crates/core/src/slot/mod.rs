//! Durable key-value slots for cart persistence.
//!
//! A slot stores one string document per key, the way browser local storage
//! does. The cart store reads its slot once when it is created and writes back
//! after every mutation.
//!
//! # Implementations
//!
//! - [`MemorySlot`] - in-process map, for tests and embedding
//! - [`JsonFileSlot`] - one `<key>.json` file per key under a data directory

mod file;
mod memory;

pub use file::JsonFileSlot;
pub use memory::MemorySlot;

use thiserror::Error;

/// Errors that can occur while reading or writing a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key is empty or would escape the slot's namespace.
    #[error("Invalid slot key: {0}")]
    InvalidKey(String),
}

/// A named, durable storage slot for serialized state.
pub trait PersistentSlot {
    /// Read the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SlotError` if the backing storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SlotError` if the backing storage cannot be written.
    fn store(&mut self, key: &str, value: &str) -> Result<(), SlotError>;
}

impl<S: PersistentSlot + ?Sized> PersistentSlot for &mut S {
    fn load(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).load(key)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).store(key, value)
    }
}

/// Check that `key` is usable as a slot name.
///
/// Keys must be non-empty and must not contain path separators or `..`, so a
/// file-backed slot can never be pointed outside its directory.
///
/// # Errors
///
/// Returns `SlotError::InvalidKey` describing the problem.
pub fn validate_key(key: &str) -> Result<(), SlotError> {
    if key.trim().is_empty() {
        return Err(SlotError::InvalidKey("key is empty".to_string()));
    }
    if key.contains(['/', '\\', '\0']) || key.contains("..") {
        return Err(SlotError::InvalidKey(key.to_string()));
    }
    Ok(())
}
