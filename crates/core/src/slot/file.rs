//! File-backed slot: one JSON document per key in a data directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::{PersistentSlot, SlotError, validate_key};

/// Slot that keeps each key in `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary file in the same directory, which is
/// synced and then renamed over the target. Readers never see a half-written
/// document, and a failed write removes its temporary file.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    dir: PathBuf,
}

impl JsonFileSlot {
    /// Create a slot rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `SlotError::InvalidKey` if `key` is not a valid slot name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistentSlot for JsonFileSlot {
    fn load(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        // On failure the temp file is dropped with the error, which deletes it
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = JsonFileSlot::new(dir.path());
        assert!(slot.load("shopping-cart").unwrap().is_none());
    }

    #[test]
    fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = JsonFileSlot::new(dir.path().join("nested"));
        slot.store("shopping-cart", "[]").unwrap();

        assert_eq!(slot.load("shopping-cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(entries(&dir.path().join("nested")), vec!["shopping-cart.json"]);
    }

    #[test]
    fn test_failed_store_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in the target's place makes the final rename fail
        let blocker = dir.path().join("shopping-cart.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let mut slot = JsonFileSlot::new(dir.path());
        assert!(matches!(
            slot.store("shopping-cart", "[]"),
            Err(SlotError::Io(_))
        ));
        assert_eq!(entries(dir.path()), vec!["shopping-cart.json"]);
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("shopping-cart.json")).unwrap();

        let slot = JsonFileSlot::new(dir.path());
        assert!(matches!(slot.load("shopping-cart"), Err(SlotError::Io(_))));
    }

    #[test]
    fn test_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = JsonFileSlot::new(dir.path());
        slot.store("k", "first").unwrap();
        slot.store("k", "second").unwrap();
        assert_eq!(slot.load("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = JsonFileSlot::new(dir.path());
        assert!(matches!(
            slot.store("../escape", "[]"),
            Err(SlotError::InvalidKey(_))
        ));
        assert!(matches!(slot.load("a/b"), Err(SlotError::InvalidKey(_))));
    }
}
