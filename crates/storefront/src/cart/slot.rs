//! Durable slots holding the serialized cart.
//!
//! A slot is a single key-value entry: it is read once at startup and
//! overwritten on every cart mutation. No versioning or migration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors reading or writing a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single durable key-value entry for the serialized cart.
pub trait CartSlot: Send + Sync {
    /// Read the stored contents; `None` if nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Replace the stored contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents cannot be stored.
    fn write(&self, contents: &str) -> Result<(), SlotError>;
}

/// A JSON file on disk.
///
/// Writes go to a sibling temp file that is renamed over the slot, so a
/// crash mid-write leaves the previous cart intact.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot backed by `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CartSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// An in-memory slot.
///
/// Clones share the same storage, so a clone handed to a second
/// `CartStore::load` behaves like the same slot after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `contents`.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Current raw contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), SlotError> {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(contents.to_owned());
        Ok(())
    }
}
