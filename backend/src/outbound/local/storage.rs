//! Pluggable persistence for the local cart adapter.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::{fs, io};

use crate::domain::cart::CartItem;

/// Persistence failures surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("cart storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cart storage serialisation failed: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Persistence backend for the local cart.
///
/// Operations are synchronous; the adapter wraps them in short critical
/// sections, and the payload is a handful of cart lines at most.
pub trait CartStorage: Send + Sync {
    /// Load the persisted line list. An absent store yields an empty cart.
    fn load(&self) -> Result<Vec<CartItem>, StorageError>;

    /// Persist the full line list, replacing any previous content.
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError>;
}

/// Process-lifetime storage; the cart vanishes on restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<Vec<CartItem>>,
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        *self.items.lock().unwrap_or_else(PoisonError::into_inner) = items.to_vec();
        Ok(())
    }
}

/// Storage backed by a JSON file, so a local cart survives restarts.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };
        match serde_json::from_slice(&raw) {
            Ok(items) => Ok(items),
            Err(error) => {
                // A corrupt store must not brick the cart; start afresh.
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "cart storage file is unreadable; starting with an empty cart"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let encoded = serde_json::to_vec_pretty(items)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}
