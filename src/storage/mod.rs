//! Storage
//!
//! A synchronous string-keyed store the cart snapshots itself into.

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the store cannot represent.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Durable string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait CartStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the value could not be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keys map onto file names, so keep them to a conservative alphabet.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
