//! Durable key-value storage behind the session controller.
//!
//! DESIGN
//! ======
//! `SessionStore` mirrors the device storage API the mobile shell talks to:
//! async get/set/delete by string key, one string value per key. Backends
//! make no cross-key atomicity promise; ordering is imposed by the caller
//! awaiting each call in turn.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Async key-value persistence. Enables swapping device storage for test doubles.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the value was not persisted.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the removal was not persisted.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
