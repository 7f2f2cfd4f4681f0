//! Settings system for typed key-value storage.
//!
//! Values are stored as JSON strings. The grid uses it for column widths only.

mod backend;
mod memory;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SettingsError;

/// Typed settings provider.
///
/// Wraps a [`SettingsBackend`] with typed serialization via `serde_json`.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    /// Create a new settings provider with the given backend.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a provider sharing an existing backend.
    pub fn from_arc(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    /// Get a typed value for a key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value for a key.
    pub async fn set<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_raw(key, raw).await
    }
}
