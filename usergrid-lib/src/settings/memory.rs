//! In-memory settings backend.

use async_trait::async_trait;
use dashmap::DashMap;

use super::SettingsBackend;
use crate::error::SettingsError;

/// Settings storage that lives as long as the process.
///
/// Useful for tests and for front ends that do not persist anything.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
