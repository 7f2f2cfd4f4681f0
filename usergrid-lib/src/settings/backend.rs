//! Settings backend trait.

use async_trait::async_trait;

use crate::error::SettingsError;

/// Backend trait for settings storage.
///
/// Implementations store raw JSON strings. The
/// [`SettingsProvider`](super::SettingsProvider) wraps this with typed
/// serialization.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Get the raw value for a key.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Set the raw value for a key.
    async fn set_raw(&self, key: &str, value: String) -> Result<(), SettingsError>;
}
