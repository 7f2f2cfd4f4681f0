//! Settings error types

/// Errors raised by a settings backend or by value (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The storage backend failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// A value could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SettingsError {
    /// Wraps any backend failure.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
