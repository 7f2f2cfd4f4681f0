//! Grid transition errors

/// A transition the grid refused because its input is outside the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The page size is not one of the configured choices.
    #[error("page size {0} is not one of the allowed page sizes")]
    InvalidPageSize(usize),

    /// No column is declared under this key.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}
