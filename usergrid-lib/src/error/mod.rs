//! Error types

mod api;
mod grid;
mod settings;

pub use api::*;
pub use grid::*;
pub use settings::*;

/// Top-level error for the user grid library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote endpoint failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persistence failure.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Invalid grid transition.
    #[error(transparent)]
    Grid(#[from] GridError),
}
