//! Settings storage for the terminal front end.

mod sqlite;

pub use sqlite::SqliteBackend;

use usergrid_lib::error::SettingsError;
use usergrid_lib::settings::SettingsProvider;

use crate::paths;

/// Opens the settings database in the platform data directory.
pub async fn open() -> Result<SettingsProvider, SettingsError> {
    let path = paths::settings_db()
        .ok_or_else(|| SettingsError::backend("no home directory to store settings in"))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(SettingsError::backend)?;
    }
    log::debug!("Opening settings at {}", path.display());
    Ok(SettingsProvider::new(SqliteBackend::new(path).await?))
}
