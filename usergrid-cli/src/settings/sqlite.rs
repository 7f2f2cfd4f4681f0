//! SQLite settings store.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::OptionalExtension;
use usergrid_lib::error::SettingsError;
use usergrid_lib::settings::SettingsBackend;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS grid_settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

/// Settings kept in a single SQLite table.
///
/// Width changes arrive on every drag step, so the last value stored under
/// each key is remembered and unchanged writes never reach the database.
pub struct SqliteBackend {
    client: Client,
    stored: DashMap<String, String>,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path`.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = ClientBuilder::new()
            .path(path)
            .open()
            .await
            .map_err(SettingsError::backend)?;
        client
            .conn(|conn| conn.execute_batch(SCHEMA))
            .await
            .map_err(SettingsError::backend)?;

        Ok(Self {
            client,
            stored: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let key = key.to_string();
        let value = self
            .client
            .conn({
                let key = key.clone();
                move |conn| {
                    conn.query_row(
                        "SELECT value FROM grid_settings WHERE key = ?1",
                        [&key],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()
                }
            })
            .await
            .map_err(SettingsError::backend)?;

        if let Some(value) = &value {
            self.stored.insert(key, value.clone());
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), SettingsError> {
        if self.stored.get(key).is_some_and(|stored| *stored == value) {
            return Ok(());
        }

        let (k, v) = (key.to_string(), value.clone());
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO grid_settings (key, value) VALUES (?1, ?2)",
                    [&k, &v],
                )
            })
            .await
            .map_err(SettingsError::backend)?;

        log::trace!("Stored setting {}", key);
        self.stored.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use usergrid_lib::settings::SettingsProvider;

    use super::*;

    #[tokio::test]
    async fn test_reads_from_database() {
        let backend = SqliteBackend::new(":memory:").await.unwrap();
        backend
            .set_raw("grid.column_widths", r#"{"email":250}"#.to_string())
            .await
            .unwrap();
        backend.stored.clear();

        assert_eq!(
            backend.get_raw("grid.column_widths").await.unwrap().as_deref(),
            Some(r#"{"email":250}"#)
        );
        assert_eq!(backend.get_raw("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_widths_overwrite() {
        let settings = SettingsProvider::new(SqliteBackend::new(":memory:").await.unwrap());
        settings
            .set("grid.column_widths", &BTreeMap::from([("age", 80u32)]))
            .await
            .unwrap();
        settings
            .set("grid.column_widths", &BTreeMap::from([("age", 120u32)]))
            .await
            .unwrap();

        let widths: Option<BTreeMap<String, u32>> =
            settings.get("grid.column_widths").await.unwrap();
        assert_eq!(widths, Some(BTreeMap::from([("age".to_string(), 120)])));
    }

    #[tokio::test]
    async fn test_unchanged_value_skips_write() {
        let backend = SqliteBackend::new(":memory:").await.unwrap();
        backend.set_raw("k", "1".to_string()).await.unwrap();

        // change the row behind the backend's back
        backend
            .client
            .conn(|conn| conn.execute("UPDATE grid_settings SET value = '2' WHERE key = 'k'", []))
            .await
            .unwrap();

        backend.set_raw("k", "1".to_string()).await.unwrap();
        backend.stored.clear();
        assert_eq!(backend.get_raw("k").await.unwrap().as_deref(), Some("2"));
    }
}
