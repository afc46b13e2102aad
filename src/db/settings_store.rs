use crate::db::Database;
use crate::error::Result;
use rusqlite::{params, OptionalExtension};

/// Key/value persistence for user preferences
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl SettingsStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO settings (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }
}

#[cfg(test)]
pub use memory::MemorySettingsStore;

#[cfg(test)]
mod memory {
    use super::SettingsStore;
    use crate::error::{AgroCastError, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-process store with no persistence
    #[derive(Debug, Default)]
    pub struct MemorySettingsStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl SettingsStore for MemorySettingsStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            let values = self
                .values
                .lock()
                .map_err(|_| AgroCastError::InvalidData("settings lock poisoned".into()))?;
            Ok(values.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let mut values = self
                .values
                .lock()
                .map_err(|_| AgroCastError::InvalidData("settings lock poisoned".into()))?;
            values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_get_missing_key() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("theme").unwrap(), None);
    }

    #[test]
    fn database_set_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set("theme", "light").unwrap();
        db.set("theme", "dark").unwrap();
        assert_eq!(db.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn database_persists_across_reopen() {
        let dir = std::env::temp_dir().join(format!("agrocast-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("agrocast.db");
        let _ = std::fs::remove_file(&path);

        Database::open(&path).unwrap().set("role", "investor").unwrap();
        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.get("role").unwrap().as_deref(), Some("investor"));
        assert_eq!(reopened.path(), path.as_path());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySettingsStore::default();
        assert_eq!(store.get("role").unwrap(), None);
        store.set("role", "buyer").unwrap();
        assert_eq!(store.get("role").unwrap().as_deref(), Some("buyer"));
    }
}
