use crate::error::{AgroCastError, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// SQLite settings store. Migrations run before the connection is shared.
pub struct Database {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?, path.to_path_buf())
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, PathBuf::from(":memory:"))
    }

    fn from_connection(mut conn: Connection, path: PathBuf) -> Result<Self> {
        super::migrations::run(&mut conn)?;
        tracing::debug!(path = %path.display(), "Settings database ready");

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| AgroCastError::InvalidData("database lock poisoned".into()))?;
        f(&conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
