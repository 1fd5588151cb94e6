// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use tombola_core::TombolaError;
use tracing::info;

use crate::migrations;

/// Handle to the SQLite database.
///
/// Cloning is cheap and shares the same background connection thread; the
/// `Database` is the single writer.
#[derive(Clone, Debug)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, applies PRAGMAs, and runs
    /// all pending migrations.
    ///
    /// Failure here is fatal to the whole service; nothing else in the core
    /// terminates the process.
    pub async fn open(path: &str) -> Result<Self, TombolaError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| TombolaError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            migrations::run_migrations(conn)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        info!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Closes the connection, flushing pending writes.
    pub async fn close(&self) -> Result<(), TombolaError> {
        self.conn.clone().close().await.map_err(map_tr_err)
    }
}

/// Maps a tokio-rusqlite error into the core error type.
///
/// SQLite uniqueness violations become [`TombolaError::UniqueViolation`] so
/// the ticket issuance engine can distinguish a concurrent-insert race from
/// a genuine storage failure.
pub fn map_tr_err(err: tokio_rusqlite::Error<rusqlite::Error>) -> TombolaError {
    if let tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(ffi_err, ref msg)) = err {
        if ffi_err.code == rusqlite::ErrorCode::ConstraintViolation {
            let constraint = msg
                .clone()
                .unwrap_or_else(|| "unnamed constraint".to_string());
            return TombolaError::UniqueViolation { constraint };
        }
    }
    TombolaError::Storage {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_maps_to_unique_violation() {
        let ffi_err = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT);
        let err = tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(
            ffi_err,
            Some("UNIQUE constraint failed: tickets.phone".to_string()),
        ));
        assert!(matches!(
            map_tr_err(err),
            TombolaError::UniqueViolation { ref constraint }
                if constraint.contains("tickets.phone")
        ));
    }

    #[test]
    fn other_sqlite_failures_map_to_storage() {
        let ffi_err = rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY);
        let err = tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(ffi_err, None));
        assert!(matches!(map_tr_err(err), TombolaError::Storage { .. }));
    }

    #[tokio::test]
    async fn open_failure_maps_to_storage_error() {
        let err = Database::open("/nonexistent-dir/tombola.db")
            .await
            .unwrap_err();
        assert!(matches!(err, TombolaError::Storage { .. }));
    }
}
