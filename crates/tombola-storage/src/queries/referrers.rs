// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Referrer directory operations.

use rusqlite::params;
use tombola_core::TombolaError;

use crate::database::{map_tr_err, Database};

/// Name of the placeholder referrer credited when none is supplied.
pub const SYSTEM_REFERRER_NAME: &str = "system";

/// Whether a referrer with this id exists.
pub async fn referrer_exists(db: &Database, referrer_id: i64) -> Result<bool, TombolaError> {
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM referrers WHERE id = ?1",
                params![referrer_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a referrer by name, returning its id.
pub async fn insert_referrer(db: &Database, name: &str) -> Result<i64, TombolaError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("INSERT INTO referrers (name) VALUES (?1)", params![name])?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Id of the well-known "system" referrer, creating the row on first use.
pub async fn ensure_system_referrer(db: &Database) -> Result<i64, TombolaError> {
    db.connection()
        .call(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO referrers (name) VALUES (?1)",
                params![SYSTEM_REFERRER_NAME],
            )?;
            let id = conn.query_row(
                "SELECT id FROM referrers WHERE name = ?1",
                params![SYSTEM_REFERRER_NAME],
                |row| row.get(0),
            )?;
            Ok(id)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn ensure_system_referrer_is_idempotent() {
        let (db, _dir) = setup_db().await;
        let first = ensure_system_referrer(&db).await.unwrap();
        let second = ensure_system_referrer(&db).await.unwrap();
        assert_eq!(first, second);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn exists_tracks_inserts() {
        let (db, _dir) = setup_db().await;
        assert!(!referrer_exists(&db, 42).await.unwrap());
        let id = insert_referrer(&db, "promoter-1").await.unwrap();
        assert!(referrer_exists(&db, id).await.unwrap());
        db.close().await.unwrap();
    }
}
