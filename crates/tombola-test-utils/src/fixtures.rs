// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures: temp-dir SQLite databases and seed helpers.

use tempfile::TempDir;

use tombola_core::{Precinct, TombolaError};
use tombola_storage::queries::{electors, referrers};
use tombola_storage::Database;

/// Opens a fresh migrated database under a temp directory.
///
/// The returned `TempDir` must be kept alive for the duration of the test;
/// dropping it deletes the database files.
pub async fn open_temp_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("tombola-test.db");
    let db = Database::open(path.to_str().expect("utf-8 temp path"))
        .await
        .expect("open test database");
    (db, dir)
}

/// A precinct used across tests where the exact value is irrelevant.
pub fn sample_precinct() -> Precinct {
    Precinct {
        state: "Miranda".into(),
        municipality: "Sucre".into(),
        parish: "Petare".into(),
    }
}

/// Seeds one elector with a two-part name and the sample precinct.
pub async fn seed_elector(
    db: &Database,
    identity_number: &str,
    first_name: &str,
    surname: &str,
) -> Result<(), TombolaError> {
    electors::insert_elector(
        db,
        identity_number,
        [first_name, "", surname, ""],
        sample_precinct(),
    )
    .await
}

/// Seeds a named referrer and returns its id.
pub async fn seed_referrer(db: &Database, name: &str) -> Result<i64, TombolaError> {
    referrers::insert_referrer(db, name).await
}
