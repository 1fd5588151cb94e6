// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Electoral roll lookups.
//!
//! The roll is loaded in bulk outside this service; the core only ever
//! reads it, plus one insert helper used by tests and seeding tools.

use rusqlite::params;
use tombola_core::{IdentityRecord, Precinct, TombolaError};

use crate::database::{map_tr_err, Database};

/// Look up an identity number in the electoral roll.
pub async fn find_elector(
    db: &Database,
    identity_number: &str,
) -> Result<Option<IdentityRecord>, TombolaError> {
    let identity_number = identity_number.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT identity_number, first_name, middle_name, first_surname, \
                 second_surname, precinct_state, precinct_municipality, precinct_parish \
                 FROM electors WHERE identity_number = ?1",
            )?;
            let result = stmt.query_row(params![identity_number], |row| {
                let name_parts: [String; 4] =
                    [row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?];
                Ok(IdentityRecord {
                    identity_number: row.get(0)?,
                    full_name: join_name_parts(&name_parts),
                    precinct: Precinct {
                        state: row.get(5)?,
                        municipality: row.get(6)?,
                        parish: row.get(7)?,
                    },
                })
            });
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert an elector row. Seeding/test helper, never called by the flow.
pub async fn insert_elector(
    db: &Database,
    identity_number: &str,
    name_parts: [&str; 4],
    precinct: Precinct,
) -> Result<(), TombolaError> {
    let identity_number = identity_number.to_string();
    let name_parts: Vec<String> = name_parts.iter().map(|s| s.to_string()).collect();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO electors (identity_number, first_name, middle_name, \
                 first_surname, second_surname, precinct_state, precinct_municipality, \
                 precinct_parish) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    identity_number,
                    name_parts[0],
                    name_parts[1],
                    name_parts[2],
                    name_parts[3],
                    precinct.state,
                    precinct.municipality,
                    precinct.parish,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Joins the stored name parts, skipping empty middle names and surnames.
fn join_name_parts(parts: &[String; 4]) -> String {
    parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
