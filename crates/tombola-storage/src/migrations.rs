// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table. Returning `rusqlite::Error` lets callers inside `conn.call`
/// closures propagate failures with `?`; the conversion-failure variant is
/// the one that carries an arbitrary boxed source.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    Ok(())
}
