// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket CRUD operations.

use chrono::{DateTime, Utc};
use rusqlite::params;
use tombola_core::{NewTicket, Precinct, Ticket, TombolaError};

use crate::database::{map_tr_err, Database};

const TICKET_COLUMNS: &str = "id, ticket_number, identity_number, full_name, phone, \
     precinct_state, precinct_municipality, precinct_parish, referrer_id, \
     qr_payload, validated, is_winner, created_at, updated_at";

/// Insert a new ticket and return the stored row.
///
/// A uniqueness conflict on `identity_number`, `phone`, or `ticket_number`
/// surfaces as [`TombolaError::UniqueViolation`] via `map_tr_err`.
pub async fn insert_ticket(db: &Database, ticket: NewTicket) -> Result<Ticket, TombolaError> {
    let now = Utc::now();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tickets (ticket_number, identity_number, full_name, phone, \
                 precinct_state, precinct_municipality, precinct_parish, referrer_id, \
                 qr_payload, validated, is_winner, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, 0, ?10, ?10)",
                params![
                    ticket.ticket_number,
                    ticket.identity_number,
                    ticket.full_name,
                    ticket.phone,
                    ticket.precinct.state,
                    ticket.precinct.municipality,
                    ticket.precinct.parish,
                    ticket.referrer_id,
                    ticket.qr_payload,
                    now.to_rfc3339(),
                ],
            )?;
            let id = conn.last_insert_rowid();
            let mut stmt = conn.prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"
            ))?;
            let row = stmt.query_row(params![id], map_ticket_row)?;
            Ok(row)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a ticket by identity number.
pub async fn find_by_identity(
    db: &Database,
    identity_number: &str,
) -> Result<Option<Ticket>, TombolaError> {
    find_by_column(db, "identity_number", identity_number.to_string()).await
}

/// Get a ticket by canonical phone number.
pub async fn find_by_phone(db: &Database, phone: &str) -> Result<Option<Ticket>, TombolaError> {
    find_by_column(db, "phone", phone.to_string()).await
}

/// Total ticket count, used by tests asserting no duplicate rows.
pub async fn count_tickets(db: &Database) -> Result<i64, TombolaError> {
    db.connection()
        .call(|conn| {
            let count =
                conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

async fn find_by_column(
    db: &Database,
    column: &'static str,
    value: String,
) -> Result<Option<Ticket>, TombolaError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets WHERE {column} = ?1"
            ))?;
            let result = stmt.query_row(params![value], map_ticket_row);
            match result {
                Ok(ticket) => Ok(Some(ticket)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

fn map_ticket_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        ticket_number: row.get(1)?,
        identity_number: row.get(2)?,
        full_name: row.get(3)?,
        phone: row.get(4)?,
        precinct: Precinct {
            state: row.get(5)?,
            municipality: row.get(6)?,
            parish: row.get(7)?,
        },
        referrer_id: row.get(8)?,
        qr_payload: row.get(9)?,
        validated: row.get(10)?,
        is_winner: row.get(11)?,
        created_at: parse_timestamp(row, 12)?,
        updated_at: parse_timestamp(row, 13)?,
    })
}

fn parse_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
