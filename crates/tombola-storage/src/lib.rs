// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Tombola raffle bot.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed query modules for
//! tickets, the electoral roll, and the referrer directory. The uniqueness
//! constraints on `tickets.identity_number` and `tickets.phone` live in the
//! schema itself, so they hold across processes, not just within one.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteBackend;
pub use database::Database;
