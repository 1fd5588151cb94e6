// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tombola raffle-registration bot.
//!
//! This crate provides the foundational trait definitions, error type, and
//! domain types used throughout the Tombola workspace. Concrete adapters
//! (SQLite storage, messaging gateways, the in-memory session store)
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TombolaError;
pub use traits::{
    Clock, IdentityRegistry, MessagingGateway, ReferrerDirectory, SessionStore,
    SystemClock, TicketStore,
};
pub use types::{
    IdentityRecord, InboundMessage, NewTicket, Precinct, Session, SessionFields,
    SessionState, Ticket,
};
