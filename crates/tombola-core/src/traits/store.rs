// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket store and referrer directory traits.

use async_trait::async_trait;

use crate::error::TombolaError;
use crate::types::{NewTicket, Ticket};

/// Persistence for issued tickets.
///
/// Uniqueness of `identity_number` and `phone` MUST be enforced at the
/// storage layer, not only in application code: the constraints are the
/// final arbiter under concurrent registration attempts.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn find_by_identity(
        &self,
        identity_number: &str,
    ) -> Result<Option<Ticket>, TombolaError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Ticket>, TombolaError>;

    /// Inserts a new ticket and returns the stored row.
    ///
    /// A uniqueness conflict surfaces as [`TombolaError::UniqueViolation`]
    /// so the issuance engine can re-check instead of failing.
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TombolaError>;
}

/// Directory of referring agents ("recolectores").
#[async_trait]
pub trait ReferrerDirectory: Send + Sync {
    /// Whether a referrer with this id exists.
    async fn exists(&self, referrer_id: i64) -> Result<bool, TombolaError>;

    /// Id of the well-known "system" referrer, created on first use.
    ///
    /// Registrations that arrive without an explicit referrer are credited
    /// to this placeholder.
    async fn system_referrer_id(&self) -> Result<i64, TombolaError>;
}
