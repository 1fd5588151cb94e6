// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait adapter: implements the core collaborator traits on top of the
//! SQLite query modules.
//!
//! One backend struct covers the ticket store, the identity registry, and
//! the referrer directory because all three live in the same database.

use async_trait::async_trait;
use tombola_core::{
    IdentityRecord, IdentityRegistry, NewTicket, ReferrerDirectory, Ticket, TicketStore,
    TombolaError,
};

use crate::database::Database;
use crate::queries::{electors, referrers, tickets};

/// SQLite-backed implementation of the storage-facing core traits.
#[derive(Clone)]
pub struct SqliteBackend {
    db: Database,
}

impl SqliteBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl TicketStore for SqliteBackend {
    async fn find_by_identity(
        &self,
        identity_number: &str,
    ) -> Result<Option<Ticket>, TombolaError> {
        tickets::find_by_identity(&self.db, identity_number).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Ticket>, TombolaError> {
        tickets::find_by_phone(&self.db, phone).await
    }

    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, TombolaError> {
        tickets::insert_ticket(&self.db, ticket).await
    }
}

#[async_trait]
impl IdentityRegistry for SqliteBackend {
    async fn verify(
        &self,
        identity_number: &str,
    ) -> Result<Option<IdentityRecord>, TombolaError> {
        electors::find_elector(&self.db, identity_number).await
    }
}

#[async_trait]
impl ReferrerDirectory for SqliteBackend {
    async fn exists(&self, referrer_id: i64) -> Result<bool, TombolaError> {
        referrers::referrer_exists(&self.db, referrer_id).await
    }

    async fn system_referrer_id(&self) -> Result<i64, TombolaError> {
        referrers::ensure_system_referrer(&self.db).await
    }
}
