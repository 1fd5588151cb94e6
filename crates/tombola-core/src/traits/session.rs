// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait: per-user conversation state with atomic per-key
//! read-modify-write semantics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::TombolaError;
use crate::types::Session;

/// Per-user key-value state backing the conversation state machine.
///
/// The state machine and the inactivity monitor are the only writers, and
/// they race: a message can arrive just as the monitor decides to expire the
/// session. Implementations must make each method atomic per `user_id`, and
/// the conditional operations below exist so a live session mutation always
/// wins over a concurrent expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<Session>, TombolaError>;

    /// Writes the canonical session value, replacing any previous one.
    async fn put(&self, session: Session) -> Result<(), TombolaError>;

    /// Removes the session unconditionally. Returns whether it existed.
    async fn delete(&self, user_id: &str) -> Result<bool, TombolaError>;

    /// Removes the session only if its last activity is at or before
    /// `idle_since`. Returns whether it was removed.
    ///
    /// The monitor uses this instead of [`SessionStore::delete`] so a
    /// session refreshed after the expiry scan began is left alone.
    async fn delete_if_idle_since(
        &self,
        user_id: &str,
        idle_since: DateTime<Utc>,
    ) -> Result<bool, TombolaError>;

    /// Marks the liveness challenge as sent without touching activity time.
    async fn mark_challenged(&self, user_id: &str) -> Result<(), TombolaError>;

    /// A point-in-time copy of all sessions, for the monitor's scan.
    async fn snapshot(&self) -> Result<Vec<Session>, TombolaError>;
}
