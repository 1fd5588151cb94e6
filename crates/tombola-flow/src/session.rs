// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session store backed by `DashMap`.
//!
//! Each map entry is locked for the duration of an operation, which gives
//! the per-key atomicity the [`SessionStore`] contract requires without a
//! global lock. Sessions are written as whole values; there is no partial
//! update and therefore no read-time format detection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use tombola_core::{Session, SessionStore, TombolaError};

/// Process-local session store. Sessions do not survive a restart, which
/// matches their conversational lifetime.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: &str) -> Result<Option<Session>, TombolaError> {
        Ok(self.sessions.get(user_id).map(|entry| entry.clone()))
    }

    async fn put(&self, session: Session) -> Result<(), TombolaError> {
        self.sessions.insert(session.user_id.clone(), session);
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<bool, TombolaError> {
        Ok(self.sessions.remove(user_id).is_some())
    }

    async fn delete_if_idle_since(
        &self,
        user_id: &str,
        idle_since: DateTime<Utc>,
    ) -> Result<bool, TombolaError> {
        let removed = self
            .sessions
            .remove_if(user_id, |_, session| session.last_activity_at <= idle_since);
        Ok(removed.is_some())
    }

    async fn mark_challenged(&self, user_id: &str) -> Result<(), TombolaError> {
        if let Some(mut entry) = self.sessions.get_mut(user_id) {
            entry.liveness_challenge_sent = true;
        }
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<Session>, TombolaError> {
        Ok(self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
