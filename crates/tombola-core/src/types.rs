// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Tombola workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a user currently stands in the registration conversation.
///
/// A user with no stored session is implicitly awaiting an identity number;
/// [`SessionState::AwaitingIdentity`] exists so a session created by the
/// greeting can still be expired by the inactivity monitor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingIdentity,
    AwaitingPhone,
    AwaitingReferrer,
    PostRegistration,
    MainMenu,
}

/// Registration data accumulated across conversation turns.
///
/// All fields start empty and are populated as the flow advances. The whole
/// struct is serialized as-is when a session store persists sessions
/// externally, so there is exactly one canonical on-the-wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFields {
    pub full_name: Option<String>,
    pub identity_number: Option<String>,
    pub phone: Option<String>,
    pub referrer_id: Option<i64>,
}

/// Per-user conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable per-conversation identifier (phone-style, gateway-assigned).
    pub user_id: String,
    pub state: SessionState,
    pub fields: SessionFields,
    /// Updated on every inbound message; the inactivity monitor measures
    /// idle time against this.
    pub last_activity_at: DateTime<Utc>,
    /// Set once the liveness challenge has gone out, reset by any inbound
    /// message, so the challenge is never repeated for the same idle span.
    pub liveness_challenge_sent: bool,
}

impl Session {
    /// Creates a fresh session in the identity-collection state.
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            state: SessionState::AwaitingIdentity,
            fields: SessionFields::default(),
            last_activity_at: now,
            liveness_challenge_sent: false,
        }
    }

    /// Records inbound activity: bumps the activity timestamp and clears a
    /// pending liveness challenge.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity_at = now;
        self.liveness_challenge_sent = false;
    }
}

/// One inbound chat message, shape-normalized by the gateway adapter before
/// it reaches the state machine.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender_id: String,
    pub display_name: String,
    /// `None`, empty text, and `/start` are all greeting triggers.
    pub text: Option<String>,
}

/// Geographic precinct attached to an identity record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precinct {
    pub state: String,
    pub municipality: String,
    pub parish: String,
}

/// An entry in the electoral roll, read-only from the core's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub identity_number: String,
    pub full_name: String,
    pub precinct: Precinct,
}

/// An issued raffle ticket.
///
/// Immutable after creation except for `validated` and `is_winner`; the
/// raffle draw that sets `is_winner` lives outside this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Surrogate key, also the human-facing "lucky number".
    pub id: i64,
    /// Opaque unique serial embedded in the QR payload.
    pub ticket_number: String,
    pub identity_number: String,
    pub full_name: String,
    /// Canonical international form, 12 digits starting `58`.
    pub phone: String,
    pub precinct: Precinct,
    pub referrer_id: i64,
    /// Base64-encoded QR image bytes embedding the structured payload.
    pub qr_payload: String,
    pub validated: bool,
    pub is_winner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for a ticket: everything except the store-assigned id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket_number: String,
    pub identity_number: String,
    pub full_name: String,
    pub phone: String,
    pub precinct: Precinct,
    pub referrer_id: i64,
    pub qr_payload: String,
}
