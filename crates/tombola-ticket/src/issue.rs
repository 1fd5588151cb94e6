// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Idempotent ticket issuance.
//!
//! One identity gets at most one ticket, ever. The engine checks existing
//! registrations before inserting, and the storage layer's uniqueness
//! constraints are the final arbiter when two registrations for the same
//! person race: a constraint violation on insert is answered with a single
//! re-check, which then finds the row the concurrent winner created.

use std::sync::Arc;

use thiserror::Error;
use tombola_core::{
    IdentityRegistry, NewTicket, Precinct, ReferrerDirectory, Ticket, TicketStore, TombolaError,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::qr::QrPayload;

/// Failure modes a caller must distinguish to word its reply.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The phone belongs to a ticket issued under a different identity.
    #[error("phone {phone} is already registered under identity {identity_number}")]
    PhoneAlreadyRegistered {
        phone: String,
        identity_number: String,
    },

    /// No registry record and no fallback name to register under.
    #[error("identity number {0} not found in the registry")]
    IdentityNotFound(String),

    #[error(transparent)]
    Other(#[from] TombolaError),
}

/// Input to [`TicketIssuer::issue`].
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub identity_number: String,
    /// Canonical 12-digit international form.
    pub phone: String,
    /// `None` credits the registration to the system referrer.
    pub referrer_id: Option<i64>,
    /// Name to register under when the registry has no record for the
    /// identity number. `None` makes a registry miss an error.
    pub fallback_name: Option<String>,
}

/// Outcome of an issuance: the ticket, plus whether this call created it.
#[derive(Debug, Clone)]
pub struct Issuance {
    pub ticket: Ticket,
    pub newly_created: bool,
}

/// The issuance engine. Collaborators are trait objects so tests can swap
/// in fakes and the storage backend stays interchangeable.
pub struct TicketIssuer {
    tickets: Arc<dyn TicketStore>,
    registry: Arc<dyn IdentityRegistry>,
    referrers: Arc<dyn ReferrerDirectory>,
}

impl TicketIssuer {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        registry: Arc<dyn IdentityRegistry>,
        referrers: Arc<dyn ReferrerDirectory>,
    ) -> Self {
        Self {
            tickets,
            registry,
            referrers,
        }
    }

    /// Issues a ticket for the request, or returns the one already issued.
    ///
    /// Re-invoking with the same identity always yields the same ticket,
    /// even when the stored phone differs from the requested one; only a
    /// phone already bound to a *different* identity is a conflict.
    pub async fn issue(&self, request: &IssueRequest) -> Result<Issuance, IssueError> {
        match self.attempt(request).await {
            Err(IssueError::Other(TombolaError::UniqueViolation { constraint })) => {
                warn!(
                    identity_number = %request.identity_number,
                    constraint = %constraint,
                    "insert lost a registration race, re-checking"
                );
                self.attempt(request).await
            }
            other => other,
        }
    }

    async fn attempt(&self, request: &IssueRequest) -> Result<Issuance, IssueError> {
        if let Some(existing) = self
            .tickets
            .find_by_identity(&request.identity_number)
            .await?
        {
            debug!(
                identity_number = %request.identity_number,
                ticket_id = existing.id,
                "identity already registered, returning existing ticket"
            );
            return Ok(Issuance {
                ticket: existing,
                newly_created: false,
            });
        }

        if let Some(other) = self.tickets.find_by_phone(&request.phone).await? {
            return Err(IssueError::PhoneAlreadyRegistered {
                phone: request.phone.clone(),
                identity_number: other.identity_number,
            });
        }

        let (full_name, precinct) = match self.registry.verify(&request.identity_number).await? {
            Some(record) => (record.full_name, record.precinct),
            None => match &request.fallback_name {
                Some(name) => {
                    debug!(
                        identity_number = %request.identity_number,
                        "registry miss, registering under caller-supplied name"
                    );
                    (name.clone(), Precinct::default())
                }
                None => {
                    return Err(IssueError::IdentityNotFound(
                        request.identity_number.clone(),
                    ));
                }
            },
        };

        let referrer_id = match request.referrer_id {
            Some(id) => id,
            None => self.referrers.system_referrer_id().await?,
        };

        let ticket_number = ticket_serial();
        let qr_payload = QrPayload::new(
            &ticket_number,
            &request.identity_number,
            &full_name,
            &request.phone,
            &precinct,
            referrer_id,
        )
        .encode()?;

        let ticket = self
            .tickets
            .insert(NewTicket {
                ticket_number,
                identity_number: request.identity_number.clone(),
                full_name,
                phone: request.phone.clone(),
                precinct,
                referrer_id,
                qr_payload,
            })
            .await?;

        info!(
            ticket_id = ticket.id,
            ticket_number = %ticket.ticket_number,
            referrer_id,
            "issued new ticket"
        );
        Ok(Issuance {
            ticket,
            newly_created: true,
        })
    }
}

/// Opaque 12-character uppercase serial for the QR payload, distinct from
/// the numeric row id shown to users as the lucky number.
pub fn ticket_serial() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..12].to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_are_twelve_uppercase_alphanumerics() {
        let serial = ticket_serial();
        assert_eq!(serial.len(), 12);
        assert!(serial
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn serials_do_not_repeat() {
        assert_ne!(ticket_serial(), ticket_serial());
    }
}
