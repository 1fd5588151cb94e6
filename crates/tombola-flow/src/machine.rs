// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state machine for raffle registration.
//!
//! One engine drives every conversation, keyed by sender id. Each inbound
//! message is routed by the stored session state; a user without a session
//! is implicitly awaiting an identity number. Collaborator failures never
//! strand a user: every error path sends an explanation and lands on the
//! main menu, from which all flows are reachable again.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tombola_config::TombolaConfig;
use tombola_core::{
    Clock, IdentityRegistry, InboundMessage, MessagingGateway, ReferrerDirectory, Session,
    SessionState, SessionStore, Ticket, TicketStore, TombolaError,
};
use tombola_ticket::{decode_image, IssueError, IssueRequest, TicketIssuer};

use crate::extract::{extract_identity, extract_menu_option, extract_phone};
use crate::messages;

/// Promoted contact shared with registrants after issuance.
#[derive(Debug, Clone)]
pub struct ContactInfo {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
}

/// Behavioral knobs for the flow, resolved once at startup.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Adds the referrer-collection step between phone and issuance.
    pub collects_referrer: bool,
    pub website_url: String,
    pub channel_url: String,
    /// `None` disables the contact-card share.
    pub contact: Option<ContactInfo>,
}

impl FlowOptions {
    pub fn from_config(config: &TombolaConfig) -> Self {
        Self {
            collects_referrer: config.flow.collects_referrer,
            website_url: config.flow.website_url.clone(),
            channel_url: config.flow.channel_url.clone(),
            contact: config.contact.as_ref().map(|c| ContactInfo {
                phone: c.phone.clone(),
                first_name: c.first_name.clone(),
                last_name: c.last_name.clone(),
                organization: c.organization.clone(),
            }),
        }
    }
}

/// The registration conversation engine.
pub struct FlowEngine {
    sessions: Arc<dyn SessionStore>,
    gateway: Arc<dyn MessagingGateway>,
    registry: Arc<dyn IdentityRegistry>,
    tickets: Arc<dyn TicketStore>,
    referrers: Arc<dyn ReferrerDirectory>,
    issuer: TicketIssuer,
    clock: Arc<dyn Clock>,
    options: FlowOptions,
}

impl FlowEngine {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        gateway: Arc<dyn MessagingGateway>,
        registry: Arc<dyn IdentityRegistry>,
        tickets: Arc<dyn TicketStore>,
        referrers: Arc<dyn ReferrerDirectory>,
        clock: Arc<dyn Clock>,
        options: FlowOptions,
    ) -> Self {
        let issuer = TicketIssuer::new(tickets.clone(), registry.clone(), referrers.clone());
        Self {
            sessions,
            gateway,
            registry,
            tickets,
            referrers,
            issuer,
            clock,
            options,
        }
    }

    /// Processes one inbound message and advances the sender's session.
    ///
    /// The touched session is persisted before dispatch so the inactivity
    /// monitor sees the activity even if a downstream send fails.
    pub async fn handle(&self, message: &InboundMessage) -> Result<(), TombolaError> {
        let now = self.clock.now();
        let text = message.text.as_deref().map(str::trim).unwrap_or("");

        let session = match self.sessions.get(&message.sender_id).await? {
            Some(mut session) => {
                session.touch(now);
                session
            }
            None => Session::new(message.sender_id.clone(), now),
        };
        self.sessions.put(session.clone()).await?;

        debug!(
            user_id = %message.sender_id,
            state = %session.state,
            "dispatching inbound message"
        );

        match session.state {
            SessionState::AwaitingIdentity => self.on_identity(message, text, session).await,
            SessionState::AwaitingPhone => self.on_phone(message, text, session).await,
            SessionState::AwaitingReferrer => self.on_referrer(message, text, session).await,
            SessionState::PostRegistration => self.on_post_menu(message, text, session).await,
            SessionState::MainMenu => self.on_main_menu(message, text, session).await,
        }
    }

    async fn on_identity(
        &self,
        message: &InboundMessage,
        text: &str,
        mut session: Session,
    ) -> Result<(), TombolaError> {
        if text.is_empty() || text == "/start" {
            self.send(message, &messages::greeting(&message.display_name))
                .await?;
            return Ok(());
        }

        let Some(identity) = extract_identity(text) else {
            self.send(message, &messages::identity_not_understood())
                .await?;
            self.send(message, &messages::identity_example()).await?;
            return self.go_main_menu(message, session).await;
        };

        // Already registered? Re-send the ticket instead of re-collecting.
        match self.tickets.find_by_identity(&identity).await {
            Ok(Some(ticket)) => {
                session.fields.identity_number = Some(identity);
                session.fields.full_name = Some(ticket.full_name.clone());
                session.state = SessionState::PostRegistration;
                self.sessions.put(session).await?;
                self.send_existing_ticket(message, &ticket).await
            }
            Ok(None) => match self.registry.verify(&identity).await {
                Ok(Some(record)) => {
                    self.send(message, &messages::registered_without_ticket(&identity))
                        .await?;
                    self.send(message, &messages::phone_prompt()).await?;
                    session.fields.identity_number = Some(identity);
                    session.fields.full_name = Some(record.full_name);
                    session.state = SessionState::AwaitingPhone;
                    self.sessions.put(session).await
                }
                Ok(None) => {
                    self.send(message, &messages::identity_unknown(&identity))
                        .await?;
                    self.send(message, &messages::offer_registration()).await?;
                    self.send(message, &messages::phone_prompt()).await?;
                    session.fields.identity_number = Some(identity);
                    session.fields.full_name = Some(message.display_name.clone());
                    session.state = SessionState::AwaitingPhone;
                    self.sessions.put(session).await
                }
                Err(e) => {
                    warn!(user_id = %message.sender_id, error = %e, "registry lookup failed");
                    self.send(message, &messages::something_went_wrong()).await?;
                    self.go_main_menu(message, session).await
                }
            },
            Err(e) => {
                // Can't tell whether a ticket exists; proceed to register.
                // Issuance re-checks, so the worst case is a redundant prompt.
                warn!(user_id = %message.sender_id, error = %e, "ticket lookup failed");
                self.send(message, &messages::ticket_check_unavailable())
                    .await?;
                session.fields.identity_number = Some(identity);
                session.fields.full_name = Some(message.display_name.clone());
                session.state = SessionState::AwaitingPhone;
                self.sessions.put(session).await
            }
        }
    }

    async fn on_phone(
        &self,
        message: &InboundMessage,
        text: &str,
        mut session: Session,
    ) -> Result<(), TombolaError> {
        if session.fields.identity_number.is_none() {
            self.send(message, &messages::something_went_wrong()).await?;
            return self.go_main_menu(message, session).await;
        }

        let Some(phone) = extract_phone(text) else {
            return self.send(message, &messages::phone_not_understood()).await;
        };

        session.fields.phone = Some(phone);
        if self.options.collects_referrer && session.fields.referrer_id.is_none() {
            session.state = SessionState::AwaitingReferrer;
            self.sessions.put(session).await?;
            return self.send(message, &messages::referrer_prompt()).await;
        }
        self.register(message, session).await
    }

    async fn on_referrer(
        &self,
        message: &InboundMessage,
        text: &str,
        mut session: Session,
    ) -> Result<(), TombolaError> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let Ok(code) = digits.parse::<i64>() else {
            return self.send(message, &messages::referrer_prompt()).await;
        };

        // 0 is the documented "no promoter" answer.
        if code != 0 {
            match self.referrers.exists(code).await {
                Ok(true) => session.fields.referrer_id = Some(code),
                Ok(false) => {
                    // Unknown code: re-prompt and stay; 0 remains the way out.
                    return self.send(message, &messages::referrer_unknown()).await;
                }
                Err(e) => {
                    warn!(user_id = %message.sender_id, error = %e, "referrer lookup failed");
                    self.send(message, &messages::something_went_wrong()).await?;
                    return self.go_main_menu(message, session).await;
                }
            }
        }
        self.register(message, session).await
    }

    /// Issues the ticket from the accumulated session fields.
    async fn register(
        &self,
        message: &InboundMessage,
        mut session: Session,
    ) -> Result<(), TombolaError> {
        let (Some(identity), Some(phone)) = (
            session.fields.identity_number.clone(),
            session.fields.phone.clone(),
        ) else {
            self.send(message, &messages::something_went_wrong()).await?;
            return self.go_main_menu(message, session).await;
        };

        self.send(message, &messages::processing(&identity, &phone))
            .await?;

        let request = IssueRequest {
            identity_number: identity,
            phone,
            referrer_id: session.fields.referrer_id,
            fallback_name: session.fields.full_name.clone(),
        };
        match self.issuer.issue(&request).await {
            Ok(issuance) if issuance.newly_created => {
                info!(
                    user_id = %message.sender_id,
                    ticket_id = issuance.ticket.id,
                    "registration completed"
                );
                self.send(message, &messages::registration_complete()).await?;
                self.send_ticket_image(message, &issuance.ticket).await?;
                self.send(message, &messages::welcome_with_ticket()).await?;
                self.send_contact_card(message).await?;
                session.fields.full_name = Some(issuance.ticket.full_name.clone());
                session.state = SessionState::PostRegistration;
                self.sessions.put(session).await?;
                self.send(message, &messages::post_menu()).await
            }
            Ok(issuance) => {
                session.fields.full_name = Some(issuance.ticket.full_name.clone());
                session.state = SessionState::PostRegistration;
                self.sessions.put(session).await?;
                self.send_existing_ticket(message, &issuance.ticket).await
            }
            Err(IssueError::PhoneAlreadyRegistered {
                phone,
                identity_number,
            }) => {
                session.fields.phone = None;
                session.state = SessionState::AwaitingPhone;
                self.sessions.put(session).await?;
                self.send(message, &messages::phone_conflict(&phone, &identity_number))
                    .await
            }
            Err(IssueError::IdentityNotFound(id)) => {
                self.send(message, &messages::identity_unknown(&id)).await?;
                self.go_main_menu(message, session).await
            }
            Err(IssueError::Other(e)) => {
                warn!(user_id = %message.sender_id, error = %e, "ticket issuance failed");
                self.send(message, &messages::something_went_wrong()).await?;
                self.go_main_menu(message, session).await
            }
        }
    }

    async fn on_main_menu(
        &self,
        message: &InboundMessage,
        text: &str,
        session: Session,
    ) -> Result<(), TombolaError> {
        let name = self.known_name(message, &session);
        match extract_menu_option(text) {
            Some(1) => {
                self.send(message, &messages::register_prompt()).await?;
                self.sessions.delete(&message.sender_id).await?;
                Ok(())
            }
            Some(2) => {
                self.send(message, &messages::website(&self.options.website_url))
                    .await?;
                self.send(message, &messages::main_menu(&name)).await
            }
            Some(3) => {
                self.send(message, &messages::channel(&self.options.channel_url))
                    .await?;
                self.send(message, &messages::main_menu(&name)).await
            }
            Some(4) => {
                self.send(message, &messages::verify_other_prompt()).await?;
                self.sessions.delete(&message.sender_id).await?;
                Ok(())
            }
            Some(5) => {
                self.send(message, &messages::goodbye(&name)).await?;
                self.sessions.delete(&message.sender_id).await?;
                Ok(())
            }
            _ => {
                self.send(message, &messages::main_menu_invalid()).await?;
                self.send(message, &messages::main_menu(&name)).await
            }
        }
    }

    async fn on_post_menu(
        &self,
        message: &InboundMessage,
        text: &str,
        mut session: Session,
    ) -> Result<(), TombolaError> {
        let name = self.known_name(message, &session);
        match extract_menu_option(text) {
            Some(1) => {
                self.send(message, &messages::website(&self.options.website_url))
                    .await?;
                self.send(message, &messages::post_menu()).await
            }
            Some(2) => {
                self.send(message, &messages::channel(&self.options.channel_url))
                    .await?;
                self.send(message, &messages::post_menu()).await
            }
            Some(3) => {
                self.send(message, &messages::back_to_main_menu()).await?;
                session.state = SessionState::MainMenu;
                self.sessions.put(session).await?;
                self.send(message, &messages::main_menu(&name)).await
            }
            Some(4) => {
                self.send(message, &messages::goodbye_registered(&name)).await?;
                self.sessions.delete(&message.sender_id).await?;
                Ok(())
            }
            _ => {
                self.send(message, &messages::post_menu_invalid()).await?;
                self.send(message, &messages::post_menu()).await
            }
        }
    }

    /// Shows the main menu and parks the session there.
    async fn go_main_menu(
        &self,
        message: &InboundMessage,
        mut session: Session,
    ) -> Result<(), TombolaError> {
        let name = self.known_name(message, &session);
        self.send(message, &messages::main_menu(&name)).await?;
        session.state = SessionState::MainMenu;
        self.sessions.put(session).await
    }

    async fn send_existing_ticket(
        &self,
        message: &InboundMessage,
        ticket: &Ticket,
    ) -> Result<(), TombolaError> {
        self.send(
            message,
            &messages::existing_ticket(&ticket.full_name, ticket.id),
        )
        .await?;
        self.send_ticket_image(message, ticket).await?;
        self.send_contact_card(message).await?;
        self.send(message, &messages::post_menu()).await
    }

    async fn send_ticket_image(
        &self,
        message: &InboundMessage,
        ticket: &Ticket,
    ) -> Result<(), TombolaError> {
        let image = decode_image(&ticket.qr_payload)?;
        self.gateway
            .send_image(&message.sender_id, &image, &messages::qr_caption(ticket.id))
            .await
    }

    async fn send_contact_card(&self, message: &InboundMessage) -> Result<(), TombolaError> {
        if let Some(contact) = &self.options.contact {
            self.gateway
                .send_contact_card(
                    &message.sender_id,
                    &contact.phone,
                    &contact.first_name,
                    &contact.last_name,
                    &contact.organization,
                )
                .await?;
        }
        Ok(())
    }

    async fn send(&self, message: &InboundMessage, text: &str) -> Result<(), TombolaError> {
        self.gateway.send_text(&message.sender_id, text).await
    }

    fn known_name(&self, message: &InboundMessage, session: &Session) -> String {
        session
            .fields
            .full_name
            .clone()
            .unwrap_or_else(|| message.display_name.clone())
    }
}
