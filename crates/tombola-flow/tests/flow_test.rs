// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversation tests: a real SQLite store underneath, a mock
//! gateway capturing every send, and a manual clock driving the monitor.

use std::sync::Arc;

use tombola_config::MonitorConfig;
use tombola_core::{InboundMessage, SessionState, SessionStore};
use tombola_flow::{ContactInfo, FlowEngine, FlowOptions, InactivityMonitor, MemorySessionStore};
use tombola_storage::queries::{referrers, tickets};
use tombola_storage::{Database, SqliteBackend};
use tombola_test_utils::{open_temp_db, seed_elector, seed_referrer, ManualClock, MockGateway, SentMessage};

struct Harness {
    engine: FlowEngine,
    monitor: InactivityMonitor,
    gateway: Arc<MockGateway>,
    sessions: Arc<MemorySessionStore>,
    clock: Arc<ManualClock>,
    db: Database,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new(options: FlowOptions) -> Self {
        let (db, dir) = open_temp_db().await;
        let backend = Arc::new(SqliteBackend::new(db.clone()));
        let sessions = Arc::new(MemorySessionStore::new());
        let gateway = Arc::new(MockGateway::new());
        let clock = Arc::new(ManualClock::starting_now());

        let engine = FlowEngine::new(
            sessions.clone(),
            gateway.clone(),
            backend.clone(),
            backend.clone(),
            backend,
            clock.clone(),
            options,
        );
        let monitor = InactivityMonitor::new(
            sessions.clone(),
            gateway.clone(),
            clock.clone(),
            &MonitorConfig::default(),
        );
        Self {
            engine,
            monitor,
            gateway,
            sessions,
            clock,
            db,
            _dir: dir,
        }
    }

    async fn default_setup() -> Self {
        Self::new(default_options()).await
    }

    async fn say(&self, sender: &str, text: &str) {
        let message = InboundMessage {
            sender_id: sender.to_string(),
            display_name: "Carlos".to_string(),
            text: Some(text.to_string()),
        };
        self.engine.handle(&message).await.expect("handle message");
    }

    async fn state_of(&self, sender: &str) -> Option<SessionState> {
        self.sessions
            .get(sender)
            .await
            .expect("session get")
            .map(|s| s.state)
    }

    async fn last_text(&self) -> String {
        self.gateway.last_text().await.expect("at least one send")
    }
}

fn default_options() -> FlowOptions {
    FlowOptions {
        collects_referrer: false,
        website_url: "https://tombola.example".to_string(),
        channel_url: "https://t.me/tombola".to_string(),
        contact: Some(ContactInfo {
            phone: "584120000000".to_string(),
            first_name: "Tombola".to_string(),
            last_name: "Soporte".to_string(),
            organization: "Tombola CA".to_string(),
        }),
    }
}

async fn image_count(gateway: &MockGateway) -> usize {
    gateway
        .sent()
        .await
        .iter()
        .filter(|m| matches!(m, SentMessage::Image { .. }))
        .count()
}

#[tokio::test]
async fn full_registration_flow_issues_a_ticket() {
    let h = Harness::default_setup().await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();

    h.say("user-1", "/start").await;
    assert!(h.last_text().await.contains("Hola"));
    assert_eq!(h.state_of("user-1").await, Some(SessionState::AwaitingIdentity));

    h.say("user-1", "mi cedula es 12345678").await;
    assert!(h.last_text().await.contains("04XX"));
    assert_eq!(h.state_of("user-1").await, Some(SessionState::AwaitingPhone));

    h.say("user-1", "0414-1234567").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::PostRegistration));

    let ticket = tickets::find_by_identity(&h.db, "12345678")
        .await
        .unwrap()
        .expect("ticket issued");
    assert_eq!(ticket.phone, "584141234567");
    assert_eq!(ticket.full_name, "Maria Perez");

    // QR image and contact card both went out.
    assert_eq!(image_count(&h.gateway).await, 1);
    let sent = h.gateway.sent().await;
    assert!(sent.iter().any(|m| matches!(m, SentMessage::ContactCard { .. })));
    assert_eq!(tickets::count_tickets(&h.db).await.unwrap(), 1);
}

#[tokio::test]
async fn unknown_identity_registers_under_display_name() {
    let h = Harness::default_setup().await;

    h.say("user-1", "99999999").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::AwaitingPhone));

    h.say("user-1", "0424-7654321").await;
    let ticket = tickets::find_by_identity(&h.db, "99999999")
        .await
        .unwrap()
        .expect("visitor ticket issued");
    assert_eq!(ticket.full_name, "Carlos");
    assert_eq!(ticket.phone, "584247654321");
}

#[tokio::test]
async fn garbled_identity_lands_on_main_menu() {
    let h = Harness::default_setup().await;

    h.say("user-1", "hola que tal").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::MainMenu));
    assert!(h.last_text().await.contains("*1.*"));

    // Option 2 shows the website and keeps the menu alive.
    h.say("user-1", "2").await;
    let sent = h.gateway.sent().await;
    assert!(sent.iter().any(|m| m.text().contains("https://tombola.example")));
    assert_eq!(h.state_of("user-1").await, Some(SessionState::MainMenu));

    // An unrecognized digit re-displays the menu.
    h.say("user-1", "9").await;
    assert!(h.last_text().await.contains("*5.*"));
    assert_eq!(h.state_of("user-1").await, Some(SessionState::MainMenu));

    // Option 5 ends the conversation and forgets the session.
    h.say("user-1", "5").await;
    assert_eq!(h.state_of("user-1").await, None);
}

#[tokio::test]
async fn returning_registrant_gets_ticket_resent() {
    let h = Harness::default_setup().await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();

    h.say("user-1", "12345678").await;
    h.say("user-1", "0414-1234567").await;
    assert_eq!(tickets::count_tickets(&h.db).await.unwrap(), 1);

    // Fresh conversation, same identity: re-send, never re-issue.
    h.sessions.delete("user-1").await.unwrap();
    h.gateway.clear().await;

    h.say("user-1", "12345678").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::PostRegistration));
    assert_eq!(image_count(&h.gateway).await, 1);
    assert_eq!(tickets::count_tickets(&h.db).await.unwrap(), 1);
}

#[tokio::test]
async fn post_menu_navigates_back_and_registers_another() {
    let h = Harness::default_setup().await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();

    h.say("user-1", "12345678").await;
    h.say("user-1", "0414-1234567").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::PostRegistration));

    h.say("user-1", "3").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::MainMenu));

    // Option 1 restarts the registration flow from scratch.
    h.say("user-1", "1").await;
    assert_eq!(h.state_of("user-1").await, None);
    assert!(h.last_text().await.contains("cédula"));
}

#[tokio::test]
async fn conflicting_phone_resets_to_phone_collection() {
    let h = Harness::default_setup().await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();
    seed_elector(&h.db, "87654321", "Jose", "Rivas").await.unwrap();

    h.say("user-1", "12345678").await;
    h.say("user-1", "0414-1234567").await;

    h.say("user-2", "87654321").await;
    h.say("user-2", "0414-1234567").await;
    assert!(h.last_text().await.contains("ya está registrado"));

    let session = h.sessions.get("user-2").await.unwrap().unwrap();
    assert_eq!(session.state, SessionState::AwaitingPhone);
    assert_eq!(session.fields.phone, None);

    // A different phone completes the registration.
    h.say("user-2", "0426-1112233").await;
    assert_eq!(h.state_of("user-2").await, Some(SessionState::PostRegistration));
    assert_eq!(tickets::count_tickets(&h.db).await.unwrap(), 2);
}

#[tokio::test]
async fn referrer_step_credits_the_promoter() {
    let mut options = default_options();
    options.collects_referrer = true;
    let h = Harness::new(options).await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();
    let promoter_id = seed_referrer(&h.db, "promoter-1").await.unwrap();

    h.say("user-1", "12345678").await;
    h.say("user-1", "0414-1234567").await;
    assert_eq!(h.state_of("user-1").await, Some(SessionState::AwaitingReferrer));

    h.say("user-1", &promoter_id.to_string()).await;
    let ticket = tickets::find_by_identity(&h.db, "12345678")
        .await
        .unwrap()
        .expect("ticket issued");
    assert_eq!(ticket.referrer_id, promoter_id);
}

#[tokio::test]
async fn unknown_referrer_code_reprompts_without_issuing() {
    let mut options = default_options();
    options.collects_referrer = true;
    let h = Harness::new(options).await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();

    h.say("user-1", "12345678").await;
    h.say("user-1", "0414-1234567").await;

    // No such promoter: no ticket, no state change, just a re-prompt.
    h.say("user-1", "77").await;
    assert_eq!(tickets::count_tickets(&h.db).await.unwrap(), 0);
    assert_eq!(h.state_of("user-1").await, Some(SessionState::AwaitingReferrer));
    assert!(h.last_text().await.contains("promotor"));

    // The explicit opt-out still completes the registration.
    h.say("user-1", "0").await;
    assert_eq!(tickets::count_tickets(&h.db).await.unwrap(), 1);
    assert_eq!(h.state_of("user-1").await, Some(SessionState::PostRegistration));
}

#[tokio::test]
async fn declining_a_referrer_credits_the_system() {
    let mut options = default_options();
    options.collects_referrer = true;
    let h = Harness::new(options).await;
    seed_elector(&h.db, "12345678", "Maria", "Perez").await.unwrap();

    h.say("user-1", "12345678").await;
    h.say("user-1", "0414-1234567").await;
    h.say("user-1", "0").await;

    let system_id = referrers::ensure_system_referrer(&h.db).await.unwrap();
    let ticket = tickets::find_by_identity(&h.db, "12345678")
        .await
        .unwrap()
        .expect("ticket issued");
    assert_eq!(ticket.referrer_id, system_id);
}

#[tokio::test]
async fn monitor_challenges_once_then_expires() {
    let h = Harness::default_setup().await;

    h.say("user-1", "/start").await;
    h.gateway.clear().await;

    // Past the liveness threshold: exactly one challenge.
    h.clock.advance_secs(181);
    h.monitor.tick().await.unwrap();
    assert!(h.last_text().await.contains("Sigues ahí"));
    assert_eq!(h.gateway.sent_count().await, 1);

    h.monitor.tick().await.unwrap();
    assert_eq!(h.gateway.sent_count().await, 1);

    // Past the hard expiry: session deleted, notice sent.
    h.clock.advance_secs(120);
    h.monitor.tick().await.unwrap();
    assert_eq!(h.state_of("user-1").await, None);
    assert!(h.last_text().await.contains("inactividad"));
}

#[tokio::test]
async fn inbound_message_rearms_the_liveness_challenge() {
    let h = Harness::default_setup().await;

    h.say("user-1", "/start").await;
    h.clock.advance_secs(181);
    h.monitor.tick().await.unwrap();
    assert!(h.sessions.get("user-1").await.unwrap().unwrap().liveness_challenge_sent);

    // Any reply clears the flag and resets the idle span.
    h.say("user-1", "hola?").await;
    let session = h.sessions.get("user-1").await.unwrap().unwrap();
    assert!(!session.liveness_challenge_sent);

    h.gateway.clear().await;
    h.monitor.tick().await.unwrap();
    assert_eq!(h.gateway.sent_count().await, 0);
}
