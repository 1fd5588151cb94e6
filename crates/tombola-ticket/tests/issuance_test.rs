// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issuance engine tests against a real SQLite store: idempotence, phone
//! conflicts, and the concurrent-registration race.

use std::sync::Arc;

use tombola_storage::queries::tickets;
use tombola_storage::SqliteBackend;
use tombola_test_utils::{open_temp_db, seed_elector, seed_referrer};
use tombola_ticket::{IssueError, IssueRequest, TicketIssuer};

async fn issuer_over_temp_db() -> (TicketIssuer, tombola_storage::Database, tempfile::TempDir) {
    let (db, dir) = open_temp_db().await;
    let backend = Arc::new(SqliteBackend::new(db.clone()));
    let issuer = TicketIssuer::new(backend.clone(), backend.clone(), backend);
    (issuer, db, dir)
}

fn request(identity: &str, phone: &str) -> IssueRequest {
    IssueRequest {
        identity_number: identity.to_string(),
        phone: phone.to_string(),
        referrer_id: None,
        fallback_name: None,
    }
}

#[tokio::test]
async fn issuing_twice_returns_the_same_ticket() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;
    seed_elector(&db, "12345678", "Maria", "Perez").await.unwrap();

    let first = issuer.issue(&request("12345678", "584141234567")).await.unwrap();
    assert!(first.newly_created);
    assert_eq!(first.ticket.full_name, "Maria Perez");
    assert_eq!(first.ticket.phone, "584141234567");

    let second = issuer.issue(&request("12345678", "584141234567")).await.unwrap();
    assert!(!second.newly_created);
    assert_eq!(second.ticket.id, first.ticket.id);
    assert_eq!(second.ticket.ticket_number, first.ticket.ticket_number);

    assert_eq!(tickets::count_tickets(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn identity_match_wins_even_with_a_new_phone() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;
    seed_elector(&db, "12345678", "Maria", "Perez").await.unwrap();

    let first = issuer.issue(&request("12345678", "584141234567")).await.unwrap();
    let again = issuer.issue(&request("12345678", "584249999999")).await.unwrap();

    assert!(!again.newly_created);
    assert_eq!(again.ticket.id, first.ticket.id);
    // The stored phone is unchanged; re-issuance never rewrites the row.
    assert_eq!(again.ticket.phone, "584141234567");
    assert_eq!(tickets::count_tickets(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn phone_bound_to_another_identity_is_a_conflict() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;
    seed_elector(&db, "12345678", "Maria", "Perez").await.unwrap();
    seed_elector(&db, "87654321", "Jose", "Rivas").await.unwrap();

    issuer.issue(&request("12345678", "584141234567")).await.unwrap();

    let err = issuer
        .issue(&request("87654321", "584141234567"))
        .await
        .unwrap_err();
    match err {
        IssueError::PhoneAlreadyRegistered {
            phone,
            identity_number,
        } => {
            assert_eq!(phone, "584141234567");
            assert_eq!(identity_number, "12345678");
        }
        other => panic!("expected phone conflict, got {other:?}"),
    }
    assert_eq!(tickets::count_tickets(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn unknown_identity_without_fallback_is_rejected() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;

    let err = issuer
        .issue(&request("99999999", "584141234567"))
        .await
        .unwrap_err();
    assert!(matches!(err, IssueError::IdentityNotFound(id) if id == "99999999"));
    assert_eq!(tickets::count_tickets(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_identity_with_fallback_name_registers() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;

    let mut req = request("99999999", "584141234567");
    req.fallback_name = Some("Carlos".to_string());

    let issuance = issuer.issue(&req).await.unwrap();
    assert!(issuance.newly_created);
    assert_eq!(issuance.ticket.full_name, "Carlos");
    assert_eq!(issuance.ticket.precinct.state, "");
    assert_eq!(tickets::count_tickets(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn explicit_referrer_is_credited() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;
    seed_elector(&db, "12345678", "Maria", "Perez").await.unwrap();
    let referrer_id = seed_referrer(&db, "promoter-7").await.unwrap();

    let mut req = request("12345678", "584141234567");
    req.referrer_id = Some(referrer_id);

    let issuance = issuer.issue(&req).await.unwrap();
    assert_eq!(issuance.ticket.referrer_id, referrer_id);
}

#[tokio::test]
async fn concurrent_registrations_converge_on_one_ticket() {
    let (issuer, db, _dir) = issuer_over_temp_db().await;
    seed_elector(&db, "12345678", "Maria", "Perez").await.unwrap();
    let issuer = Arc::new(issuer);

    let req = request("12345678", "584141234567");
    let (a, b) = tokio::join!(issuer.issue(&req), issuer.issue(&req));

    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a.ticket.id, b.ticket.id);
    assert_ne!(a.newly_created, b.newly_created);
    assert_eq!(tickets::count_tickets(&db).await.unwrap(), 1);
}
