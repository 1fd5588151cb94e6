// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket issuance engine and QR payload codec.
//!
//! [`issue::TicketIssuer`] turns a verified identity plus a normalized
//! phone number into exactly one persisted raffle ticket, surviving retries
//! and concurrent registration attempts. [`qr`] defines the structured
//! payload embedded in each ticket's QR image and its rendering.

pub mod issue;
pub mod qr;

pub use issue::{Issuance, IssueError, IssueRequest, TicketIssuer};
pub use qr::{decode_image, QrPayload};
