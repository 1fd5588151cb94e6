// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation flow for the Tombola raffle bot.
//!
//! [`machine::FlowEngine`] routes each inbound message by the sender's
//! session state, collecting an identity number and a phone number, issuing
//! the ticket through `tombola-ticket`, and navigating the menus.
//! [`monitor::InactivityMonitor`] expires abandoned sessions, and
//! [`session::MemorySessionStore`] holds conversation state in process.

pub mod extract;
pub mod machine;
pub mod messages;
pub mod monitor;
pub mod session;

pub use machine::{ContactInfo, FlowEngine, FlowOptions};
pub use monitor::InactivityMonitor;
pub use session::MemorySessionStore;
