// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the seams of the registration core.

pub mod clock;
pub mod gateway;
pub mod registry;
pub mod session;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use gateway::MessagingGateway;
pub use registry::IdentityRegistry;
pub use session::SessionStore;
pub use store::{ReferrerDirectory, TicketStore};
