// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging gateway trait for chat platform integrations (WhatsApp-style,
//! Telegram-style).
//!
//! The wire formats of the concrete gateways live outside this core; the
//! state machine only needs the minimal send contract below. Delivery is
//! best-effort -- the gateway never guarantees receipt.

use async_trait::async_trait;

use crate::error::TombolaError;

/// Outbound operations the core invokes on its messaging collaborator.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Sends a plain text message to a user.
    async fn send_text(&self, user_id: &str, text: &str) -> Result<(), TombolaError>;

    /// Sends an image (e.g. a QR code) with a caption.
    async fn send_image(
        &self,
        user_id: &str,
        image: &[u8],
        caption: &str,
    ) -> Result<(), TombolaError>;

    /// Sends a contact card so the user can save the promoter's number.
    async fn send_contact_card(
        &self,
        user_id: &str,
        phone: &str,
        first_name: &str,
        last_name: &str,
        organization: &str,
    ) -> Result<(), TombolaError>;
}
