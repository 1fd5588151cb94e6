// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging gateway for deterministic testing.
//!
//! Captures every outbound send so tests can assert on the exact sequence
//! of messages a conversation produced. A failure toggle lets tests drive
//! the degraded-collaborator paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tombola_core::{MessagingGateway, TombolaError};

/// One captured outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text {
        user_id: String,
        text: String,
    },
    Image {
        user_id: String,
        image: Vec<u8>,
        caption: String,
    },
    ContactCard {
        user_id: String,
        phone: String,
        first_name: String,
        last_name: String,
        organization: String,
    },
}

impl SentMessage {
    /// The text body for `Text`, the caption for `Image`, empty otherwise.
    pub fn text(&self) -> &str {
        match self {
            SentMessage::Text { text, .. } => text,
            SentMessage::Image { caption, .. } => caption,
            SentMessage::ContactCard { .. } => "",
        }
    }
}

/// A gateway that records instead of delivering.
#[derive(Clone, Default)]
pub struct MockGateway {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failing: Arc<AtomicBool>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sends captured so far, in order.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// The text of the most recent send, for one-line assertions.
    pub async fn last_text(&self) -> Option<String> {
        self.sent
            .lock()
            .await
            .last()
            .map(|m| m.text().to_string())
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }

    /// When set, every send fails with a gateway error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> Result<(), TombolaError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TombolaError::Gateway {
                message: "mock gateway configured to fail".into(),
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn send_text(&self, user_id: &str, text: &str) -> Result<(), TombolaError> {
        self.check_failing()?;
        self.sent.lock().await.push(SentMessage::Text {
            user_id: user_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_image(
        &self,
        user_id: &str,
        image: &[u8],
        caption: &str,
    ) -> Result<(), TombolaError> {
        self.check_failing()?;
        self.sent.lock().await.push(SentMessage::Image {
            user_id: user_id.to_string(),
            image: image.to_vec(),
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn send_contact_card(
        &self,
        user_id: &str,
        phone: &str,
        first_name: &str,
        last_name: &str,
        organization: &str,
    ) -> Result<(), TombolaError> {
        self.check_failing()?;
        self.sent.lock().await.push(SentMessage::ContactCard {
            user_id: user_id.to_string(),
            phone: phone.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            organization: organization.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_sends_in_order() {
        let gateway = MockGateway::new();
        gateway.send_text("u1", "hola").await.unwrap();
        gateway.send_image("u1", b"img", "tu ticket").await.unwrap();

        let sent = gateway.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].text(), "hola");
        assert_eq!(gateway.last_text().await.as_deref(), Some("tu ticket"));
    }

    #[tokio::test]
    async fn failing_toggle_rejects_sends() {
        let gateway = MockGateway::new();
        gateway.set_failing(true);
        assert!(gateway.send_text("u1", "hola").await.is_err());
        assert_eq!(gateway.sent_count().await, 0);

        gateway.set_failing(false);
        gateway.send_text("u1", "hola").await.unwrap();
        assert_eq!(gateway.sent_count().await, 1);
    }
}
