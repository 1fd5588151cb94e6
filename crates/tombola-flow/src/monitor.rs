// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inactivity monitor: one periodic scan over the session store.
//!
//! Two thresholds per session. Past the liveness threshold, the user gets a
//! single "are you still there?" challenge; any inbound message clears the
//! flag so the challenge is never repeated for the same idle span. Past the
//! hard expiry, the session is deleted and the user is told. Deletion goes
//! through [`SessionStore::delete_if_idle_since`], so a message that lands
//! while the scan is running keeps its session alive.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use tombola_config::MonitorConfig;
use tombola_core::{Clock, MessagingGateway, SessionStore, TombolaError};

use crate::messages;

pub struct InactivityMonitor {
    sessions: Arc<dyn SessionStore>,
    gateway: Arc<dyn MessagingGateway>,
    clock: Arc<dyn Clock>,
    liveness_after: Duration,
    expire_after: Duration,
    scan_interval: std::time::Duration,
}

impl InactivityMonitor {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        gateway: Arc<dyn MessagingGateway>,
        clock: Arc<dyn Clock>,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            sessions,
            gateway,
            clock,
            liveness_after: Duration::seconds(config.liveness_secs as i64),
            expire_after: Duration::seconds(config.expiry_secs as i64),
            scan_interval: std::time::Duration::from_secs(config.scan_interval_secs),
        }
    }

    /// Runs scans forever at the configured interval. A failed scan is
    /// logged and the loop continues; sessions only grow stale, so the next
    /// scan covers for the missed one.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.scan_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                warn!(error = %e, "inactivity scan failed");
            }
        }
    }

    /// One scan over the current sessions. Public so tests can drive the
    /// monitor with a manual clock instead of real timers.
    pub async fn tick(&self) -> Result<(), TombolaError> {
        let scan_start = self.clock.now();
        let expiry_cutoff = scan_start - self.expire_after;

        for session in self.sessions.snapshot().await? {
            let idle = scan_start - session.last_activity_at;

            if idle >= self.expire_after {
                if self
                    .sessions
                    .delete_if_idle_since(&session.user_id, expiry_cutoff)
                    .await?
                {
                    info!(user_id = %session.user_id, "expired idle session");
                    if let Err(e) = self
                        .gateway
                        .send_text(&session.user_id, &messages::session_expired())
                        .await
                    {
                        warn!(user_id = %session.user_id, error = %e, "expiry notice failed");
                    }
                } else {
                    debug!(user_id = %session.user_id, "session refreshed during scan");
                }
            } else if idle >= self.liveness_after && !session.liveness_challenge_sent {
                // Mark before sending: a duplicate challenge is worse than
                // a missed one, and the expiry threshold backstops losses.
                self.sessions.mark_challenged(&session.user_id).await?;
                if let Err(e) = self
                    .gateway
                    .send_text(&session.user_id, &messages::liveness_challenge())
                    .await
                {
                    warn!(user_id = %session.user_id, error = %e, "liveness challenge failed");
                }
            }
        }
        Ok(())
    }
}
