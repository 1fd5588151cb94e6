// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tombola raffle bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Tombola configuration.
///
/// Loaded from TOML with environment variable overrides. All sections are
/// optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TombolaConfig {
    /// Registration flow behavior.
    #[serde(default)]
    pub flow: FlowConfig,

    /// Inactivity monitor thresholds.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Promoter contact card shared after registration. `None` disables it.
    #[serde(default)]
    pub contact: Option<ContactConfig>,
}

/// Registration flow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FlowConfig {
    /// Whether the flow collects a referring-agent id before issuing.
    ///
    /// Off: phone submission issues the ticket directly. On: an extra
    /// referrer step sits between the phone and issuance.
    #[serde(default)]
    pub collects_referrer: bool,

    /// Website link shown by the menu options.
    #[serde(default = "default_website_url")]
    pub website_url: String,

    /// Announcement channel link shown by the menu options.
    #[serde(default = "default_channel_url")]
    pub channel_url: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            collects_referrer: false,
            website_url: default_website_url(),
            channel_url: default_channel_url(),
        }
    }
}

fn default_website_url() -> String {
    "https://example.org".to_string()
}

fn default_channel_url() -> String {
    "https://t.me/example".to_string()
}

/// Inactivity monitor configuration.
///
/// The hard expiry must exceed the liveness threshold by at least the
/// response window; [`crate::validation::validate_config`] enforces this.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Seconds between monitor scans.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,

    /// Idle seconds after which the liveness challenge is sent.
    #[serde(default = "default_liveness_secs")]
    pub liveness_secs: u64,

    /// Seconds a challenged user gets to respond before hard expiry.
    #[serde(default = "default_response_window_secs")]
    pub response_window_secs: u64,

    /// Idle seconds after which the session is force-expired.
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval_secs(),
            liveness_secs: default_liveness_secs(),
            response_window_secs: default_response_window_secs(),
            expiry_secs: default_expiry_secs(),
        }
    }
}

fn default_scan_interval_secs() -> u64 {
    15
}

fn default_liveness_secs() -> u64 {
    180
}

fn default_response_window_secs() -> u64 {
    60
}

fn default_expiry_secs() -> u64 {
    300
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "tombola.db".to_string()
}

/// Contact card shared with registrants so they save the promoter's number.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub organization: String,
}
