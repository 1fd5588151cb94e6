// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as the ordering of the inactivity thresholds.

use crate::diagnostic::ConfigError;
use crate::model::TombolaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TombolaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.monitor.scan_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "monitor.scan_interval_secs must be at least 1".to_string(),
        });
    }

    // The hard expiry must leave the challenged user a full response window.
    let floor = config.monitor.liveness_secs + config.monitor.response_window_secs;
    if config.monitor.expiry_secs < floor {
        errors.push(ConfigError::Validation {
            message: format!(
                "monitor.expiry_secs must be at least liveness_secs + response_window_secs \
                 ({floor}), got {}",
                config.monitor.expiry_secs
            ),
        });
    }

    if config.flow.website_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "flow.website_url must not be empty".to_string(),
        });
    }

    if let Some(contact) = &config.contact {
        if contact.phone.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "contact.phone must not be empty when [contact] is set".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
