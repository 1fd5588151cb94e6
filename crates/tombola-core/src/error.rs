// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tombola registration core.

use thiserror::Error;

/// The primary error type used across all Tombola adapter traits and core operations.
#[derive(Debug, Error)]
pub enum TombolaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A storage-level uniqueness constraint was violated on insert.
    ///
    /// Surfaced separately from [`TombolaError::Storage`] because the ticket
    /// issuance engine treats it as a concurrent-registration race, not a
    /// fatal error.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Messaging gateway errors (send failure, connection loss, rate limiting).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Identity registry errors (electoral roll lookup failed or timed out).
    #[error("registry error: {message}")]
    Registry {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_names_constraint() {
        let err = TombolaError::UniqueViolation {
            constraint: "tickets.identity_number".into(),
        };
        assert!(err.to_string().contains("tickets.identity_number"));
    }

    #[test]
    fn storage_error_wraps_source() {
        let err = TombolaError::Storage {
            source: Box::new(std::io::Error::other("disk gone")),
        };
        assert!(err.to_string().contains("disk gone"));
    }
}
