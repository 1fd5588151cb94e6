// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error type with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error, renderable as a miette diagnostic.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// Figment failed to deserialize the configuration.
    #[error("configuration parse error: {message}")]
    #[diagnostic(
        code(tombola::config::parse),
        help("check tombola.toml against the documented keys")
    )]
    Parse {
        /// Figment's description of the failure.
        message: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(tombola::config::validation))]
    Validation { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

/// Render a list of config errors to a single human-readable report.
pub fn render_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("error: {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
