// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Tombola raffle bot.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), environment variable overrides, and miette
//! diagnostic errors.
//!
//! # Usage
//!
//! ```no_run
//! use tombola_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("collects referrer: {}", config.flow.collects_referrer);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ContactConfig, FlowConfig, MonitorConfig, StorageConfig, TombolaConfig};

/// Load configuration from the standard locations and validate it.
pub fn load_and_validate() -> Result<TombolaConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.into()]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TombolaConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.into()]),
    }
}
