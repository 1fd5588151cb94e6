// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order: compiled defaults, then `./tombola.toml`, then `TOMBOLA_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TombolaConfig;

/// Load configuration from `./tombola.toml` with env var overrides.
pub fn load_config() -> Result<TombolaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TombolaConfig::default()))
        .merge(Toml::file("tombola.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file or env lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TombolaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TombolaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TombolaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TombolaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TOMBOLA_MONITOR_LIVENESS_SECS` must map
/// to `monitor.liveness_secs`, not `monitor.liveness.secs`.
fn env_provider() -> Env {
    Env::prefixed("TOMBOLA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("flow_", "flow.", 1)
            .replacen("monitor_", "monitor.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("contact_", "contact.", 1);
        mapped.into()
    })
}
