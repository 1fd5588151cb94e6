// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config loading and validation.

use tombola_config::{load_and_validate_str, load_config_from_str};

#[test]
fn empty_config_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert!(!config.flow.collects_referrer);
    assert_eq!(config.monitor.expiry_secs, 300);
    assert_eq!(config.storage.database_path, "tombola.db");
}

#[test]
fn full_config_round_trips() {
    let config = load_config_from_str(
        r#"
[flow]
collects_referrer = true
website_url = "https://tombola.example"
channel_url = "https://t.me/tombola"

[monitor]
scan_interval_secs = 5
liveness_secs = 60
response_window_secs = 30
expiry_secs = 120

[storage]
database_path = "/var/lib/tombola/tombola.db"

[contact]
phone = "584121112233"
first_name = "Tombola"
last_name = "Soporte"
"#,
    )
    .unwrap();

    assert!(config.flow.collects_referrer);
    assert_eq!(config.monitor.liveness_secs, 60);
    assert_eq!(config.storage.database_path, "/var/lib/tombola/tombola.db");
    assert_eq!(config.contact.unwrap().phone, "584121112233");
}

#[test]
fn validation_rejects_inverted_thresholds() {
    let result = load_and_validate_str(
        r#"
[monitor]
liveness_secs = 300
expiry_secs = 180
"#,
    );
    assert!(result.is_err());
}

#[test]
fn unknown_section_key_is_a_parse_error() {
    let result = load_config_from_str(
        r#"
[monitor]
liveness_seconds = 60
"#,
    );
    assert!(result.is_err());
}
