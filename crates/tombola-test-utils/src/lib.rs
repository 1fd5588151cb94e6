// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tombola integration tests.
//!
//! Provides mock adapters and fixtures for fast, deterministic, CI-runnable
//! tests without external services.
//!
//! # Components
//!
//! - [`MockGateway`] - messaging gateway that captures sends instead of
//!   delivering them, with a failure toggle
//! - [`ManualClock`] - hand-cranked [`tombola_core::Clock`] for monitor tests
//! - [`fixtures`] - temp-dir SQLite databases and seed helpers

pub mod fixtures;
pub mod manual_clock;
pub mod mock_gateway;

pub use fixtures::{open_temp_db, sample_precinct, seed_elector, seed_referrer};
pub use manual_clock::ManualClock;
pub use mock_gateway::{MockGateway, SentMessage};
