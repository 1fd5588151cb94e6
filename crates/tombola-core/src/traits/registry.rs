// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity registry trait: lookups against the pre-loaded electoral roll.

use async_trait::async_trait;

use crate::error::TombolaError;
use crate::types::IdentityRecord;

/// Read-only lookups against the electoral roll.
///
/// The core never creates or mutates identity records; a miss is a normal
/// outcome (`Ok(None)`), while `Err` means the collaborator itself failed.
#[async_trait]
pub trait IdentityRegistry: Send + Sync {
    /// Returns the identity record for a national identity number, if the
    /// number exists in the roll.
    async fn verify(
        &self,
        identity_number: &str,
    ) -> Result<Option<IdentityRecord>, TombolaError>;
}
