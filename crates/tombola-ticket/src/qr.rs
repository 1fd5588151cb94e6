// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QR payload codec.
//!
//! The payload is a flat JSON document embedded in a 2-D barcode at medium
//! error correction. Field names are load-bearing: previously-issued tickets
//! are never re-encoded, so renaming a field would orphan every QR already
//! in the wild. The encoder is deterministic -- the same input always yields
//! the same payload bytes -- which lets tests assert on the decoded payload
//! instead of pixels.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use tombola_core::{Precinct, TombolaError};

/// The structured record embedded in a ticket's QR image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    pub ticket_number: String,
    pub identity_number: String,
    pub full_name: String,
    pub phone: String,
    pub precinct_state: String,
    pub precinct_municipality: String,
    pub precinct_parish: String,
    pub referrer_id: i64,
}

impl QrPayload {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ticket_number: &str,
        identity_number: &str,
        full_name: &str,
        phone: &str,
        precinct: &Precinct,
        referrer_id: i64,
    ) -> Self {
        Self {
            ticket_number: ticket_number.to_string(),
            identity_number: identity_number.to_string(),
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            precinct_state: precinct.state.clone(),
            precinct_municipality: precinct.municipality.clone(),
            precinct_parish: precinct.parish.clone(),
            referrer_id,
        }
    }

    /// Serializes the payload to its canonical JSON form.
    ///
    /// Struct field order fixes the key order, so output is stable.
    pub fn to_json(&self) -> Result<String, TombolaError> {
        serde_json::to_string(self)
            .map_err(|e| TombolaError::Internal(format!("qr payload serialization: {e}")))
    }

    /// Parses a payload back from its JSON form. Not needed at runtime by
    /// the flow; tests and support tooling use it.
    pub fn from_json(json: &str) -> Result<Self, TombolaError> {
        serde_json::from_str(json)
            .map_err(|e| TombolaError::Internal(format!("qr payload deserialization: {e}")))
    }

    /// Renders the payload as an SVG QR image at medium error correction.
    pub fn render_image(&self) -> Result<Vec<u8>, TombolaError> {
        let json = self.to_json()?;
        let code = QrCode::with_error_correction_level(json.as_bytes(), EcLevel::M)
            .map_err(|e| TombolaError::Internal(format!("qr encoding: {e}")))?;
        let image = code
            .render()
            .min_dimensions(240, 240)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        Ok(image.into_bytes())
    }

    /// Base64 of the rendered image, the form persisted on the ticket row.
    pub fn encode(&self) -> Result<String, TombolaError> {
        Ok(BASE64.encode(self.render_image()?))
    }
}

/// Decodes a persisted `qr_payload` column back into raw image bytes for
/// re-sending to a user who lost their ticket.
pub fn decode_image(qr_payload: &str) -> Result<Vec<u8>, TombolaError> {
    BASE64
        .decode(qr_payload)
        .map_err(|e| TombolaError::Internal(format!("stored qr payload is not base64: {e}")))
}
