// SPDX-FileCopyrightText: 2026 Tombola Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Digit extraction from free-form chat text.
//!
//! Users paste identity numbers and phone numbers with arbitrary
//! punctuation, country prefixes, and surrounding words. These helpers pull
//! the canonical value out or return `None`; they never guess beyond the
//! documented formats.

use std::sync::LazyLock;

use regex::Regex;

/// Venezuelan mobile carrier codes accepted in phone numbers.
const CARRIER_CODES: [&str; 5] = ["412", "414", "416", "424", "426"];

static IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{6,10}\b").unwrap_or_else(|e| panic!("identity regex: {e}"))
});

static MENU_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\d]*(\d+)").unwrap_or_else(|e| panic!("menu option regex: {e}"))
});

/// Extracts a national identity number: the first digit run of 6 to 10
/// digits bounded by non-digits. Falls back to concatenating every digit in
/// the text when no bounded run exists, requiring at least 6 and keeping at
/// most the first 10. A leading `/start` command is ignored.
pub fn extract_identity(text: &str) -> Option<String> {
    let text = text.replace("/start", "");

    if let Some(found) = IDENTITY_RE.find(&text) {
        return Some(found.as_str().to_string());
    }

    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 6 {
        let end = digits.len().min(10);
        return Some(digits[..end].to_string());
    }
    None
}

/// Extracts and normalizes a Venezuelan mobile number to its canonical
/// 12-digit international form, `58` followed by a carrier code and the
/// subscriber digits.
///
/// Everything but digits is stripped first, then the shape is classified:
/// - `58` + carrier + subscriber (12 or more digits, truncated to 12)
/// - `0` + carrier + subscriber (11 or more digits)
/// - carrier + subscriber (10 or more digits)
///
/// Anything with an unknown carrier code or too few digits is rejected.
/// Feeding the canonical output back in yields the same output.
pub fn extract_phone(text: &str) -> Option<String> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    if digits.len() < 10 {
        return None;
    }

    if let Some(rest) = digits.strip_prefix("58") {
        if digits.len() >= 12 && has_carrier_prefix(rest) {
            return Some(digits[..12].to_string());
        }
        return None;
    }

    if let Some(rest) = digits.strip_prefix('0') {
        if digits.len() >= 11 && has_carrier_prefix(rest) {
            return Some(format!("58{}", &rest[..10]));
        }
        return None;
    }

    if has_carrier_prefix(&digits) {
        return Some(format!("58{}", &digits[..10]));
    }

    None
}

/// Extracts a menu selection: the leading integer run (ignoring any
/// non-digit prefix), falling back to the first digit anywhere in the text.
/// Multi-digit runs that overflow `u8` count as no selection; the menus only
/// go up to 5 anyway.
pub fn extract_menu_option(text: &str) -> Option<u8> {
    if let Some(captures) = MENU_OPTION_RE.captures(text) {
        return captures[1].parse().ok();
    }
    text.chars()
        .find(char::is_ascii_digit)
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
}

fn has_carrier_prefix(digits: &str) -> bool {
    CARRIER_CODES.iter().any(|code| digits.starts_with(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_takes_first_bounded_run() {
        assert_eq!(extract_identity("mi cedula es 12345678"), Some("12345678".into()));
        assert_eq!(
            extract_identity("12345678 y tambien 87654321"),
            Some("12345678".into())
        );
        assert_eq!(extract_identity("/start 12345678"), Some("12345678".into()));
    }

    #[test]
    fn identity_falls_back_to_concatenated_digits() {
        // No bounded 6-10 run: digits broken up by punctuation.
        assert_eq!(extract_identity("12.345.678"), Some("12345678".into()));
        // Concatenation longer than 10 keeps the first 10.
        assert_eq!(
            extract_identity("123-456-789-012-3"),
            Some("1234567890".into())
        );
    }

    #[test]
    fn identity_rejects_short_input() {
        assert_eq!(extract_identity("12345"), None);
        assert_eq!(extract_identity("hola"), None);
        assert_eq!(extract_identity(""), None);
        assert_eq!(extract_identity("/start"), None);
    }

    #[test]
    fn phone_accepts_local_zero_prefix() {
        assert_eq!(extract_phone("0414-1234567"), Some("584141234567".into()));
        assert_eq!(extract_phone("(0424) 765 4321"), Some("584247654321".into()));
    }

    #[test]
    fn phone_accepts_international_prefix() {
        assert_eq!(extract_phone("584141234567"), Some("584141234567".into()));
        // Extra trailing digits are truncated to the canonical 12.
        assert_eq!(extract_phone("58414123456789"), Some("584141234567".into()));
    }

    #[test]
    fn phone_accepts_bare_carrier_prefix() {
        assert_eq!(extract_phone("4141234567"), Some("584141234567".into()));
        assert_eq!(extract_phone("414-123-4567"), Some("584141234567".into()));
    }

    #[test]
    fn phone_rejects_unknown_carriers_and_short_numbers() {
        assert_eq!(extract_phone("0411-1234567"), None);
        assert_eq!(extract_phone("58999-1234567"), None);
        assert_eq!(extract_phone("414123"), None);
        assert_eq!(extract_phone(""), None);
        // 58-prefixed but only 10 digits total.
        assert_eq!(extract_phone("5841412345"), None);
    }

    #[test]
    fn phone_extraction_is_idempotent() {
        let first = extract_phone("0414-1234567").unwrap();
        assert_eq!(extract_phone(&first), Some(first.clone()));
    }

    #[test]
    fn menu_option_prefers_leading_run() {
        assert_eq!(extract_menu_option("2"), Some(2));
        assert_eq!(extract_menu_option("  opcion 3"), Some(3));
        assert_eq!(extract_menu_option("quiero la 1 por favor"), Some(1));
        assert_eq!(extract_menu_option("nada"), None);
        assert_eq!(extract_menu_option(""), None);
    }
}
