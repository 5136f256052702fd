//! Minimal phone normalization for the default (Nigerian) numbering plan.
//!
//! Full validation is an external concern; this only produces a stable
//! E.164 string and the conversation key derived from it.

use crate::error::CoreError;

/// Country calling code assumed for numbers without an international prefix.
pub const DEFAULT_COUNTRY_CODE: &str = "234";

/// Normalize a raw phone number to E.164 (`+2348012345678`).
pub fn normalize(raw: &str) -> Result<String, CoreError> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    let digits = if let Some(rest) = compact.strip_prefix('+') {
        rest.to_string()
    } else if let Some(rest) = compact.strip_prefix("00") {
        rest.to_string()
    } else if compact.starts_with(DEFAULT_COUNTRY_CODE) && compact.len() == 13 {
        compact.clone()
    } else if let Some(rest) = compact.strip_prefix('0')
        && compact.len() == 11
    {
        format!("{DEFAULT_COUNTRY_CODE}{rest}")
    } else if compact.len() == 10 {
        format!("{DEFAULT_COUNTRY_CODE}{compact}")
    } else {
        return Err(CoreError::InvalidPhone(raw.to_string()));
    };

    if !(8..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidPhone(raw.to_string()));
    }

    Ok(format!("+{digits}"))
}

/// Derive the conversation key: the E.164 number without `+` and without the
/// leading default country code.
pub fn conversation_key(e164: &str) -> String {
    let digits = e164.trim().trim_start_matches('+');
    digits
        .strip_prefix(DEFAULT_COUNTRY_CODE)
        .unwrap_or(digits)
        .to_string()
}
