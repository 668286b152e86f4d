//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 with at least a country code and a subscriber number
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Format a stored phone number for SMS delivery under a default country code
///
/// Numbers that already carry a `+` are kept as they are. Local numbers lose
/// their trunk `0`, and the country code is prepended unless already present.
///
/// ```
/// use th_shared::utils::phone::format_with_country_code;
///
/// assert_eq!(format_with_country_code("234", "08031234567"), "+2348031234567");
/// assert_eq!(format_with_country_code("234", "+2348031234567"), "+2348031234567");
/// ```
pub fn format_with_country_code(country_code: &str, phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.starts_with('+') {
        return normalized;
    }

    let country_code = country_code.trim_start_matches('+');
    if let Some(local) = normalized.strip_prefix('0') {
        return format!("+{}{}", country_code, local);
    }
    if !country_code.is_empty() && normalized.starts_with(country_code) && normalized.len() > 10 {
        return format!("+{}", normalized);
    }

    format!("+{}{}", country_code, normalized)
}

/// Mask a phone number for display (e.g., 803****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
