//! Validation utilities for the CropSight Diagnosis Platform

use std::str::FromStr;

use crate::knowledge::CropType;

/// Validate a phone number for OTP delivery.
///
/// Accepts digits with an optional leading +, ignoring spaces and dashes:
/// 0812345678, +919876543210, 081-234-5678.
pub fn validate_phone_number(phone: &str) -> Result<(), &'static str> {
    let trimmed = phone.trim();
    let without_plus = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = without_plus
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone number must contain only digits");
    }
    if digits.len() < 10 {
        return Err("Phone number must have at least 10 digits");
    }
    if digits.len() > 15 {
        return Err("Phone number must have at most 15 digits");
    }
    Ok(())
}

/// Normalize a phone number to its digit form (with leading + preserved)
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Validate a one-time password: exactly 6 digits
pub fn validate_otp_code(code: &str) -> Result<(), &'static str> {
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("OTP must be exactly 6 digits");
    }
    Ok(())
}

/// Parse and validate a crop category identifier from form input
pub fn parse_crop_type(value: &str) -> Result<CropType, &'static str> {
    CropType::from_str(&value.trim().to_lowercase())
}
