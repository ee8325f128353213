//! WebAssembly module for CropSight Diagnosis Platform
//!
//! Provides client-side computation for:
//! - Disease matching against the bundled knowledge base
//! - Severity and confidence inference from description text
//! - Offline form validation (phone numbers, OTP codes, crop types)

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::knowledge::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::diagnosis::{
    compose_environmental_impact, infer_confidence, infer_severity, match_disease,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Run the full offline diagnosis for a crop and description.
/// Returns the diagnosis as a JSON string.
#[wasm_bindgen]
pub fn diagnose_description(crop: &str, description: &str) -> Result<String, JsValue> {
    diagnose(crop, description).map_err(|e| JsValue::from_str(&e))
}

// JsValue is not constructible outside a wasm runtime, so the fallible
// logic stays in plain-Rust functions the wrappers delegate to.
fn diagnose(crop: &str, description: &str) -> Result<String, String> {
    let crop = parse_crop_type(crop).map_err(String::from)?;
    let disease = match_disease(crop, description)
        .ok_or_else(|| "No disease records for this crop".to_string())?;

    let severity = infer_severity(description);
    let confidence = infer_confidence(description);

    let diagnosis = serde_json::json!({
        "disease_name": disease.name,
        "severity": severity,
        "confidence": confidence,
        "symptoms": disease.symptoms,
        "causes": disease.causes,
        "treatment": disease.treatment,
    });

    serde_json::to_string(&diagnosis).map_err(|e| format!("Serialization failed: {}", e))
}

/// Infer severity from description text
#[wasm_bindgen]
pub fn assess_severity(description: &str) -> String {
    infer_severity(description).to_string()
}

/// Infer confidence percentage from description text
#[wasm_bindgen]
pub fn assess_confidence(description: &str) -> u8 {
    infer_confidence(description)
}

/// Compose the environmental-impact sentence from JSON readings
#[wasm_bindgen]
pub fn describe_environmental_impact(
    disease_name: &str,
    severity: &str,
    readings_json: &str,
) -> Result<String, JsValue> {
    environmental_impact(disease_name, severity, readings_json).map_err(|e| JsValue::from_str(&e))
}

fn environmental_impact(
    disease_name: &str,
    severity: &str,
    readings_json: &str,
) -> Result<String, String> {
    let severity: Severity = severity.parse().map_err(String::from)?;
    let readings: EnvironmentalReadings = serde_json::from_str(readings_json)
        .map_err(|e| format!("Invalid readings JSON: {}", e))?;

    Ok(compose_environmental_impact(disease_name, severity, &readings))
}

/// Validate a phone number for OTP delivery
#[wasm_bindgen]
pub fn is_valid_phone_number(phone: &str) -> bool {
    validate_phone_number(phone).is_ok()
}

/// Validate a 6-digit OTP code
#[wasm_bindgen]
pub fn is_valid_otp_code(code: &str) -> bool {
    validate_otp_code(code).is_ok()
}

/// Supported crop identifiers as a JSON array
#[wasm_bindgen]
pub fn supported_crops() -> String {
    let crops: Vec<&str> = CropType::ALL.iter().map(|c| c.as_str()).collect();
    serde_json::to_string(&crops).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnose_description() {
        let json = diagnose("wheat", "severe orange rust pustules").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["disease_name"], "Leaf Rust");
        assert_eq!(value["severity"], "high");
        assert_eq!(value["confidence"], 75);
    }

    #[test]
    fn test_diagnose_rejects_unknown_crop() {
        // Must stay off the JsValue wrapper: these tests run natively
        assert!(diagnose("banana", "spots").is_err());
    }

    #[test]
    fn test_assess_severity() {
        assert_eq!(assess_severity("mild spotting"), "low");
        assert_eq!(assess_severity("extensive damage"), "high");
        assert_eq!(assess_severity("some lesions"), "medium");
    }

    #[test]
    fn test_assess_confidence() {
        assert_eq!(assess_confidence("definitely rust"), 95);
        assert_eq!(assess_confidence("no marker"), 75);
    }

    #[test]
    fn test_describe_environmental_impact() {
        let sentence =
            environmental_impact("Leaf Rust", "high", r#"{"temperature":"30"}"#).unwrap();
        assert_eq!(
            sentence,
            "Current conditions (Temperature: 30°C) create favorable conditions for Leaf Rust development"
        );
    }

    #[test]
    fn test_environmental_impact_rejects_bad_input() {
        assert!(environmental_impact("Leaf Rust", "critical", "{}").is_err());
        assert!(environmental_impact("Leaf Rust", "high", "not json").is_err());
    }

    #[test]
    fn test_phone_and_otp_validation() {
        assert!(is_valid_phone_number("0812345678"));
        assert!(!is_valid_phone_number("12345"));
        assert!(is_valid_otp_code("123456"));
        assert!(!is_valid_otp_code("12345"));
    }

    #[test]
    fn test_supported_crops() {
        let crops: Vec<String> = serde_json::from_str(&supported_crops()).unwrap();
        assert_eq!(crops, ["wheat", "rice", "corn", "tomato", "potato"]);
    }
}
