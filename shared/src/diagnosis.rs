//! Diagnosis core: keyword matching and heuristic inference
//!
//! All functions here are pure and synchronous. They operate on the static
//! knowledge base and a free-text description obtained from the vision
//! model, so they can be called concurrently without coordination.

use crate::knowledge::{diseases_for, CropType, DiseaseRecord};
use crate::types::{EnvironmentalReadings, Severity};

/// Phrases that mark a high-severity description
const HIGH_SEVERITY_MARKERS: &[&str] = &["severe", "extensive", "critical"];

/// Phrases that mark a low-severity description
const LOW_SEVERITY_MARKERS: &[&str] = &["mild", "minor", "early"];

/// Confidence marker phrases, highest certainty first
const HIGH_CONFIDENCE_MARKERS: &[&str] = &["definitely", "clearly"];
const MEDIUM_CONFIDENCE_MARKERS: &[&str] = &["likely", "appears to be"];
const LOW_CONFIDENCE_MARKERS: &[&str] = &["possibly", "may be"];

pub const DEFAULT_CONFIDENCE: u8 = 75;

/// Select the best-matching disease record for a crop.
///
/// Scores each record by counting its keywords that occur as substrings of
/// the lowercased description. A record replaces the running best only on a
/// strictly higher score, so ties keep the earlier record. With no keyword
/// hits at all the crop's first record is returned.
///
/// Returns `None` when the crop has no knowledge-base records; callers must
/// surface that as an unsupported-crop failure rather than guessing.
pub fn match_disease(crop: CropType, description: &str) -> Option<&'static DiseaseRecord> {
    let diseases = diseases_for(crop);
    let description = description.to_lowercase();

    let mut best_match = diseases.first()?;
    let mut highest_score = 0;

    for disease in diseases {
        let score = disease
            .keywords
            .iter()
            .filter(|kw| description.contains(*kw))
            .count();
        if score > highest_score {
            highest_score = score;
            best_match = disease;
        }
    }

    Some(best_match)
}

/// Derive a severity label from the model description.
///
/// High markers are checked before low markers, so a description containing
/// both resolves to high. No marker at all stays at the medium default.
pub fn infer_severity(description: &str) -> Severity {
    let text = description.to_lowercase();
    if HIGH_SEVERITY_MARKERS.iter().any(|m| text.contains(m)) {
        Severity::High
    } else if LOW_SEVERITY_MARKERS.iter().any(|m| text.contains(m)) {
        Severity::Low
    } else {
        Severity::Medium
    }
}

/// Derive a confidence percentage from the model description.
///
/// First matching marker group wins, strongest first; a description with no
/// marker keeps the 75 default.
pub fn infer_confidence(description: &str) -> u8 {
    let text = description.to_lowercase();
    if HIGH_CONFIDENCE_MARKERS.iter().any(|m| text.contains(m)) {
        95
    } else if MEDIUM_CONFIDENCE_MARKERS.iter().any(|m| text.contains(m)) {
        85
    } else if LOW_CONFIDENCE_MARKERS.iter().any(|m| text.contains(m)) {
        65
    } else {
        DEFAULT_CONFIDENCE
    }
}

/// Compose the environmental-impact sentence for a diagnosis.
///
/// With no readings supplied the sentence references only the disease name.
pub fn compose_environmental_impact(
    disease_name: &str,
    severity: Severity,
    readings: &EnvironmentalReadings,
) -> String {
    let parts = readings.format_parts();
    if parts.is_empty() {
        return format!(
            "Environmental conditions may contribute to {} development",
            disease_name
        );
    }

    let qualifier = match severity {
        Severity::High => "create favorable conditions",
        Severity::Medium => "moderately support",
        Severity::Low => "minimally affect",
    };

    format!(
        "Current conditions ({}) {} for {} development",
        parts.join(", "),
        qualifier,
        disease_name
    )
}
