//! Integration tests for the diagnosis core

use proptest::prelude::*;
use shared::diagnosis::{
    compose_environmental_impact, infer_confidence, infer_severity, match_disease,
};
use shared::knowledge::{diseases_for, CropType};
use shared::types::{EnvironmentalReadings, Severity};

fn any_crop() -> impl Strategy<Value = CropType> {
    proptest::sample::select(&CropType::ALL[..])
}

proptest! {
    /// The matched record always comes from the crop's own disease list
    #[test]
    fn matched_disease_belongs_to_crop(crop in any_crop(), description in ".{0,200}") {
        let disease = match_disease(crop, &description).unwrap();
        prop_assert!(diseases_for(crop)
            .iter()
            .any(|d| std::ptr::eq(d, disease)));
    }

    /// Matching never depends on letter case
    #[test]
    fn matching_is_case_insensitive(crop in any_crop(), description in "[a-zA-Z ]{0,100}") {
        let lower = match_disease(crop, &description.to_lowercase()).unwrap();
        let upper = match_disease(crop, &description.to_uppercase()).unwrap();
        prop_assert_eq!(lower.name, upper.name);
    }

    /// Confidence is always one of the four defined levels
    #[test]
    fn confidence_stays_in_defined_levels(description in ".{0,200}") {
        let confidence = infer_confidence(&description);
        prop_assert!([65u8, 75, 85, 95].contains(&confidence));
    }

    /// Severity inference is deterministic
    #[test]
    fn severity_is_deterministic(description in ".{0,200}") {
        prop_assert_eq!(infer_severity(&description), infer_severity(&description));
    }
}

#[test]
fn test_each_crop_matches_its_own_diseases() {
    for crop in CropType::ALL {
        for expected in diseases_for(crop) {
            // A description containing every keyword must win the match
            let description = expected.keywords.join(" ");
            let matched = match_disease(crop, &description).unwrap();
            assert_eq!(matched.name, expected.name, "crop {}", crop);
        }
    }
}

#[test]
fn test_tied_scores_keep_knowledge_base_order() {
    // One keyword from each wheat record scores both at 1
    let matched = match_disease(CropType::Wheat, "rust with a white tint").unwrap();
    assert_eq!(matched.name, "Leaf Rust");
}

#[test]
fn test_no_keyword_hit_falls_back_to_first_record() {
    let matched = match_disease(CropType::Corn, "nothing notable visible").unwrap();
    assert_eq!(matched.name, "Northern Corn Leaf Blight");
}

#[test]
fn test_full_diagnosis_pipeline() {
    let description = "Severe orange rust pustules, clearly an advanced infection";

    let disease = match_disease(CropType::Wheat, description).unwrap();
    let severity = infer_severity(description);
    let confidence = infer_confidence(description);

    assert_eq!(disease.name, "Leaf Rust");
    assert_eq!(severity, Severity::High);
    assert_eq!(confidence, 95);

    let readings = EnvironmentalReadings {
        temperature: Some(rust_decimal::Decimal::from(28)),
        ..Default::default()
    };
    let impact = compose_environmental_impact(disease.name, severity, &readings);
    assert_eq!(
        impact,
        "Current conditions (Temperature: 28°C) create favorable conditions for Leaf Rust development"
    );
}

#[test]
fn test_severity_markers_precedence() {
    // A description with both high and low markers resolves high
    assert_eq!(
        infer_severity("extensive damage from an early infection"),
        Severity::High
    );
    assert_eq!(infer_severity("minor spotting"), Severity::Low);
    assert_eq!(infer_severity("some spotting"), Severity::Medium);
}

#[test]
fn test_confidence_marker_precedence() {
    assert_eq!(infer_confidence("definitely blight, possibly advanced"), 95);
    assert_eq!(infer_confidence("likely blight, possibly advanced"), 85);
    assert_eq!(infer_confidence("possibly blight"), 65);
    assert_eq!(infer_confidence("blight present"), 75);
}

#[test]
fn test_impact_sentence_without_readings() {
    let impact = compose_environmental_impact(
        "Rice Blast",
        Severity::High,
        &EnvironmentalReadings::default(),
    );
    assert_eq!(
        impact,
        "Environmental conditions may contribute to Rice Blast development"
    );
}
