//! Combine the three metric groups into consistency and confidence scores.

use chrono::{DateTime, Utc};

use super::detector::LandmarkDetector;
use super::types::{
    AiConfidence, AnatomicalConsistency, ConfidenceFactor, ConfidenceLevel, DetectedIssue,
    IssueCategory, ScoreBreakdown, Severity, ValidationCfg, ValidationResult,
};
use crate::anatomy::{
    calculate_proportions, calculate_symmetry, validate_flap_position, FaceLandmarks, ImageDims,
};
use crate::score::to_score;
use crate::suggestion::{FlapSuggestion, VisionSummary};

const W_SYMMETRY: f64 = 0.3;
const W_PROPORTIONS: f64 = 0.3;
const W_POSITION: f64 = 0.4;
const W_CONSISTENCY: f64 = 0.7;
const W_SUITABILITY: f64 = 0.3;

/// Remediation attached to every flap-position issue.
pub const POSITION_REMEDIATION: &str =
    "Review the flap position and request a redraw if needed";

/// Detect landmarks, then validate. Detector failure (`None`) is the null-landmark baseline.
pub fn validate_flap_drawing<D>(
    detector: &D,
    image: &D::Image,
    dims: ImageDims,
    suggestion: &FlapSuggestion,
    vision: &VisionSummary,
    cfg: &ValidationCfg,
) -> ValidationResult
where
    D: LandmarkDetector + ?Sized,
{
    let landmarks = detector.detect(image, dims);
    if landmarks.is_none() {
        tracing::info!(flap = %suggestion.flap_name, "no landmarks, using baseline scores");
    }
    validate_with_landmarks(landmarks, dims, suggestion, vision, cfg, Utc::now())
}

/// Pure validation over already-detected landmarks, stamped with `validated_at`.
pub fn validate_with_landmarks(
    landmarks: Option<FaceLandmarks>,
    dims: ImageDims,
    suggestion: &FlapSuggestion,
    vision: &VisionSummary,
    cfg: &ValidationCfg,
    validated_at: DateTime<Utc>,
) -> ValidationResult {
    let symmetry = calculate_symmetry(landmarks.as_ref(), dims);
    let proportions = calculate_proportions(landmarks.as_ref(), dims);
    let flap_position = validate_flap_position(
        suggestion.flap_drawing.as_ref(),
        vision.defect_location.as_ref(),
        &vision.critical_structures,
        &vision.critical_regions,
        &cfg.position,
    );

    let breakdown = ScoreBreakdown {
        symmetry: symmetry.overall_symmetry,
        proportions: proportions.overall_proportion,
        flap_position: flap_position.overall_position,
    };
    let consistency = to_score(
        f64::from(breakdown.symmetry) * W_SYMMETRY
            + f64::from(breakdown.proportions) * W_PROPORTIONS
            + f64::from(breakdown.flap_position) * W_POSITION,
    );
    // Blend the raw suitability; only the final sum is rounded.
    let raw_suitability = if suggestion.suitability_score.is_nan() {
        0.0
    } else {
        suggestion.suitability_score.clamp(0.0, 100.0)
    };
    let suitability = to_score(raw_suitability);
    let confidence =
        to_score(f64::from(consistency) * W_CONSISTENCY + raw_suitability * W_SUITABILITY);

    let tag = |messages: &[String], severity, category, suggestion: Option<&str>| {
        messages
            .iter()
            .map(move |m| DetectedIssue {
                severity,
                category,
                message: m.clone(),
                suggestion: suggestion.map(str::to_string),
            })
            .collect::<Vec<_>>()
    };
    let mut detected_issues = tag(&symmetry.issues, Severity::Medium, IssueCategory::Symmetry, None);
    detected_issues.extend(tag(
        &proportions.issues,
        Severity::Low,
        IssueCategory::Proportion,
        None,
    ));
    detected_issues.extend(tag(
        &flap_position.issues,
        Severity::High,
        IssueCategory::Position,
        Some(POSITION_REMEDIATION),
    ));

    tracing::debug!(
        consistency,
        confidence,
        issues = detected_issues.len(),
        "flap drawing validated"
    );

    ValidationResult {
        anatomical_consistency: AnatomicalConsistency {
            score: consistency,
            symmetry,
            proportions,
            flap_position,
            breakdown,
        },
        ai_confidence: AiConfidence {
            score: confidence,
            level: ConfidenceLevel::from_score(confidence),
            factors: vec![
                ConfidenceFactor {
                    name: "Anatomical consistency".to_string(),
                    score: consistency,
                    weight: W_CONSISTENCY,
                },
                ConfidenceFactor {
                    name: "Flap suitability score".to_string(),
                    score: suitability,
                    weight: W_SUITABILITY,
                },
            ],
        },
        detected_issues,
        landmarks,
        validated_at,
    }
}
