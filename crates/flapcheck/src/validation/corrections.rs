//! Correction suggestions derived from a validation result, and their
//! automatic application to a flap drawing.

use serde::{Deserialize, Serialize};

use super::types::{Severity, ValidationResult};
use crate::anatomy::FaceDivision;
use crate::geom2::{scale_about, translate, Point};
use crate::suggestion::FlapSuggestion;

const SYMMETRY_THRESHOLD: u8 = 70;
const PROPORTION_THRESHOLD: u8 = 70;
const COVERAGE_THRESHOLD: f64 = 80.0;
const TARGET_COVERAGE: f64 = 95.0;
const DEFAULT_SIZE_INCREASE: f64 = 1.2;
/// Only suggestions at or above this confidence are applied automatically.
const APPLY_MIN_CONFIDENCE: u8 = 80;
/// Scaling origin, the middle of the normalized canvas.
const CANVAS_CENTER: Point = Point { x: 500.0, y: 500.0 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionKind {
    Position,
    Size,
    Angle,
    Coverage,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "details", rename_all = "snake_case")]
pub enum SuggestedChange {
    #[serde(rename_all = "camelCase")]
    AdjustPosition {
        horizontal_tilt: f64,
        recommended_adjustment: f64,
    },
    #[serde(rename_all = "camelCase")]
    ReviewSize { face_division: FaceDivision },
    #[serde(rename_all = "camelCase")]
    IncreaseCoverage {
        current_coverage: f64,
        target_coverage: f64,
        recommended_size_increase: f64,
    },
    #[serde(rename_all = "camelCase")]
    RelocateDonor { current_issues: Vec<String> },
    #[serde(rename_all = "camelCase")]
    AvoidStructures { overlapped_structures: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionSuggestion {
    #[serde(rename = "type")]
    pub kind: CorrectionKind,
    pub severity: Severity,
    pub description: String,
    pub suggested_change: SuggestedChange,
    pub confidence: u8,
}

impl CorrectionSuggestion {
    fn applies_automatically(&self) -> bool {
        self.severity == Severity::High && self.confidence >= APPLY_MIN_CONFIDENCE
    }
}

/// Derive corrective actions from the weak spots of a validation result.
pub fn generate_correction_suggestions(result: &ValidationResult) -> Vec<CorrectionSuggestion> {
    let ac = &result.anatomical_consistency;
    let mut out = Vec::new();

    if ac.symmetry.overall_symmetry < SYMMETRY_THRESHOLD {
        out.push(CorrectionSuggestion {
            kind: CorrectionKind::Position,
            severity: Severity::Medium,
            description: "Facial symmetry is compromised; align the flap with the facial midline."
                .to_string(),
            suggested_change: SuggestedChange::AdjustPosition {
                horizontal_tilt: ac.symmetry.horizontal_tilt,
                recommended_adjustment: -ac.symmetry.horizontal_tilt * 0.5,
            },
            confidence: 75,
        });
    }

    if ac.proportions.overall_proportion < PROPORTION_THRESHOLD {
        out.push(CorrectionSuggestion {
            kind: CorrectionKind::Size,
            severity: Severity::Low,
            description: "Facial proportions deviate from the ideal; review the flap size."
                .to_string(),
            suggested_change: SuggestedChange::ReviewSize {
                face_division: ac.proportions.face_division,
            },
            confidence: 60,
        });
    }

    let fp = &ac.flap_position;
    if fp.defect_coverage < COVERAGE_THRESHOLD {
        out.push(CorrectionSuggestion {
            kind: CorrectionKind::Coverage,
            severity: Severity::High,
            description:
                "Flap does not cover the defect sufficiently; adjust the flap size or position."
                    .to_string(),
            suggested_change: SuggestedChange::IncreaseCoverage {
                current_coverage: fp.defect_coverage,
                target_coverage: TARGET_COVERAGE,
                recommended_size_increase: DEFAULT_SIZE_INCREASE,
            },
            confidence: 85,
        });
    }

    if !fp.donor_position.correct {
        out.push(CorrectionSuggestion {
            kind: CorrectionKind::Position,
            severity: Severity::High,
            description: "Donor site is misplaced; choose an anatomically suitable donor region."
                .to_string(),
            suggested_change: SuggestedChange::RelocateDonor {
                current_issues: fp.donor_position.issues.clone(),
            },
            confidence: 90,
        });
    }

    if fp.critical_structure_overlap.has_overlap {
        out.push(CorrectionSuggestion {
            kind: CorrectionKind::Position,
            severity: Severity::High,
            description: "Flap overlaps critical structures; move it.".to_string(),
            suggested_change: SuggestedChange::AvoidStructures {
                overlapped_structures: fp.critical_structure_overlap.overlapped_structures.clone(),
            },
            confidence: 95,
        });
    }

    out
}

/// Apply high-severity, high-confidence corrections to a copy of `suggestion`.
///
/// Coverage corrections scale every flap area about the canvas centre;
/// position corrections shift flap areas horizontally by the recommended
/// adjustment (zero when the change carries none). Other kinds are advisory.
pub fn apply_corrections(
    suggestion: &FlapSuggestion,
    corrections: &[CorrectionSuggestion],
) -> FlapSuggestion {
    let mut corrected = suggestion.clone();
    let Some(drawing) = corrected.flap_drawing.as_mut() else {
        return corrected;
    };

    for c in corrections.iter().filter(|c| c.applies_automatically()) {
        match c.kind {
            CorrectionKind::Coverage => {
                let factor = match c.suggested_change {
                    SuggestedChange::IncreaseCoverage {
                        recommended_size_increase: f,
                        ..
                    } if f.is_finite() && f > 0.0 => f,
                    _ => DEFAULT_SIZE_INCREASE,
                };
                for area in &mut drawing.flap_areas {
                    area.points = scale_about(&area.points, CANVAS_CENTER, factor);
                }
            }
            CorrectionKind::Position => {
                let dx = match c.suggested_change {
                    SuggestedChange::AdjustPosition {
                        recommended_adjustment,
                        ..
                    } => recommended_adjustment,
                    _ => 0.0,
                };
                if dx != 0.0 {
                    for area in &mut drawing.flap_areas {
                        area.points = translate(&area.points, dx, 0.0);
                    }
                }
            }
            CorrectionKind::Size | CorrectionKind::Angle => {}
        }
        tracing::debug!(kind = ?c.kind, "correction applied");
    }
    corrected
}
