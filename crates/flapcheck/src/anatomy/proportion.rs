//! Facial proportions: vertical thirds, eye spacing and a golden-ratio slot.
//!
//! Ratios are computed on a fixed 1000-unit face scale, independent of the
//! image size, since landmarks are already normalized.

use serde::{Deserialize, Serialize};

use super::landmarks::{FaceLandmarks, ImageDims, NORMALIZED_EXTENT};
use super::LANDMARKS_NOT_DETECTED;
use crate::score::to_score;

const IDEAL_THIRD: f64 = 0.33;
const MAX_THIRDS_DEVIATION: f64 = 0.15;
const EYE_SPACING_RANGE: (f64, f64) = (0.8, 1.2);
/// Placeholder until per-feature golden-ratio measurements exist.
const GOLDEN_RATIO_PLACEHOLDER: u8 = 75;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdsRatios {
    pub forehead: f64,
    pub nose: f64,
    pub lower_face: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDivision {
    pub forehead: f64,
    pub nose: f64,
    pub lower_face: f64,
    pub ideal: ThirdsRatios,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EyeSpacing {
    pub actual: f64,
    pub ideal: f64,
    pub ratio: f64,
}

/// Not measured yet (no alar landmarks); always ratio 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoseWidth {
    pub actual: f64,
    pub ideal: f64,
    pub ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoldenRatioDeviation {
    pub feature: String,
    pub deviation: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoldenRatio {
    pub score: u8,
    pub deviations: Vec<GoldenRatioDeviation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProportionMetrics {
    pub face_division: FaceDivision,
    pub eye_spacing: EyeSpacing,
    pub nose_width: NoseWidth,
    pub golden_ratio: GoldenRatio,
    pub overall_proportion: u8,
    pub issues: Vec<String>,
}

const NOSE_WIDTH_UNMEASURED: NoseWidth = NoseWidth {
    actual: 0.0,
    ideal: 0.0,
    ratio: 1.0,
};

const NEUTRAL_THIRDS: ThirdsRatios = ThirdsRatios {
    forehead: 0.33,
    nose: 0.33,
    lower_face: 0.34,
};

impl ProportionMetrics {
    fn baseline() -> Self {
        Self {
            face_division: FaceDivision {
                forehead: NEUTRAL_THIRDS.forehead,
                nose: NEUTRAL_THIRDS.nose,
                lower_face: NEUTRAL_THIRDS.lower_face,
                ideal: NEUTRAL_THIRDS,
            },
            eye_spacing: EyeSpacing {
                actual: 0.0,
                ideal: 0.0,
                ratio: 1.0,
            },
            nose_width: NOSE_WIDTH_UNMEASURED,
            golden_ratio: GoldenRatio {
                score: 50,
                deviations: Vec::new(),
            },
            overall_proportion: 50,
            issues: vec![LANDMARKS_NOT_DETECTED.to_string()],
        }
    }
}

/// Score proportions from landmarks. `None` → fixed baseline (50, one issue).
pub fn calculate_proportions(
    landmarks: Option<&FaceLandmarks>,
    _dims: ImageDims,
) -> ProportionMetrics {
    let Some(lm) = landmarks else {
        return ProportionMetrics::baseline();
    };
    let mut issues = Vec::new();

    let eye_mid_y = (lm.left_eye.y + lm.right_eye.y) / 2.0;
    let forehead_h = lm
        .left_eyebrow
        // A zero y is the detector's "not found" value.
        .filter(|brow| brow.y != 0.0)
        .map(|brow| (brow.y - eye_mid_y).abs())
        .unwrap_or(NORMALIZED_EXTENT * IDEAL_THIRD);
    let nose_h = (lm.nose_tip.y - lm.nose_base.y).abs();
    let lower_h = (lm.chin.y - lm.nose_base.y).abs();
    let total = forehead_h + nose_h + lower_h;
    let thirds = if total > 0.0 {
        ThirdsRatios {
            forehead: forehead_h / total,
            nose: nose_h / total,
            lower_face: lower_h / total,
        }
    } else {
        NEUTRAL_THIRDS
    };
    let deviation = (thirds.forehead - IDEAL_THIRD).abs()
        + (thirds.nose - IDEAL_THIRD).abs()
        + (thirds.lower_face - IDEAL_THIRD).abs();
    if deviation > MAX_THIRDS_DEVIATION {
        issues.push(
            "Face does not divide into equal thirds; ratios deviate from the ideal".to_string(),
        );
    }

    let eye_distance = (lm.right_eye.x - lm.left_eye.x).abs();
    let ideal_eye_distance = NORMALIZED_EXTENT * 0.5;
    let eye_ratio = eye_distance / ideal_eye_distance;
    if eye_ratio < EYE_SPACING_RANGE.0 || eye_ratio > EYE_SPACING_RANGE.1 {
        issues.push(format!(
            "Eye spacing is {:.0}% of the ideal",
            eye_ratio * 100.0
        ));
    }

    let division_score = (100.0 - deviation * 200.0).max(0.0);
    let spacing_score = (100.0 - (eye_ratio - 1.0).abs() * 100.0).max(0.0);
    let overall = division_score * 0.5
        + spacing_score * 0.3
        + f64::from(GOLDEN_RATIO_PLACEHOLDER) * 0.2;

    ProportionMetrics {
        face_division: FaceDivision {
            forehead: thirds.forehead,
            nose: thirds.nose,
            lower_face: thirds.lower_face,
            ideal: ThirdsRatios {
                forehead: IDEAL_THIRD,
                nose: IDEAL_THIRD,
                lower_face: IDEAL_THIRD,
            },
        },
        eye_spacing: EyeSpacing {
            actual: eye_distance,
            ideal: ideal_eye_distance,
            ratio: eye_ratio,
        },
        nose_width: NOSE_WIDTH_UNMEASURED,
        golden_ratio: GoldenRatio {
            score: GOLDEN_RATIO_PLACEHOLDER,
            deviations: Vec::new(),
        },
        overall_proportion: to_score(overall),
        issues,
    }
}
