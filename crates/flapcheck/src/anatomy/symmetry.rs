//! Facial symmetry from eye line, midline and half-face widths.

use serde::{Deserialize, Serialize};

use super::landmarks::{FaceLandmarks, ImageDims};
use super::LANDMARKS_NOT_DETECTED;
use crate::score::to_score;

/// Eye-line tilt above this many degrees is flagged.
const MAX_TILT_DEG: f64 = 10.0;
/// Nose or chin offset from the eye midpoint (in tenths of a unit) above this is flagged.
const MAX_MIDLINE_DEVIATION: f64 = 5.0;
/// Smaller/larger half-face width ratio (percent) below this is flagged.
const MIN_BALANCE_PCT: f64 = 85.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryMetrics {
    /// Absolute angle of the eye line against the horizontal, degrees.
    pub horizontal_tilt: f64,
    /// Nose/chin alignment with the eye midpoint, 0–100.
    pub vertical_alignment: f64,
    /// Smaller over larger half-face width, percent.
    pub left_right_balance: f64,
    pub overall_symmetry: u8,
    pub issues: Vec<String>,
}

impl SymmetryMetrics {
    fn baseline() -> Self {
        Self {
            horizontal_tilt: 0.0,
            vertical_alignment: 50.0,
            left_right_balance: 50.0,
            overall_symmetry: 50,
            issues: vec![LANDMARKS_NOT_DETECTED.to_string()],
        }
    }
}

/// Score symmetry from landmarks. `None` → fixed baseline (50, one issue).
///
/// `_dims` is accepted for scale-aware thresholds; the current thresholds are
/// absolute in the normalized landmark space.
pub fn calculate_symmetry(landmarks: Option<&FaceLandmarks>, _dims: ImageDims) -> SymmetryMetrics {
    let Some(lm) = landmarks else {
        return SymmetryMetrics::baseline();
    };
    let mut issues = Vec::new();

    let eye_dy = lm.right_eye.y - lm.left_eye.y;
    let eye_dx = lm.right_eye.x - lm.left_eye.x;
    let horizontal_tilt = eye_dy.atan2(eye_dx).to_degrees().abs();
    if horizontal_tilt > MAX_TILT_DEG {
        issues.push(format!(
            "Eye line tilted {horizontal_tilt:.1}°, facial symmetry compromised"
        ));
    }

    let mid_x = (lm.left_eye.x + lm.right_eye.x) / 2.0;
    let nose_dev = (lm.nose_tip.x - mid_x).abs() / 10.0;
    let chin_dev = (lm.chin.x - mid_x).abs() / 10.0;
    let vertical_alignment = (100.0 - (nose_dev + chin_dev) * 2.0).max(0.0);
    if nose_dev > MAX_MIDLINE_DEVIATION || chin_dev > MAX_MIDLINE_DEVIATION {
        issues.push("Nose or chin deviates from the midline".to_string());
    }

    let left_width = (lm.left_eye.x - lm.left_mouth_corner.x).abs();
    let right_width = (lm.right_eye.x - lm.right_mouth_corner.x).abs();
    let wider = left_width.max(right_width);
    // Two zero-width halves are trivially balanced.
    let left_right_balance = if wider > 0.0 {
        left_width.min(right_width) / wider * 100.0
    } else {
        100.0
    };
    if left_right_balance < MIN_BALANCE_PCT {
        issues.push("Marked asymmetry between the left and right face halves".to_string());
    }

    let overall = (100.0 - (horizontal_tilt * 2.0).min(100.0)) * 0.3
        + vertical_alignment * 0.3
        + left_right_balance * 0.4;

    SymmetryMetrics {
        horizontal_tilt,
        vertical_alignment,
        left_right_balance,
        overall_symmetry: to_score(overall),
        issues,
    }
}
