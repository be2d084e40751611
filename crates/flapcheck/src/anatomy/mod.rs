//! Anatomical metrics: symmetry, proportion and flap position.
//!
//! Purpose
//! - Turn detected landmarks and the AI's flap drawing into three independent
//!   0–100 scores, each with human-readable issue strings.
//! - Never fail: missing landmarks or drawings yield a fixed neutral baseline
//!   with an explanatory issue, so a result is always available for display.
//!
//! Code cross-refs: `validation::aggregate` (weights), `geom2` (geometric mode).

mod landmarks;
mod position;
mod proportion;
mod symmetry;

pub use landmarks::{FaceLandmarks, ImageDims, NORMALIZED_EXTENT};
pub use position::{
    validate_flap_position, AlignmentCheck, DonorCheck, FlapPositionMetrics, OverlapCheck,
    PositionCfg, PositionMode,
};
pub use proportion::{
    calculate_proportions, EyeSpacing, FaceDivision, GoldenRatio, GoldenRatioDeviation, NoseWidth,
    ProportionMetrics, ThirdsRatios,
};
pub use symmetry::{calculate_symmetry, SymmetryMetrics};

/// Issue text shared by the null-landmark baselines.
pub const LANDMARKS_NOT_DETECTED: &str = "Landmarks not detected";
