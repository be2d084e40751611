//! Validation of an AI-authored flap drawing against the patient's face.
//!
//! Purpose
//! - Combine symmetry, proportion and flap-position metrics into an
//!   anatomical consistency score and an overall AI confidence score.
//! - Flatten per-group issues into severity-tagged findings.
//! - Derive correction suggestions and apply the confident ones.
//!
//! The landmark detector is a trait so callers can plug in a face-mesh model,
//! landmarks computed elsewhere, or a test double.

mod aggregate;
mod corrections;
mod detector;
mod types;

pub use aggregate::{validate_flap_drawing, validate_with_landmarks, POSITION_REMEDIATION};
pub use corrections::{
    apply_corrections, generate_correction_suggestions, CorrectionKind, CorrectionSuggestion,
    SuggestedChange,
};
pub use detector::{
    FaceMeshModel, LandmarkDetector, MeshDetector, ModelLoader, PrecomputedLandmarks, SharedModel,
};
pub use types::{
    AiConfidence, AnatomicalConsistency, ConfidenceFactor, ConfidenceLevel, DetectedIssue,
    IssueCategory, ScoreBreakdown, Severity, ValidationCfg, ValidationResult,
};
