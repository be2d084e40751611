//! Validation result contract (camelCase JSON, as consumed by the UI layer).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::anatomy::{
    FaceLandmarks, FlapPositionMetrics, PositionCfg, ProportionMetrics, SymmetryMetrics,
};

/// Validation configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationCfg {
    pub position: PositionCfg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Symmetry,
    Proportion,
    Position,
    General,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// `≥ 80` high, `≥ 60` medium, otherwise low.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ConfidenceLevel::High,
            60..=79 => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}

/// Per-group scores feeding the consistency score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub symmetry: u8,
    pub proportions: u8,
    pub flap_position: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnatomicalConsistency {
    pub score: u8,
    pub symmetry: SymmetryMetrics,
    pub proportions: ProportionMetrics,
    pub flap_position: FlapPositionMetrics,
    pub breakdown: ScoreBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactor {
    pub name: String,
    pub score: u8,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfidence {
    pub score: u8,
    pub level: ConfidenceLevel,
    pub factors: Vec<ConfidenceFactor>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedIssue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub anatomical_consistency: AnatomicalConsistency,
    pub ai_confidence: AiConfidence,
    pub detected_issues: Vec<DetectedIssue>,
    pub landmarks: Option<FaceLandmarks>,
    pub validated_at: DateTime<Utc>,
}
