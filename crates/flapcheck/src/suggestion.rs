//! Inputs authored by the AI suggestion collaborator.
//!
//! These mirror the JSON the decision and vision models emit (snake_case
//! fields). They are read-only here: nothing in the crate mutates a
//! suggestion in place; corrections produce a new value.

use serde::{Deserialize, Serialize};

use crate::geom2::Point;

/// One flap option proposed for a case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlapSuggestion {
    pub flap_name: String,
    /// Model-reported suitability, 0–100. Clamped by consumers.
    pub suitability_score: f64,
    pub category: FlapCategory,
    pub why: String,
    pub advantages: Vec<String>,
    pub cautions: Vec<String>,
    pub alternatives: Vec<String>,
    pub aesthetic_risk: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surgical_technique: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flap_drawing: Option<FlapDrawing>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlapCategory {
    #[serde(alias = "en_uygun")]
    BestFit,
    #[default]
    #[serde(alias = "uygun")]
    Suitable,
    #[serde(alias = "alternatif")]
    Alternative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[serde(alias = "düşük")]
    Low,
    #[default]
    #[serde(alias = "orta")]
    Medium,
    #[serde(alias = "yüksek")]
    High,
}

/// Overlay geometry for one suggestion, in the 0–1000 drawing space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlapDrawing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_area: Option<LabeledPolygon>,
    pub incision_lines: Vec<IncisionLine>,
    pub flap_areas: Vec<FlapArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_area: Option<LabeledPolygon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrows: Option<Vec<Arrow>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabeledPolygon {
    pub points: Vec<Point>,
    pub color: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncisionLine {
    pub points: Vec<Point>,
    pub color: String,
    pub label: String,
    #[serde(rename = "lineStyle")]
    pub line_style: LineStyle,
    #[serde(rename = "lineWidth", skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Dashed,
    #[default]
    Solid,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlapArea {
    pub points: Vec<Point>,
    pub color: String,
    pub label: String,
    #[serde(rename = "fillOpacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arrow {
    pub from: Point,
    pub to: Point,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Vision-model summary of the pre-operative photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionSummary {
    pub detected_region: String,
    pub estimated_width_mm: f64,
    pub estimated_height_mm: f64,
    pub depth_estimation: String,
    pub critical_structures: Vec<String>,
    pub aesthetic_zone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_location: Option<DefectLocation>,
    /// Outlines for named critical structures, when the vision step located them.
    /// Only consulted by the geometric position mode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub critical_regions: Vec<CriticalRegion>,
}

/// Defect box (centre + size) with an optional explicit outline, 0–1000 normalized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectLocation {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl DefectLocation {
    /// Explicit outline when it has at least 3 points, else the centred rectangle.
    pub fn polygon(&self) -> Vec<Point> {
        match &self.points {
            Some(pts) if pts.len() >= 3 => pts.clone(),
            _ => {
                let (hw, hh) = (self.width / 2.0, self.height / 2.0);
                let (cx, cy) = (self.center_x, self.center_y);
                vec![
                    Point::new(cx - hw, cy - hh),
                    Point::new(cx + hw, cy - hh),
                    Point::new(cx + hw, cy + hh),
                    Point::new(cx - hw, cy + hh),
                ]
            }
        }
    }
}

/// A named critical structure with its outline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalRegion {
    pub name: String,
    pub points: Vec<Point>,
}
