//! Flap placement checks against the defect and critical structures.
//!
//! Two modes share the issue strings and the overall formula:
//! - `Heuristic` (default): presence-based proxies. Coverage is 85 whenever a
//!   flap area exists, donor distance is a fixed 50, the alignment angle is 0
//!   and critical-structure overlap is never reported.
//! - `Geometric`: the same sub-scores measured with `geom2` (sampled coverage
//!   of the defect, donor centroid distance, first incision direction, and
//!   vertex-containment overlap against located critical structures).

use serde::{Deserialize, Serialize};

use crate::geom2::{
    point_in_polygon, point_to_polygon_distance, polygon_centroid, polygons_overlap, BoundingBox,
    Point,
};
use crate::score::to_score;
use crate::suggestion::{CriticalRegion, DefectLocation, FlapDrawing};

const HEURISTIC_COVERAGE: f64 = 85.0;
const HEURISTIC_DONOR_DISTANCE: f64 = 50.0;
const MIN_COVERAGE: f64 = 80.0;
const DATA_MISSING: &str = "Data missing";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    #[default]
    Heuristic,
    Geometric,
}

/// Flap position configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionCfg {
    pub mode: PositionMode,
    /// Samples per axis over the defect bounding box (geometric mode).
    pub coverage_grid: usize,
}

impl Default for PositionCfg {
    fn default() -> Self {
        Self {
            mode: PositionMode::Heuristic,
            coverage_grid: 24,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorCheck {
    pub correct: bool,
    pub distance_from_defect: f64,
    pub issues: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentCheck {
    pub correct: bool,
    /// Degrees.
    pub angle: f64,
    pub issues: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapCheck {
    pub has_overlap: bool,
    pub overlapped_structures: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlapPositionMetrics {
    /// Share of the defect covered by flap tissue, 0–100.
    pub defect_coverage: f64,
    pub donor_position: DonorCheck,
    pub flap_alignment: AlignmentCheck,
    pub critical_structure_overlap: OverlapCheck,
    pub overall_position: u8,
    pub issues: Vec<String>,
}

impl FlapPositionMetrics {
    fn missing_input() -> Self {
        Self {
            defect_coverage: 0.0,
            donor_position: DonorCheck {
                correct: false,
                distance_from_defect: 0.0,
                issues: vec![DATA_MISSING.to_string()],
            },
            flap_alignment: AlignmentCheck {
                correct: false,
                angle: 0.0,
                issues: vec![DATA_MISSING.to_string()],
            },
            critical_structure_overlap: OverlapCheck::default(),
            overall_position: 0,
            issues: vec!["Flap drawing or defect location not found".to_string()],
        }
    }
}

/// Validate the drawing against the defect. Missing drawing or defect → all-zero result.
///
/// `critical_structures` names the structures the vision step flagged;
/// `regions` carries their outlines when located. In geometric mode a region
/// is checked when its name is flagged, or when nothing is flagged at all.
pub fn validate_flap_position(
    drawing: Option<&FlapDrawing>,
    defect: Option<&DefectLocation>,
    critical_structures: &[String],
    regions: &[CriticalRegion],
    cfg: &PositionCfg,
) -> FlapPositionMetrics {
    let (Some(drawing), Some(defect)) = (drawing, defect) else {
        return FlapPositionMetrics::missing_input();
    };
    let mut issues = Vec::new();

    let m = match cfg.mode {
        PositionMode::Heuristic => heuristic(drawing),
        PositionMode::Geometric => {
            geometric(drawing, defect, critical_structures, regions, cfg.coverage_grid)
        }
    };

    if m.coverage < MIN_COVERAGE {
        issues.push("Flap does not sufficiently cover the defect area".to_string());
    }
    if !m.donor_correct {
        issues.push("Donor area missing or incorrectly positioned".to_string());
    }
    if !m.alignment_correct {
        issues.push("Incision lines not specified".to_string());
    }
    let has_overlap = !m.overlapped.is_empty();
    if has_overlap {
        issues.push(format!(
            "Flap overlaps critical structures: {}",
            m.overlapped.join(", ")
        ));
    }

    let overall = m.coverage * 0.5
        + if m.donor_correct { 25.0 } else { 0.0 }
        + if m.alignment_correct { 15.0 } else { 0.0 }
        + if has_overlap { 0.0 } else { 10.0 };

    FlapPositionMetrics {
        defect_coverage: m.coverage,
        donor_position: DonorCheck {
            correct: m.donor_correct,
            distance_from_defect: m.donor_distance,
            issues: if m.donor_correct {
                Vec::new()
            } else {
                vec!["Donor area not specified".to_string()]
            },
        },
        flap_alignment: AlignmentCheck {
            correct: m.alignment_correct,
            angle: m.angle,
            issues: if m.alignment_correct {
                Vec::new()
            } else {
                vec!["Incision lines not specified".to_string()]
            },
        },
        critical_structure_overlap: OverlapCheck {
            has_overlap,
            overlapped_structures: m.overlapped,
        },
        overall_position: to_score(overall),
        issues,
    }
}

/// Raw sub-measurements before issue assembly.
struct Measured {
    coverage: f64,
    donor_correct: bool,
    donor_distance: f64,
    alignment_correct: bool,
    angle: f64,
    overlapped: Vec<String>,
}

fn heuristic(drawing: &FlapDrawing) -> Measured {
    let donor_correct = drawing.donor_area.is_some();
    Measured {
        coverage: if drawing.flap_areas.is_empty() {
            0.0
        } else {
            HEURISTIC_COVERAGE
        },
        donor_correct,
        donor_distance: if donor_correct {
            HEURISTIC_DONOR_DISTANCE
        } else {
            0.0
        },
        alignment_correct: !drawing.incision_lines.is_empty(),
        angle: 0.0,
        overlapped: Vec::new(),
    }
}

fn geometric(
    drawing: &FlapDrawing,
    defect: &DefectLocation,
    critical_structures: &[String],
    regions: &[CriticalRegion],
    grid: usize,
) -> Measured {
    let defect_poly = defect.polygon();
    let flaps: Vec<&[Point]> = drawing
        .flap_areas
        .iter()
        .map(|a| a.points.as_slice())
        .filter(|p| p.len() >= 3)
        .collect();

    let coverage = sampled_coverage(&defect_poly, &flaps, grid);

    let donor = drawing
        .donor_area
        .as_ref()
        .map(|d| d.points.as_slice())
        .filter(|p| p.len() >= 3);
    let donor_distance = donor
        .map(|d| point_to_polygon_distance(polygon_centroid(d), &defect_poly))
        .unwrap_or(0.0);

    let angle = drawing
        .incision_lines
        .iter()
        .find_map(|line| match line.points.as_slice() {
            [first, .., last] => Some((last.y - first.y).atan2(last.x - first.x).to_degrees()),
            _ => None,
        })
        .unwrap_or(0.0);

    let flagged = |name: &str| {
        critical_structures.is_empty()
            || critical_structures
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(name.trim()))
    };
    let overlapped = regions
        .iter()
        .filter(|r| flagged(&r.name))
        .filter(|r| flaps.iter().any(|f| polygons_overlap(f, &r.points)))
        .map(|r| r.name.clone())
        .collect();

    Measured {
        coverage,
        donor_correct: donor.is_some(),
        donor_distance,
        alignment_correct: !drawing.incision_lines.is_empty(),
        angle,
        overlapped,
    }
}

/// Percentage of grid samples inside the defect that also fall inside a flap.
fn sampled_coverage(defect: &[Point], flaps: &[&[Point]], grid: usize) -> f64 {
    let Some(bb) = BoundingBox::of(defect) else {
        return 0.0;
    };
    if flaps.is_empty() || grid == 0 {
        return 0.0;
    }
    let step_x = bb.width() / grid as f64;
    let step_y = bb.height() / grid as f64;
    let mut inside = 0usize;
    let mut covered = 0usize;
    for i in 0..grid {
        for j in 0..grid {
            let p = Point::new(
                bb.min.x + (i as f64 + 0.5) * step_x,
                bb.min.y + (j as f64 + 0.5) * step_y,
            );
            if !point_in_polygon(p, defect) {
                continue;
            }
            inside += 1;
            if flaps.iter().any(|f| point_in_polygon(p, f)) {
                covered += 1;
            }
        }
    }
    if inside == 0 {
        return 0.0;
    }
    covered as f64 / inside as f64 * 100.0
}
