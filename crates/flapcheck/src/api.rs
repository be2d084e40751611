//! Curated surface for application code (UNSTABLE).
//!
//! Prefer these re-exports over reaching into submodules.

// Geometry kernel
pub use crate::geom2::{
    point_distance, point_in_polygon, point_to_polygon_distance, polygon_area, polygon_centroid,
    polygons_overlap, scale_about, translate, BoundingBox, Point,
};
// Random outlines for fixtures and benches
pub use crate::geom2::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
// Anatomical metrics
pub use crate::anatomy::{
    calculate_proportions, calculate_symmetry, validate_flap_position, FaceLandmarks,
    FlapPositionMetrics, ImageDims, PositionCfg, PositionMode, ProportionMetrics,
    SymmetryMetrics, LANDMARKS_NOT_DETECTED,
};
// AI collaborator inputs
pub use crate::suggestion::{
    CriticalRegion, DefectLocation, FlapArea, FlapDrawing, FlapSuggestion, IncisionLine,
    LabeledPolygon, VisionSummary,
};
// Validation
pub use crate::validation::{
    apply_corrections, generate_correction_suggestions, validate_flap_drawing,
    validate_with_landmarks, ConfidenceLevel, CorrectionSuggestion, DetectedIssue,
    FaceMeshModel, LandmarkDetector, MeshDetector, ModelLoader, PrecomputedLandmarks,
    SharedModel, ValidationCfg, ValidationResult,
};
// Source relevance
pub use crate::sources::{
    format_sources_for_prompt, format_sources_with_excerpt, get_relevant_sources_for_case,
    rank_scored, score_medical_source, CaseQuery, InMemorySourceRepository, MedicalSource,
    RelevanceCfg, ScoredMedicalSource, SourceRepository, SourceType,
};
pub use crate::error::{RepositoryError, UpstreamErrorKind};
