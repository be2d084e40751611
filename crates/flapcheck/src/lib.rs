//! Clinical validation and relevance scoring for AI-proposed local flap reconstructions.
//!
//! Modules, leaf-first:
//! - `geom2`: polygon math over the 0–1000 drawing space.
//! - `anatomy`: symmetry, proportion and flap-position metrics from facial landmarks.
//! - `validation`: aggregate scores, severity-tagged issues, corrections, detector seam.
//! - `sources`: five-factor relevance ranking of medical reference sources.
//!
//! Everything except the collaborator seams (`LandmarkDetector`,
//! `SourceRepository`) is pure and deterministic. Degenerate inputs produce
//! documented fallback values, never errors.
//!
//! API Policy
//! - Internal to the application. No stability guarantees; `api` is the
//!   curated surface callers should import from.

pub mod anatomy;
pub mod api;
pub mod error;
pub mod geom2;
mod score;
pub mod sources;
pub mod suggestion;
pub mod validation;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{RepositoryError, UpstreamErrorKind};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::anatomy::{FaceLandmarks, ImageDims, PositionCfg, PositionMode};
    pub use crate::geom2::Point;
    pub use crate::sources::{
        format_sources_for_prompt, get_relevant_sources_for_case, CaseQuery,
        InMemorySourceRepository, MedicalSource, RelevanceCfg, ScoredMedicalSource,
        SourceRepository, SourceType,
    };
    pub use crate::suggestion::{FlapDrawing, FlapSuggestion, VisionSummary};
    pub use crate::validation::{
        validate_flap_drawing, validate_with_landmarks, LandmarkDetector, PrecomputedLandmarks,
        ValidationCfg, ValidationResult,
    };
}
