//! Medical source relevance.
//!
//! Purpose
//! - Score reference sources against a case on five weighted factors
//!   (region, flap type, keyword overlap, source type, content).
//! - Rank: threshold, stable descending sort, top-N.
//! - Render the ranked list as a prompt reference block.
//!
//! The source collection comes from a `SourceRepository`; a failed fetch
//! degrades to "no sources" rather than an error.

mod prompt;
mod rank;
mod repository;
mod scoring;
mod tables;
mod types;

pub use prompt::{format_sources_for_prompt, format_sources_with_excerpt};
pub use rank::{get_relevant_sources_for_case, rank_scored};
pub use repository::{InMemorySourceRepository, SourceRepository};
pub use scoring::score_medical_source;
pub use tables::{expected_flap_types, source_type_priority, REGION_FLAP_TYPES};
pub use types::{
    CaseQuery, MedicalSource, RelevanceBreakdown, RelevanceCfg, ScoredMedicalSource, SourceType,
};

#[cfg(test)]
mod tests;
