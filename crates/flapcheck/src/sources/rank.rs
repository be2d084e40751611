//! Fetch, score, filter and rank sources for a case.

use super::repository::SourceRepository;
use super::scoring::score_medical_source;
use super::types::{CaseQuery, RelevanceCfg, ScoredMedicalSource};

/// Drop sources below `min_score`, stable-sort descending, keep `top_n`.
pub fn rank_scored(
    scored: Vec<ScoredMedicalSource>,
    cfg: &RelevanceCfg,
) -> Vec<ScoredMedicalSource> {
    let mut kept: Vec<_> = scored
        .into_iter()
        .filter(|s| s.relevance_score >= cfg.min_score)
        .collect();
    kept.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    kept.truncate(cfg.top_n);
    kept
}

/// Ranked sources for a case. A failed fetch is logged and yields an empty list.
pub fn get_relevant_sources_for_case<R>(
    repo: &R,
    query: &CaseQuery,
    cfg: &RelevanceCfg,
) -> Vec<ScoredMedicalSource>
where
    R: SourceRepository + ?Sized,
{
    let sources = match repo.fetch_active_sources(cfg.fetch_limit) {
        Ok(sources) => sources,
        Err(err) => {
            tracing::warn!(error = %err, region = %query.region, "fetching medical sources failed");
            return Vec::new();
        }
    };
    let scored: Vec<_> = sources
        .iter()
        .filter(|s| s.is_active)
        .take(cfg.fetch_limit)
        .map(|s| score_medical_source(s, query))
        .collect();
    let candidates = scored.len();
    let ranked = rank_scored(scored, cfg);
    tracing::debug!(
        region = %query.region,
        candidates,
        kept = ranked.len(),
        "ranked medical sources"
    );
    ranked
}
