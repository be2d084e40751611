//! Five-factor relevance score for one source against one case.
//!
//! All string comparisons are case-insensitive substring matches in either
//! direction. The weighted sum uses the unrounded proportion factors; the
//! integer breakdown is for display.

use super::tables::{expected_flap_types, source_type_priority};
use super::types::{CaseQuery, MedicalSource, RelevanceBreakdown, ScoredMedicalSource};
use crate::score::to_score;

const W_REGION: f64 = 0.35;
const W_FLAP_TYPE: f64 = 0.25;
const W_KEYWORD: f64 = 0.20;
const W_SOURCE_TYPE: f64 = 0.10;
const W_CONTENT: f64 = 0.10;

const REGION_EXACT: u8 = 100;
const REGION_PARTIAL: u8 = 60;
/// Source lists flap types but the case region has no table entry.
const FLAP_TYPE_UNMAPPED: u8 = 20;
const MIN_DESCRIPTION_WORD_CHARS: usize = 4;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn loosely_matches(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn normalized_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn percent(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64 * 100.0
}

pub(crate) fn region_match(region_focus: &[String], region: &str) -> u8 {
    let region = normalize(region);
    if region.is_empty() {
        return 0;
    }
    let focus = normalized_list(region_focus);
    if focus.iter().any(|f| *f == region) {
        REGION_EXACT
    } else if focus.iter().any(|f| loosely_matches(f, &region)) {
        REGION_PARTIAL
    } else {
        0
    }
}

pub(crate) fn flap_type_match(flap_types: &[String], region: &str) -> u8 {
    let flap_types = normalized_list(flap_types);
    if flap_types.is_empty() {
        return 0;
    }
    let Some(expected) = expected_flap_types(region) else {
        return FLAP_TYPE_UNMAPPED;
    };
    let matches = flap_types
        .iter()
        .filter(|ft| expected.iter().any(|e| loosely_matches(ft, e)))
        .count();
    match matches {
        0 => 0,
        m => (60 + (m - 1) * 20).min(100) as u8,
    }
}

/// Keywords and critical structures, lowercased and deduplicated in first-seen order.
pub(crate) fn case_terms(query: &CaseQuery) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for t in query.keywords.iter().chain(&query.critical_structures) {
        let t = normalize(t);
        if !t.is_empty() && !terms.contains(&t) {
            terms.push(t);
        }
    }
    terms
}

pub(crate) fn keyword_overlap(source_keywords: &[String], terms: &[String]) -> f64 {
    let keywords = normalized_list(source_keywords);
    if keywords.is_empty() || terms.is_empty() {
        return 0.0;
    }
    let matched = terms
        .iter()
        .filter(|t| keywords.iter().any(|k| loosely_matches(k, t)))
        .count();
    percent(matched, terms.len())
}

/// Description words longer than 3 characters, trimmed of punctuation.
pub(crate) fn description_words(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| w.chars().count() >= MIN_DESCRIPTION_WORD_CHARS)
        .collect()
}

pub(crate) fn content_relevance(content: &str, description: Option<&str>) -> f64 {
    let Some(description) = description else {
        return 0.0;
    };
    let content = content.to_lowercase();
    let words = description_words(description);
    if content.trim().is_empty() || words.is_empty() {
        return 0.0;
    }
    let found = words.iter().filter(|w| content.contains(w.as_str())).count();
    percent(found, words.len())
}

/// Score one source for a case.
pub fn score_medical_source(source: &MedicalSource, query: &CaseQuery) -> ScoredMedicalSource {
    let terms = case_terms(query);
    let region = region_match(&source.region_focus, &query.region);
    let flap_type = flap_type_match(&source.flap_types, &query.region);
    let keywords = keyword_overlap(&source.keywords, &terms);
    let priority = source_type_priority(source.source_type);
    let content = content_relevance(&source.content, query.description.as_deref());

    let weighted = f64::from(region) * W_REGION
        + f64::from(flap_type) * W_FLAP_TYPE
        + keywords * W_KEYWORD
        + f64::from(priority) * W_SOURCE_TYPE
        + content * W_CONTENT;
    let b = RelevanceBreakdown {
        region_match: region,
        flap_type_match: flap_type,
        keyword_overlap: to_score(keywords),
        source_type_priority: priority,
        content_relevance: to_score(content),
    };
    ScoredMedicalSource {
        source: source.clone(),
        relevance_score: to_score(weighted),
        score_breakdown: b,
    }
}
