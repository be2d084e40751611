//! Render ranked sources as a reference block for the suggestion prompt.

use super::types::{RelevanceCfg, ScoredMedicalSource};

const HEADER: &str = "\n\n=== MEDICAL SOURCE REFERENCES ===\n\
The following medical sources support the flap techniques considered for this case:\n\n";
const FOOTER: &str = "Use these sources as references to support your flap suggestions.\n\
If a suggested flap technique is mentioned in these sources, say so.\n";

/// Prompt block with the default excerpt length. Empty input → empty string.
pub fn format_sources_for_prompt(sources: &[ScoredMedicalSource]) -> String {
    format_sources_with_excerpt(sources, RelevanceCfg::default().excerpt_chars)
}

/// Prompt block with content cut to `excerpt_chars` characters (plus `...`).
pub fn format_sources_with_excerpt(sources: &[ScoredMedicalSource], excerpt_chars: usize) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let mut out = String::from(HEADER);
    for (i, s) in sources.iter().enumerate() {
        let src = &s.source;
        out.push_str(&format!(
            "{}. [{}] {} (relevance: {}%)\n",
            i + 1,
            src.source_type.as_str().to_uppercase(),
            src.title,
            s.relevance_score
        ));
        if !src.region_focus.is_empty() {
            out.push_str(&format!("   Regions: {}\n", src.region_focus.join(", ")));
        }
        if !src.flap_types.is_empty() {
            out.push_str(&format!("   Flap types: {}\n", src.flap_types.join(", ")));
        }
        if !src.keywords.is_empty() {
            out.push_str(&format!("   Keywords: {}\n", src.keywords.join(", ")));
        }
        out.push_str(&format!("   Content: {}\n\n", excerpt(&src.content, excerpt_chars)));
    }
    out.push_str(FOOTER);
    out
}

fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
