//! Static lookup tables for relevance scoring.

use super::types::SourceType;

/// Region names (Turkish first, English aliases) → flap types commonly used there.
pub const REGION_FLAP_TYPES: &[(&[&str], &[&str])] = &[
    (
        &["burun", "nose"],
        &[
            "bilobed",
            "trilobed",
            "nasolabial",
            "paramedian forehead",
            "dorsal nasal",
            "rotation",
        ],
    ),
    (
        &["alın", "forehead"],
        &["advancement", "rotation", "a-t", "o-z"],
    ),
    (
        &["yanak", "cheek"],
        &[
            "advancement",
            "rotation",
            "transposition",
            "rhomboid",
            "interpolation",
        ],
    ),
    (
        &["göz kapağı", "eyelid"],
        &["advancement", "rotation", "tenzel", "hughes"],
    ),
    (
        &["ağız çevresi", "perioral"],
        &["advancement", "rotation", "abbe", "karapandzic"],
    ),
    (
        &["çene", "chin"],
        &["advancement", "rotation", "transposition", "rhomboid"],
    ),
];

pub const SOURCE_TYPE_PRIORITY: &[(SourceType, u8)] = &[
    (SourceType::Guideline, 100),
    (SourceType::Research, 85),
    (SourceType::Book, 75),
    (SourceType::Article, 65),
    (SourceType::Text, 50),
    (SourceType::Pdf, 50),
];

const DEFAULT_PRIORITY: u8 = 50;

/// Expected flap types for a region (case-insensitive, exact name or alias).
pub fn expected_flap_types(region: &str) -> Option<&'static [&'static str]> {
    let region = region.trim().to_lowercase();
    REGION_FLAP_TYPES
        .iter()
        .find(|(names, _)| names.iter().any(|n| *n == region))
        .map(|(_, flaps)| *flaps)
}

pub fn source_type_priority(t: SourceType) -> u8 {
    SOURCE_TYPE_PRIORITY
        .iter()
        .find(|(k, _)| *k == t)
        .map(|(_, p)| *p)
        .unwrap_or(DEFAULT_PRIORITY)
}
