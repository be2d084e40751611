use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use super::scoring::{case_terms, content_relevance, description_words, flap_type_match, region_match};
use super::*;
use crate::error::RepositoryError;

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

fn nasal_guideline(region: &str) -> MedicalSource {
    let mut s = MedicalSource::new(format!("src-{region}"), "Nasal reconstruction", SourceType::Guideline);
    s.region_focus = strings(&[region]);
    s.flap_types = strings(&["bilobed"]);
    s.keywords = strings(&["nasal", "tip"]);
    s
}

fn scored(id: &str, score: u8) -> ScoredMedicalSource {
    ScoredMedicalSource {
        source: MedicalSource::new(id, id, SourceType::Article),
        relevance_score: score,
        score_breakdown: RelevanceBreakdown::default(),
    }
}

fn scores(v: &[ScoredMedicalSource]) -> Vec<u8> {
    v.iter().map(|s| s.relevance_score).collect()
}

fn ids(v: &[ScoredMedicalSource]) -> Vec<&str> {
    v.iter().map(|s| s.source.id.as_str()).collect()
}

#[test]
fn matching_region_outranks_other_region() {
    let q = CaseQuery {
        region: "burun".into(),
        keywords: strings(&["nasal"]),
        ..Default::default()
    };
    let nose = score_medical_source(&nasal_guideline("burun"), &q);
    let cheek = score_medical_source(&nasal_guideline("yanak"), &q);

    assert_eq!(nose.score_breakdown.region_match, 100);
    assert_eq!(nose.score_breakdown.source_type_priority, 100);
    assert_eq!(nose.score_breakdown.flap_type_match, 60);
    assert_eq!(nose.score_breakdown.keyword_overlap, 100);
    assert_eq!(nose.score_breakdown.content_relevance, 0);
    // 35 + 15 + 20 + 10
    assert_eq!(nose.relevance_score, 80);

    assert_eq!(cheek.score_breakdown.region_match, 0);
    assert_eq!(cheek.relevance_score, 45);

    let repo = InMemorySourceRepository::new(vec![
        nasal_guideline("yanak"),
        nasal_guideline("burun"),
    ]);
    let ranked = get_relevant_sources_for_case(&repo, &q, &RelevanceCfg::default());
    assert_eq!(ids(&ranked), vec!["src-burun", "src-yanak"]);
}

#[test]
fn region_match_levels() {
    assert_eq!(region_match(&strings(&["Burun"]), "burun"), 100);
    assert_eq!(region_match(&strings(&["burun ucu"]), "burun"), 60);
    assert_eq!(region_match(&strings(&["nose"]), "Nose tip"), 60);
    assert_eq!(region_match(&strings(&["yanak"]), "burun"), 0);
    assert_eq!(region_match(&[], "burun"), 0);
    assert_eq!(region_match(&strings(&["burun"]), "  "), 0);
}

#[test]
fn flap_type_match_levels() {
    assert_eq!(flap_type_match(&[], "burun"), 0);
    assert_eq!(flap_type_match(&strings(&["abbe"]), "burun"), 0);
    assert_eq!(flap_type_match(&strings(&["Bilobed flap"]), "burun"), 60);
    assert_eq!(flap_type_match(&strings(&["bilobed", "nasolabial"]), "nose"), 80);
    assert_eq!(
        flap_type_match(
            &strings(&["bilobed", "nasolabial", "rotation", "trilobed"]),
            "burun"
        ),
        100
    );
    // region without a table entry
    assert_eq!(flap_type_match(&strings(&["bilobed"]), "kulak"), 20);
    assert!(expected_flap_types("Eyelid").is_some());
    assert_eq!(expected_flap_types("göz kapağı"), expected_flap_types("eyelid"));
    assert_eq!(expected_flap_types("Cheek"), expected_flap_types("yanak"));
}

#[test]
fn case_terms_are_deduplicated() {
    let q = CaseQuery {
        keywords: strings(&["Nasal", "nasal ", ""]),
        critical_structures: strings(&["alar rim", "NASAL"]),
        ..Default::default()
    };
    assert_eq!(case_terms(&q), strings(&["nasal", "alar rim"]));

    let mut s = MedicalSource::new("k", "k", SourceType::Text);
    s.keywords = strings(&["nasal tip"]);
    let r = score_medical_source(&s, &q);
    assert_eq!(r.score_breakdown.keyword_overlap, 50);
    // no case terms → 0
    let r = score_medical_source(&s, &CaseQuery::for_region("burun"));
    assert_eq!(r.score_breakdown.keyword_overlap, 0);
}

#[test]
fn content_relevance_uses_long_words_only() {
    assert_eq!(
        description_words("Defect on the nasal tip, 12 mm."),
        strings(&["defect", "nasal"])
    );
    let content = "Bilobed flap for nasal tip defects";
    assert_eq!(content_relevance(content, Some("Defect on the nasal tip")), 100.0);
    assert_eq!(content_relevance(content, Some("defect, eyelid")), 50.0);
    assert_eq!(content_relevance(content, Some("on the tip")), 0.0);
    assert_eq!(content_relevance(content, None), 0.0);
    assert_eq!(content_relevance("", Some("nasal defect")), 0.0);
}

#[test]
fn weighted_sum_uses_unrounded_factors() {
    let mut s = MedicalSource::new("frac", "Flap atlas", SourceType::Text);
    s.keywords = strings(&["nasal", "tip"]);
    s.content = "bilobed flap".to_string();
    let q = CaseQuery {
        region: "burun".into(),
        keywords: strings(&["nasal", "tip", "alar"]),
        description: Some(
            "bilobed cheek orbit eyelid temple scalp forehead lower upper".to_string(),
        ),
        ..Default::default()
    };
    let r = score_medical_source(&s, &q);
    assert_eq!(r.score_breakdown.keyword_overlap, 67);
    assert_eq!(r.score_breakdown.content_relevance, 11);
    // 0.2·66.67 + 0.1·50 + 0.1·11.11 = 19.44; the rounded breakdown would sum to 19.5.
    assert_eq!(r.relevance_score, 19);
}

#[test]
fn unknown_source_type_gets_default_priority() {
    assert_eq!(source_type_priority(SourceType::Research), 85);
    assert_eq!(source_type_priority(SourceType::Book), 75);
    assert_eq!(source_type_priority(SourceType::Article), 65);
    assert_eq!(source_type_priority(SourceType::Pdf), 50);
    assert_eq!(source_type_priority(SourceType::Unknown), 50);
    assert_eq!(SourceType::parse(" GUIDELINE "), SourceType::Guideline);
    assert_eq!(SourceType::parse("video"), SourceType::Unknown);
}

#[test]
fn rank_filters_before_truncating_and_keeps_tie_order() {
    let input = vec![
        scored("a", 90),
        scored("b", 85),
        scored("c", 85),
        scored("d", 40),
        scored("e", 20),
        scored("f", 10),
        scored("g", 5),
    ];
    let out = rank_scored(input, &RelevanceCfg::default());
    assert_eq!(scores(&out), vec![90, 85, 85, 40, 20]);
    assert_eq!(ids(&out), vec!["a", "b", "c", "d", "e"]);

    let shuffled = vec![
        scored("e", 20),
        scored("c1", 85),
        scored("g", 5),
        scored("a", 90),
        scored("c2", 85),
        scored("f", 10),
        scored("d", 40),
    ];
    let out = rank_scored(shuffled, &RelevanceCfg::default());
    assert_eq!(ids(&out), vec!["a", "c1", "c2", "d", "e"]);
}

#[test]
fn rank_never_pads_below_threshold() {
    let out = rank_scored(
        vec![scored("x", 14), scored("y", 15), scored("z", 3)],
        &RelevanceCfg::default(),
    );
    assert_eq!(ids(&out), vec!["y"]);
    assert!(rank_scored(Vec::new(), &RelevanceCfg::default()).is_empty());
}

struct DownRepo;

impl SourceRepository for DownRepo {
    fn fetch_active_sources(&self, _limit: usize) -> Result<Vec<MedicalSource>, RepositoryError> {
        Err(RepositoryError::upstream(503, "storage unavailable"))
    }
}

#[test]
fn fetch_failure_yields_empty_list() {
    let q = CaseQuery::for_region("burun");
    assert!(get_relevant_sources_for_case(&DownRepo, &q, &RelevanceCfg::default()).is_empty());
    let dyn_repo: &dyn SourceRepository = &DownRepo;
    assert!(get_relevant_sources_for_case(dyn_repo, &q, &RelevanceCfg::default()).is_empty());
}

#[test]
fn in_memory_repository_orders_newest_first() {
    let at = |d| Some(Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap());
    let mut old = MedicalSource::new("old", "old", SourceType::Text);
    old.created_at = at(1);
    let mut new = MedicalSource::new("new", "new", SourceType::Text);
    new.created_at = at(20);
    let undated = MedicalSource::new("undated", "undated", SourceType::Text);
    let mut inactive = MedicalSource::new("inactive", "inactive", SourceType::Text);
    inactive.created_at = at(25);
    inactive.is_active = false;

    let repo = InMemorySourceRepository::new(vec![undated, old, inactive, new]);
    let all = repo.fetch_active_sources(50).unwrap();
    let got: Vec<_> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(got, vec!["new", "old", "undated"]);
    assert_eq!(repo.fetch_active_sources(1).unwrap().len(), 1);
    assert_eq!(repo.len(), 4);
}

#[test]
fn fetch_limit_caps_candidates() {
    let q = CaseQuery::for_region("burun");
    let repo = InMemorySourceRepository::new((0..10).map(|i| nasal_guideline(&format!("burun{i}"))).collect());
    let cfg = RelevanceCfg {
        fetch_limit: 3,
        top_n: 10,
        ..Default::default()
    };
    assert_eq!(get_relevant_sources_for_case(&repo, &q, &cfg).len(), 3);
}

#[test]
fn prompt_block_layout() {
    assert_eq!(format_sources_for_prompt(&[]), "");

    let mut src = nasal_guideline("burun");
    src.content = "a".repeat(600);
    let s = ScoredMedicalSource {
        source: src,
        relevance_score: 80,
        score_breakdown: RelevanceBreakdown::default(),
    };
    let block = format_sources_for_prompt(&[s.clone()]);
    assert!(block.contains("=== MEDICAL SOURCE REFERENCES ==="));
    assert!(block.contains("1. [GUIDELINE] Nasal reconstruction (relevance: 80%)\n"));
    assert!(block.contains("   Regions: burun\n"));
    assert!(block.contains("   Flap types: bilobed\n"));
    assert!(block.contains("   Keywords: nasal, tip\n"));
    assert!(block.contains(&format!("   Content: {}...\n", "a".repeat(500))));
    assert!(!block.contains(&"a".repeat(501)));

    let mut short = s;
    short.source.content = "çene flebi ğüşıöç".to_string();
    short.source.keywords.clear();
    let block = format_sources_with_excerpt(&[short], 4);
    assert!(block.contains("   Content: çene...\n"));
    assert!(!block.contains("Keywords:"));
}

#[test]
fn source_json_contract() {
    let raw = r#"{
        "id": "s1",
        "title": "Local flaps",
        "content": "text",
        "source_type": "video",
        "keywords": null,
        "region_focus": ["burun"],
        "created_at": "2024-05-01T10:00:00Z"
    }"#;
    let src: MedicalSource = serde_json::from_str(raw).unwrap();
    assert_eq!(src.source_type, SourceType::Unknown);
    assert!(src.keywords.is_empty());
    assert!(src.flap_types.is_empty());
    assert!(src.is_active);

    let s = score_medical_source(&src, &CaseQuery::for_region("burun"));
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["id"], "s1");
    assert_eq!(json["relevanceScore"], s.relevance_score);
    assert_eq!(json["scoreBreakdown"]["regionMatch"], 100);
    let back: ScoredMedicalSource = serde_json::from_value(json).unwrap();
    assert_eq!(back.source.id, "s1");
    assert_eq!(back.relevance_score, s.relevance_score);
}

proptest! {
    #[test]
    fn relevance_is_bounded(
        region in "[a-zçğıöşü ]{0,12}",
        focus in proptest::collection::vec("[a-z ]{0,10}", 0..4),
        flaps in proptest::collection::vec("[a-z -]{0,12}", 0..6),
        kws in proptest::collection::vec("[a-z]{0,8}", 0..5),
        terms in proptest::collection::vec("[a-z]{0,8}", 0..5),
        desc in proptest::option::of("[a-z ,.]{0,40}"),
    ) {
        let mut src = MedicalSource::new("p", "p", SourceType::Book);
        src.region_focus = focus;
        src.flap_types = flaps;
        src.keywords = kws;
        src.content = "rotation flap for nasal defects".into();
        let q = CaseQuery { region, keywords: terms, critical_structures: vec![], description: desc };
        let s = score_medical_source(&src, &q);
        let b = s.score_breakdown;
        for f in [b.region_match, b.flap_type_match, b.keyword_overlap, b.source_type_priority, b.content_relevance] {
            prop_assert!(f <= 100);
        }
        prop_assert!(s.relevance_score <= 100);
    }
}
