//! Medical source records and their scored view.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Text,
    Pdf,
    Article,
    Book,
    Guideline,
    Research,
    #[serde(other)]
    Unknown,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Text => "text",
            SourceType::Pdf => "pdf",
            SourceType::Article => "article",
            SourceType::Book => "book",
            SourceType::Guideline => "guideline",
            SourceType::Research => "research",
            SourceType::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse; anything unrecognized is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "text" => SourceType::Text,
            "pdf" => SourceType::Pdf,
            "article" => SourceType::Article,
            "book" => SourceType::Book,
            "guideline" => SourceType::Guideline,
            "research" => SourceType::Research,
            _ => SourceType::Unknown,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `null` → empty list, for nullable array columns.
fn null_as_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}

/// A reference source as stored by the admin-facing collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicalSource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region_focus: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flap_types: Vec<String>,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn active() -> bool {
    true
}

impl MedicalSource {
    /// Minimal active source; remaining fields empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            title: title.into(),
            content: String::new(),
            source_type,
            source_url: None,
            keywords: Vec::new(),
            region_focus: Vec::new(),
            flap_types: Vec::new(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }
}

/// The five factor scores behind a relevance score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceBreakdown {
    pub region_match: u8,
    pub flap_type_match: u8,
    pub keyword_overlap: u8,
    pub source_type_priority: u8,
    pub content_relevance: u8,
}

/// A source with its relevance for one case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMedicalSource {
    #[serde(flatten)]
    pub source: MedicalSource,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: u8,
    #[serde(rename = "scoreBreakdown")]
    pub score_breakdown: RelevanceBreakdown,
}

/// Clinical parameters of the case being matched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseQuery {
    pub region: String,
    pub keywords: Vec<String>,
    pub critical_structures: Vec<String>,
    pub description: Option<String>,
}

impl CaseQuery {
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }
}

/// Relevance ranking configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceCfg {
    /// Maximum rows requested from the repository.
    pub fetch_limit: usize,
    /// Sources scoring below this are dropped.
    pub min_score: u8,
    pub top_n: usize,
    /// Content excerpt length in the prompt block, in characters.
    pub excerpt_chars: usize,
}

impl Default for RelevanceCfg {
    fn default() -> Self {
        Self {
            fetch_limit: 50,
            min_score: 15,
            top_n: 5,
            excerpt_chars: 500,
        }
    }
}
