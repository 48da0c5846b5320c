use crate::analysis::{CourseRecommendation, Posting, SkillFrequency};
use crate::config::SourcesConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Data Scientist";
pub const DEFAULT_LOCATION: &str = "United States";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveIntelligenceQuery {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_location")]
    pub loc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveIntelligenceReport {
    pub query: String,
    pub total_jobs: usize,
    pub top_skill_freq: Vec<SkillFrequency>,
    pub jobs: Vec<Posting>,
    pub debug_error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillComparisonRequest {
    #[serde(default)]
    pub resume: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_location")]
    pub loc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillComparisonReport {
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
    pub emerging: Vec<String>,
    pub stats: ComparisonStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonStats {
    pub overlap_pct: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseRecommendationRequest {
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecommendationReport {
    pub extracted_skills: Vec<String>,
    pub course_recommendations: Vec<CourseRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathwayRequest {
    #[serde(default)]
    pub missing: Vec<String>,
}

/// Which upstream credentials are configured, without revealing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    #[serde(rename = "HAS_RAPIDAPI_KEY")]
    pub has_rapidapi_key: bool,
    #[serde(rename = "HAS_ONET_API_USER")]
    pub has_onet_api_user: bool,
    #[serde(rename = "HAS_ONET_API_PASS")]
    pub has_onet_api_pass: bool,
    #[serde(rename = "JSEARCH_FALLBACK")]
    pub jsearch_fallback: bool,
}

impl SourceStatus {
    pub fn from_config(config: &SourcesConfig) -> Self {
        Self {
            has_rapidapi_key: config.jsearch.has_api_key(),
            has_onet_api_user: config.onet.has_username(),
            has_onet_api_pass: config.onet.has_password(),
            jsearch_fallback: config.jsearch.fallback,
        }
    }
}
