//! HTTP-facing insight endpoints built on the analysis core and upstream sources.

pub mod router;
pub mod service;
pub mod views;

pub use router::insights_router;
pub use service::{InsightService, RECOMMENDATION_SKILL_LIMIT};
pub use views::{
    ComparisonStats, CourseRecommendationReport, CourseRecommendationRequest,
    LiveIntelligenceQuery, LiveIntelligenceReport, PathwayRequest, SkillComparisonReport,
    SkillComparisonRequest, SourceStatus, DEFAULT_LOCATION, DEFAULT_TITLE,
};
