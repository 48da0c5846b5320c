//! Pure skill matching and gap analysis shared by every insight endpoint.
//!
//! Nothing in here performs I/O or reads configuration. Upstream data arrives
//! already resolved and results are plain serializable values.

pub mod domain;
pub mod frequency;
pub mod gap;
pub mod pathway;
pub mod tokenizer;

pub use domain::{Course, CourseDuration, CourseRecommendation, Posting};
pub use frequency::{most_common, rank_frequency, SkillFrequency, TOP_SKILL_LIMIT};
pub use gap::{analyze_gap, canonical_set, GapAnalysis, PRESENTATION_LIMIT};
pub use pathway::{
    build_pathway, parse_duration_hours, Pathway, PathwayEntry, DEFAULT_COURSE_HOURS,
    PATHWAY_SKILL_LIMIT, STUDY_HOURS_PER_WEEK,
};
pub use tokenizer::{tokenize, MIN_TOKEN_LEN};

/// Rounds to `places` decimals. Exact halves go to the even neighbour, so
/// 3.125 becomes 3.12.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
