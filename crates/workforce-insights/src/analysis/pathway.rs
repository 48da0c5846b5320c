use super::domain::{Course, CourseDuration};
use super::round_to;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Missing skills beyond this position are not planned. Each planned skill costs
/// one upstream course lookup.
pub const PATHWAY_SKILL_LIMIT: usize = 5;

/// Hours assumed for a course whose duration carries no number.
pub const DEFAULT_COURSE_HOURS: u64 = 10;

/// Assumed study rate used to turn hours into weeks.
pub const STUDY_HOURS_PER_WEEK: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwayEntry {
    pub position: usize,
    pub skill: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Parsed course length in hours.
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pathway {
    pub pathway: Vec<PathwayEntry>,
    pub total_duration_hours: u64,
    pub estimated_weeks: f64,
}

fn digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Reads the first run of digits in a course duration ("4 weeks at 3 hours" -> 4).
///
/// A missing duration counts as [`DEFAULT_COURSE_HOURS`], as does text with no
/// digits at all such as "self-paced". Digit runs too large for `u64` saturate.
pub fn parse_duration_hours(duration: Option<&CourseDuration>) -> u64 {
    let Some(duration) = duration else {
        return DEFAULT_COURSE_HOURS;
    };

    let text = duration.to_string();
    match digits_pattern().find(&text) {
        Some(digits) => digits.as_str().parse().unwrap_or(u64::MAX),
        None => DEFAULT_COURSE_HOURS,
    }
}

/// Turns the leading missing skills into an ordered study plan.
///
/// Only the first [`PATHWAY_SKILL_LIMIT`] skills are looked up. A skill without
/// any course is skipped and does not consume a position; otherwise the first
/// course returned by `course_lookup` is used.
pub fn build_pathway<S, F>(missing: &[S], mut course_lookup: F) -> Pathway
where
    S: AsRef<str>,
    F: FnMut(&str) -> Vec<Course>,
{
    let mut pathway = Vec::new();
    let mut total_duration_hours: u64 = 0;

    for skill in missing.iter().take(PATHWAY_SKILL_LIMIT) {
        let skill = skill.as_ref();
        let Some(course) = course_lookup(skill).into_iter().next() else {
            continue;
        };

        let hours = parse_duration_hours(course.duration.as_ref());
        total_duration_hours = total_duration_hours.saturating_add(hours);

        pathway.push(PathwayEntry {
            position: pathway.len() + 1,
            skill: skill.to_string(),
            title: course.title,
            provider: course.provider,
            url: course.url,
            duration: hours,
        });
    }

    Pathway {
        pathway,
        total_duration_hours,
        estimated_weeks: round_to(total_duration_hours as f64 / STUDY_HOURS_PER_WEEK, 1),
    }
}
