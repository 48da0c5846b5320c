use serde::{Deserialize, Serialize};
use std::fmt;

/// One live job advertisement. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub company: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub link: String,
    pub location: String,
}

/// Course metadata as returned by a course provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<CourseDuration>,
}

/// Providers report duration either as free text ("4 weeks, 3 hours/week") or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseDuration {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for CourseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseDuration::Number(value) => write!(f, "{value}"),
            CourseDuration::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for CourseDuration {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for CourseDuration {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// A course suggested for one missing skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecommendation {
    pub skill: String,
    #[serde(flatten)]
    pub course: Course,
}
