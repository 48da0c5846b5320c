use super::{ensure_success, CourseLookup, SourceError};
use crate::analysis::{Course, CourseDuration};
use crate::config::CourseConfig;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

const COURSE_PAGE_BASE: &str = "https://www.coursera.org/learn";

/// Searches the public Coursera catalog API.
#[derive(Clone)]
pub struct CourseraClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    elements: Vec<CourseRow>,
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    workload: Option<String>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            title: row.name,
            provider: Some("Coursera".to_string()),
            url: row
                .slug
                .filter(|slug| !slug.is_empty())
                .map(|slug| format!("{COURSE_PAGE_BASE}/{slug}")),
            duration: row
                .workload
                .filter(|workload| !workload.trim().is_empty())
                .map(CourseDuration::Text),
        }
    }
}

impl CourseraClient {
    pub fn new(client: reqwest::Client, config: &CourseConfig) -> Self {
        Self {
            client,
            url: config.coursera_url.clone(),
        }
    }

    async fn try_search(&self, skill: &str, limit: usize) -> Result<Vec<Course>, SourceError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("q", "search"),
                ("query", skill),
                ("limit", limit.as_str()),
                ("fields", "name,slug,workload"),
            ])
            .send()
            .await?;
        let body: SearchResponse = ensure_success(response)?.json().await?;

        Ok(body.elements.into_iter().map(Course::from).collect())
    }
}

#[async_trait]
impl CourseLookup for CourseraClient {
    async fn find_courses(&self, skill: &str, limit: usize) -> Vec<Course> {
        if limit == 0 || skill.trim().is_empty() {
            return Vec::new();
        }

        match self.try_search(skill, limit).await {
            // The API treats `limit` as a hint, so enforce it here.
            Ok(mut courses) => {
                courses.truncate(limit);
                courses
            }
            Err(error) => {
                warn!(%error, skill, "course search failed");
                Vec::new()
            }
        }
    }
}
