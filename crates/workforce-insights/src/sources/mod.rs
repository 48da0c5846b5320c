//! Upstream providers: occupation taxonomy, live postings, and course search.
//!
//! Every provider swallows its own failures. Network errors, non-success
//! statuses, undecodable bodies, and missing credentials are logged and turned
//! into empty results so the analysis layer never sees a fault.

mod catalog;
mod coursera;
mod jsearch;
mod onet;

pub use catalog::CsvCourseCatalog;
pub use coursera::CourseraClient;
pub use jsearch::JSearchClient;
pub use onet::OnetClient;

use crate::analysis::{Course, Posting};
use crate::config::SourcesConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A standardized job role from the occupation taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    pub code: String,
    pub title: String,
}

/// Skill attached to an occupation by the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationSkill {
    pub name: String,
}

/// Postings found for a query, plus the upstream failure if the search broke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearch {
    pub postings: Vec<Posting>,
    pub debug_error: Option<String>,
}

impl JobSearch {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            postings: Vec::new(),
            debug_error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait OccupationLookup: Send + Sync {
    /// Ranked occupation matches for a job title, best first.
    async fn search_occupation(&self, title: &str) -> Vec<Occupation>;
    async fn skills_for_occupation(&self, code: &str) -> Vec<OccupationSkill>;
}

#[async_trait]
pub trait JobPostingSource: Send + Sync {
    async fn fetch_live_jobs(&self, title: &str, location: &str) -> JobSearch;
}

#[async_trait]
pub trait CourseLookup: Send + Sync {
    async fn find_courses(&self, skill: &str, limit: usize) -> Vec<Course>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream responded with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("course catalog unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("course catalog malformed: {0}")]
    Csv(#[from] csv::Error),
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("workforce-insights/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

pub(crate) fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status { status })
    }
}

/// The providers selected by configuration, shared across requests.
#[derive(Clone)]
pub struct Sources {
    pub occupations: Arc<dyn OccupationLookup>,
    pub jobs: Arc<dyn JobPostingSource>,
    pub courses: Arc<dyn CourseLookup>,
}

impl Sources {
    /// Builds the live providers. A configured course catalog path replaces the
    /// Coursera search.
    pub fn from_config(config: &SourcesConfig) -> Result<Self, SourceError> {
        let client = http_client(config.timeout)?;

        let courses: Arc<dyn CourseLookup> = match &config.courses.catalog_path {
            Some(path) => Arc::new(CsvCourseCatalog::from_path(path)?),
            None => Arc::new(CourseraClient::new(client.clone(), &config.courses)),
        };

        Ok(Self {
            occupations: Arc::new(OnetClient::new(client.clone(), &config.onet)),
            jobs: Arc::new(JSearchClient::new(client, &config.jsearch)),
            courses,
        })
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}
